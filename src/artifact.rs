//! Persistence of fitted model parameters.
//!
//! The artifact is a single bincode-encoded file holding the fitted
//! parameters together with the ordered feature schema. The schema lets
//! the predictor refuse inputs whose shape does not match the training
//! columns. Retraining overwrites the whole file; there is no
//! update-in-place.

use crate::error::Error;
use crate::model::RidgeParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk form of a trained estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Feature column names in the order the model was fit with.
    pub feature_names: Vec<String>,
    /// Fitted estimator parameters.
    pub params: RidgeParams,
}

impl Artifact {
    /// Serializes the artifact to `path`, overwriting any existing file.
    ///
    /// Missing parent directories are created.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = bincode::serialize(self)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Deserializes an artifact from `path`.
    ///
    /// A missing file maps to [`Error::ArtifactNotFound`]; any other read
    /// or decode failure surfaces as [`Error::Io`] or
    /// [`Error::Serialization`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ArtifactNotFound(path.to_path_buf())
            } else {
                Error::Io(e.to_string())
            }
        })?;
        let artifact = bincode::deserialize(&bytes)?;
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_artifact() -> Artifact {
        Artifact {
            feature_names: vec![
                "total_assets".to_string(),
                "monthly_income".to_string(),
                "monthly_expenses".to_string(),
                "total_debt".to_string(),
            ],
            params: RidgeParams {
                means: vec![1.0, 2.0, 3.0, 4.0],
                stds: vec![1.0, 1.0, 2.0, 2.0],
                weights: vec![0.5, -0.25, 0.75, 1.5],
                bias: 6.5,
            },
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        let artifact = sample_artifact();
        artifact.save(&path).unwrap();

        let loaded = Artifact::load(&path).unwrap();
        assert_eq!(loaded, artifact);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/artifacts/model.bin");

        sample_artifact().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");

        let mut artifact = sample_artifact();
        artifact.save(&path).unwrap();

        artifact.params.bias = -1.0;
        artifact.save(&path).unwrap();

        let loaded = Artifact::load(&path).unwrap();
        assert_eq!(loaded.params.bias, -1.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");
        let err = Artifact::load(&path).unwrap_err();
        assert!(matches!(err, Error::ArtifactNotFound(p) if p == path));
    }

    #[test]
    fn test_load_corrupt_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.bin");
        fs::write(&path, [0xff, 0xff, 0xff, 0xff]).unwrap();

        let err = Artifact::load(&path).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
