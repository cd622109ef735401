//! Online scoring against a persisted model artifact.
//!
//! The predictor is loaded once (typically at startup) and then scores
//! one record per request. A loaded model is immutable, so sharing a
//! `Predictor` read-only across threads is safe; the only mutation is
//! `load_model` itself, which must complete before scoring starts.

use crate::artifact::Artifact;
use crate::error::Error;
use crate::model::{FittedRegressor, RidgeModel};
use crate::record::FinancialRecord;
use std::path::{Path, PathBuf};

/// Loads a trained estimator and scores financial records.
pub struct Predictor {
    artifact_path: PathBuf,
    model: Option<RidgeModel>,
    feature_names: Vec<String>,
}

impl Predictor {
    /// Creates a predictor bound to an artifact path. Nothing is read
    /// until [`load_model`] is called.
    ///
    /// [`load_model`]: Predictor::load_model
    pub fn new<P: AsRef<Path>>(artifact_path: P) -> Self {
        Self {
            artifact_path: artifact_path.as_ref().to_path_buf(),
            model: None,
            feature_names: Vec::new(),
        }
    }

    /// Deserializes the artifact into an in-memory estimator.
    ///
    /// Fails with [`Error::ArtifactNotFound`] when the file is missing
    /// and [`Error::Serialization`] for corrupt or mismatched bytes. On
    /// failure the predictor stays unloaded; a later retry may succeed.
    pub fn load_model(&mut self) -> Result<(), Error> {
        let artifact = Artifact::load(&self.artifact_path)?;
        let model = RidgeModel::from_params(artifact.params)?;

        if artifact.feature_names.len() != model.n_features() {
            return Err(Error::Serialization(format!(
                "artifact schema lists {} features but the model has {}",
                artifact.feature_names.len(),
                model.n_features()
            )));
        }

        self.feature_names = artifact.feature_names;
        self.model = Some(model);
        Ok(())
    }

    /// Whether a model has been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Feature schema of the loaded model, in training order.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Scores a single financial record.
    ///
    /// Fails with [`Error::ModelNotLoaded`] before [`load_model`]; any
    /// scoring failure surfaces as an error, never a silent sentinel.
    ///
    /// [`load_model`]: Predictor::load_model
    pub fn predict(&self, record: &FinancialRecord) -> Result<f64, Error> {
        self.predict_features(&record.to_features())
    }

    /// Scores a raw feature vector in the trained schema order.
    pub fn predict_features(&self, features: &[f64]) -> Result<f64, Error> {
        let model = self.model.as_ref().ok_or(Error::ModelNotLoaded)?;
        model.predict(features)
    }

    /// Scores a batch of feature vectors, one prediction per row.
    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
        let model = self.model.as_ref().ok_or(Error::ModelNotLoaded)?;
        model.predict_batch(rows)
    }
}
