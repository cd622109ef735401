//! Offline model training: prepare, fit, evaluate, persist.
//!
//! [`ModelTrainer`] walks a fixed state machine at runtime:
//! `Uninitialized -> DataPrepared -> Trained`. Calling an operation out
//! of order fails with a state error instead of producing a half-built
//! model; in particular `save` refuses to persist an unfit estimator.

use crate::artifact::Artifact;
use crate::dataset::{train_test_split, SplitData, Table};
use crate::error::Error;
use crate::metrics::{EvalReport, Metrics};
use crate::model::{FittedRegressor, Regressor, RidgeModel, RidgeRegression};
use std::path::Path;

/// Default holdout fraction for `prepare_data`.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Fixed shuffle seed, so retraining on the same data reproduces the
/// same partitions and the same fitted parameters.
pub const SPLIT_SEED: u64 = 42;

/// Trains a payoff regression model on a labeled [`Table`].
pub struct ModelTrainer {
    table: Table,
    features: Vec<String>,
    target: String,
    estimator: RidgeRegression,
    seed: u64,
    verbose: bool,
    split: Option<SplitData>,
    model: Option<RidgeModel>,
}

impl ModelTrainer {
    /// Creates a trainer over `table` with the given feature columns and
    /// target column. Column existence is checked in [`prepare_data`],
    /// not here.
    ///
    /// [`prepare_data`]: ModelTrainer::prepare_data
    pub fn new(table: Table, features: &[&str], target: &str) -> Self {
        Self {
            table,
            features: features.iter().map(|f| f.to_string()).collect(),
            target: target.to_string(),
            estimator: RidgeRegression::default(),
            seed: SPLIT_SEED,
            verbose: false,
            split: None,
            model: None,
        }
    }

    /// Overrides the estimator configuration.
    pub fn estimator(mut self, estimator: RidgeRegression) -> Self {
        self.estimator = estimator;
        self
    }

    /// Overrides the shuffle seed used by `prepare_data`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables progress output on stdout. Off by default.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Validates the declared columns and splits the table into train and
    /// holdout partitions.
    ///
    /// Fails with [`Error::MissingColumns`] naming exactly the absent
    /// columns. `test_fraction` must be in `(0, 1)`; the resulting
    /// holdout holds `round(n * test_fraction)` rows.
    pub fn prepare_data(&mut self, test_fraction: f64) -> Result<(), Error> {
        let feature_refs: Vec<&str> = self.features.iter().map(String::as_str).collect();
        let (x, y) = self.table.select(&feature_refs, &self.target)?;
        let split = train_test_split(x, y, test_fraction, self.seed)?;

        if self.verbose {
            println!(
                "[danaga] prepared {} training rows, {} holdout rows",
                split.x_train.len(),
                split.x_test.len()
            );
        }

        self.split = Some(split);
        Ok(())
    }

    /// Fits the estimator on the training partition.
    ///
    /// Fails with [`Error::DataNotPrepared`] before [`prepare_data`].
    ///
    /// [`prepare_data`]: ModelTrainer::prepare_data
    pub fn train(&mut self) -> Result<(), Error> {
        let split = self.split.as_ref().ok_or(Error::DataNotPrepared)?;
        let model = self.estimator.fit(&split.x_train, &split.y_train)?;

        if self.verbose {
            println!(
                "[danaga] fitted {}-feature model on {} rows",
                model.n_features(),
                split.x_train.len()
            );
        }

        self.model = Some(model);
        Ok(())
    }

    /// Scores the holdout partition and returns MAE, MSE and R².
    ///
    /// Requires both a prepared split and a trained model; has no side
    /// effect on either.
    pub fn evaluate(&self) -> Result<EvalReport, Error> {
        let split = self.split.as_ref().ok_or(Error::DataNotPrepared)?;
        let model = self.model.as_ref().ok_or(Error::ModelNotTrained)?;

        let predictions = model.predict_batch(&split.x_test)?;
        let report = Metrics::evaluate(&split.y_test, &predictions);

        if self.verbose {
            println!("[danaga] holdout {}", report);
        }

        Ok(report)
    }

    /// Persists the fitted parameters and the feature schema to `path`,
    /// overwriting any existing artifact.
    ///
    /// Fails with [`Error::ModelNotTrained`] before a successful
    /// [`train`]; an unfit estimator is never persisted.
    ///
    /// [`train`]: ModelTrainer::train
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let model = self.model.as_ref().ok_or(Error::ModelNotTrained)?;
        let artifact = Artifact {
            feature_names: self.features.clone(),
            params: model.extract_params(),
        };
        artifact.save(path)
    }

    /// The fitted model, once [`train`] has succeeded.
    ///
    /// [`train`]: ModelTrainer::train
    pub fn model(&self) -> Option<&RidgeModel> {
        self.model.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FEATURE_NAMES, TARGET};

    fn sample_table(n: u64) -> Table {
        let columns: Vec<String> = FEATURE_NAMES
            .iter()
            .map(|c| c.to_string())
            .chain(std::iter::once(TARGET.to_string()))
            .collect();
        let rows = (0..n)
            .map(|i| {
                let assets = 10_000_000.0 + ((i * 7919) % 97) as f64 * 500_000.0;
                let income = 8_000_000.0 + ((i * 104_729) % 89) as f64 * 100_000.0;
                let expenses = 4_000_000.0 + ((i * 1_299_709) % 83) as f64 * 50_000.0;
                let debt = 20_000_000.0 + ((i * 15_485_863) % 79) as f64 * 400_000.0;
                let months = debt / 4e6 - assets / 8e6 + expenses / 1e6 - income / 2e6 + 10.0;
                vec![assets, income, expenses, debt, months]
            })
            .collect();
        Table::new(columns, rows).unwrap()
    }

    fn feature_refs() -> Vec<&'static str> {
        FEATURE_NAMES.to_vec()
    }

    #[test]
    fn test_prepare_data_partition_sizes() {
        let mut trainer = ModelTrainer::new(sample_table(100), &feature_refs(), TARGET);
        trainer.prepare_data(0.2).unwrap();
        let split = trainer.split.as_ref().unwrap();
        assert_eq!(split.x_train.len(), 80);
        assert_eq!(split.x_test.len(), 20);
    }

    #[test]
    fn test_prepare_data_missing_columns() {
        let mut trainer = ModelTrainer::new(
            sample_table(10),
            &["total_assets", "not_a_column"],
            "also_missing",
        );
        let err = trainer.prepare_data(0.2).unwrap_err();
        match err {
            Error::MissingColumns(cols) => {
                assert_eq!(
                    cols,
                    vec!["not_a_column".to_string(), "also_missing".to_string()]
                );
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_train_before_prepare_is_state_error() {
        let mut trainer = ModelTrainer::new(sample_table(10), &feature_refs(), TARGET);
        assert!(matches!(trainer.train(), Err(Error::DataNotPrepared)));
    }

    #[test]
    fn test_evaluate_before_prepare_is_state_error() {
        let trainer = ModelTrainer::new(sample_table(10), &feature_refs(), TARGET);
        assert!(matches!(trainer.evaluate(), Err(Error::DataNotPrepared)));
    }

    #[test]
    fn test_evaluate_before_train_is_state_error() {
        let mut trainer = ModelTrainer::new(sample_table(10), &feature_refs(), TARGET);
        trainer.prepare_data(0.2).unwrap();
        assert!(matches!(trainer.evaluate(), Err(Error::ModelNotTrained)));
    }

    #[test]
    fn test_save_before_train_is_state_error() {
        let mut trainer = ModelTrainer::new(sample_table(10), &feature_refs(), TARGET);
        trainer.prepare_data(0.2).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let result = trainer.save(dir.path().join("model.bin"));
        assert!(matches!(result, Err(Error::ModelNotTrained)));
    }

    #[test]
    fn test_full_training_run_metrics_are_sane() {
        let mut trainer = ModelTrainer::new(sample_table(100), &feature_refs(), TARGET);
        trainer.prepare_data(0.2).unwrap();
        trainer.train().unwrap();
        let report = trainer.evaluate().unwrap();

        assert!(report.mae >= 0.0);
        assert!(report.mse >= 0.0);
        assert!(report.r2 <= 1.0);
        // The target is an exact linear function of the features, so the
        // closed-form fit should explain essentially all variance.
        assert!(report.r2 > 0.99, "r2 = {}", report.r2);
    }

    #[test]
    fn test_same_seed_reproduces_fit() {
        let mut a = ModelTrainer::new(sample_table(60), &feature_refs(), TARGET);
        let mut b = ModelTrainer::new(sample_table(60), &feature_refs(), TARGET);
        a.prepare_data(0.2).unwrap();
        b.prepare_data(0.2).unwrap();
        a.train().unwrap();
        b.train().unwrap();
        assert_eq!(
            a.model().unwrap().params(),
            b.model().unwrap().params()
        );
    }

    #[test]
    fn test_prepare_data_rejects_tiny_table() {
        let mut trainer = ModelTrainer::new(sample_table(1), &feature_refs(), TARGET);
        assert!(matches!(
            trainer.prepare_data(0.2),
            Err(Error::EmptyData(_))
        ));
    }
}
