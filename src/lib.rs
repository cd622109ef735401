//! # danaga
//!
//! Core library behind a debt payoff planner: it estimates how many
//! months a person needs to pay off their debt from four financial
//! inputs (total assets, monthly income, monthly expenses, total debt).
//!
//! ## Design
//!
//! Two components run at different times and share nothing but a single
//! artifact file:
//!
//! - [`ModelTrainer`] runs offline: it validates the labeled dataset,
//!   splits off a holdout partition with a fixed seed, fits a regression
//!   estimator, reports MAE / MSE / R², and serializes the fitted
//!   parameters.
//! - [`Predictor`] runs online: it loads the artifact once and scores a
//!   [`FinancialRecord`] per form submission.
//!
//! The concrete estimator sits behind the [`model::Regressor`] and
//! [`model::FittedRegressor`] traits; the shipped implementation is a
//! closed-form ridge regression on standardized features.
//!
//! All state-machine violations (training before preparing data,
//! predicting before loading, saving an unfit model) surface as typed
//! [`Error`] values; nothing is logged-and-swallowed.
//!
//! ## Quick start
//!
//! ```no_run
//! use danaga::{predict_one, train_and_save, FinancialRecord, Table, FEATURE_NAMES, TARGET};
//!
//! # fn main() -> Result<(), danaga::Error> {
//! let table = Table::from_csv("data/history.csv")?;
//! let report = train_and_save(table, &FEATURE_NAMES, TARGET, "artifacts/model.bin")?;
//! println!("holdout {}", report);
//!
//! let months = predict_one(
//!     "artifacts/model.bin",
//!     &FinancialRecord {
//!         total_assets: 50_000_000.0,
//!         monthly_income: 8_000_000.0,
//!         monthly_expenses: 4_000_000.0,
//!         total_debt: 20_000_000.0,
//!     },
//! )?;
//! println!("estimated payoff: {:.1} months", months);
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod model;
pub mod predictor;
pub mod record;
pub mod trainer;

pub use artifact::Artifact;
pub use dataset::Table;
pub use error::Error;
pub use metrics::EvalReport;
pub use predictor::Predictor;
pub use record::{FinancialRecord, FEATURE_NAMES, TARGET};
pub use trainer::{ModelTrainer, DEFAULT_TEST_FRACTION};

use std::path::Path;

/// Trains on `table`, evaluates on the default holdout fraction and
/// persists the fitted estimator to `artifact_path`.
///
/// This is the one-call offline entry point the UI layer's training job
/// uses; the returned [`EvalReport`] is what it shows next to the model.
pub fn train_and_save<P: AsRef<Path>>(
    table: Table,
    features: &[&str],
    target: &str,
    artifact_path: P,
) -> Result<EvalReport, Error> {
    let mut trainer = ModelTrainer::new(table, features, target);
    trainer.prepare_data(DEFAULT_TEST_FRACTION)?;
    trainer.train()?;
    let report = trainer.evaluate()?;
    trainer.save(artifact_path)?;
    Ok(report)
}

/// Loads the artifact at `artifact_path` and scores a single record.
///
/// Convenience wrapper for one-shot callers; a serving process should
/// instead keep one loaded [`Predictor`] and reuse it per request.
pub fn predict_one<P: AsRef<Path>>(
    artifact_path: P,
    record: &FinancialRecord,
) -> Result<f64, Error> {
    let mut predictor = Predictor::new(artifact_path);
    predictor.load_model()?;
    predictor.predict(record)
}
