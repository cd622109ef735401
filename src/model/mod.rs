//! Regression estimators behind fit/predict/serialize contracts.
//!
//! The trainer and predictor only talk to estimators through the
//! [`Regressor`] and [`FittedRegressor`] traits, so the concrete
//! algorithm is substitutable. The crate ships one implementation:
//! closed-form ridge regression on standardized features ([`linear`]).

pub mod linear;

pub use linear::{RidgeModel, RidgeParams, RidgeRegression};

use crate::error::Error;

/// An estimator configuration that can be fit on a feature matrix.
pub trait Regressor {
    type Fitted: FittedRegressor;

    /// Fits the estimator on rows `x` (one feature vector per row) and
    /// targets `y`. The configuration itself is reusable across fits.
    fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<Self::Fitted, Error>;
}

/// Inference contract of a fitted estimator.
///
/// A fitted estimator is immutable: it carries only the parameters needed
/// for prediction and serialization, never training state.
pub trait FittedRegressor: Sized {
    /// Serializable representation of the fitted parameters.
    type ParamsRepr;

    /// Scores a single feature vector.
    fn predict(&self, features: &[f64]) -> Result<f64, Error>;

    /// Scores a batch of feature vectors, one prediction per row.
    fn predict_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
        rows.iter().map(|row| self.predict(row)).collect()
    }

    /// Extracts the parameters for persistence.
    fn extract_params(&self) -> Self::ParamsRepr;

    /// Rebuilds the estimator from persisted parameters.
    fn from_params(params: Self::ParamsRepr) -> Result<Self, Error>;
}
