//! Closed-form ridge regression on standardized features.
//!
//! [`RidgeRegression`] is the unfitted configuration; fitting produces an
//! immutable [`RidgeModel`] that carries only inference parameters. The
//! normal equations `(Z^T Z + alpha*I) w = Z^T (y - mean(y))` are solved
//! directly on standardized features, so training is deterministic and
//! has no iterative hyperparameters. Per-feature means and standard
//! deviations are folded into the fitted parameters, which keeps the
//! model well conditioned on raw financial values in the 10^7 range.

use crate::error::Error;
use crate::model::{FittedRegressor, Regressor};
use serde::{Deserialize, Serialize};

/// Unfitted ridge regression configuration.
#[derive(Debug, Clone, Copy)]
pub struct RidgeRegression {
    alpha: f64,
}

impl RidgeRegression {
    /// Creates a configuration with the given regularization strength.
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }
}

impl Default for RidgeRegression {
    /// A near-unregularized default; the small `alpha` only stabilizes the
    /// linear solve when features are collinear.
    fn default() -> Self {
        Self { alpha: 1e-6 }
    }
}

/// Serializable fitted parameters of a [`RidgeModel`].
///
/// `weights` apply to standardized features: the model output is
/// `bias + sum(weights[i] * (x[i] - means[i]) / stds[i])`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeParams {
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
    pub weights: Vec<f64>,
    pub bias: f64,
}

/// Fitted ridge regression model. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct RidgeModel {
    params: RidgeParams,
}

impl RidgeModel {
    /// Number of features the model was fit on.
    pub fn n_features(&self) -> usize {
        self.params.weights.len()
    }

    /// Read-only view of the fitted parameters.
    pub fn params(&self) -> &RidgeParams {
        &self.params
    }
}

impl Regressor for RidgeRegression {
    type Fitted = RidgeModel;

    fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<RidgeModel, Error> {
        if x.is_empty() {
            return Err(Error::EmptyData("no training rows".to_string()));
        }
        if x.len() != y.len() {
            return Err(Error::InvalidParameter(format!(
                "feature rows ({}) and target values ({}) differ in count",
                x.len(),
                y.len()
            )));
        }
        let d = x[0].len();
        if d == 0 {
            return Err(Error::EmptyData("no feature columns".to_string()));
        }
        if let Some(row) = x.iter().find(|row| row.len() != d) {
            return Err(Error::FeatureMismatch {
                expected: d,
                got: row.len(),
            });
        }
        if self.alpha < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "alpha must be non-negative, got {}",
                self.alpha
            )));
        }

        let n = x.len();

        // Per-feature standardization. A constant column gets std 1.0 so
        // its standardized values are all zero and it carries no weight.
        let mut means = vec![0.0; d];
        for row in x {
            for (m, &v) in means.iter_mut().zip(row.iter()) {
                *m += v;
            }
        }
        for m in &mut means {
            *m /= n as f64;
        }

        let mut stds = vec![0.0; d];
        for row in x {
            for ((s, &m), &v) in stds.iter_mut().zip(means.iter()).zip(row.iter()) {
                *s += (v - m).powi(2);
            }
        }
        for s in &mut stds {
            *s = (*s / n as f64).sqrt();
            if *s < f64::EPSILON {
                *s = 1.0;
            }
        }

        let y_mean: f64 = y.iter().sum::<f64>() / n as f64;

        // Normal equations on standardized features with centered target.
        let z: Vec<Vec<f64>> = x
            .iter()
            .map(|row| {
                row.iter()
                    .zip(means.iter().zip(stds.iter()))
                    .map(|(&v, (&m, &s))| (v - m) / s)
                    .collect()
            })
            .collect();

        let mut gram = vec![vec![0.0; d]; d];
        let mut rhs = vec![0.0; d];
        for (row, &target) in z.iter().zip(y.iter()) {
            let centered = target - y_mean;
            for i in 0..d {
                rhs[i] += row[i] * centered;
                for j in i..d {
                    gram[i][j] += row[i] * row[j];
                }
            }
        }
        for i in 0..d {
            gram[i][i] += self.alpha;
            for j in 0..i {
                gram[i][j] = gram[j][i];
            }
        }

        let weights = solve(gram, rhs)?;

        Ok(RidgeModel {
            params: RidgeParams {
                means,
                stds,
                weights,
                bias: y_mean,
            },
        })
    }
}

impl FittedRegressor for RidgeModel {
    type ParamsRepr = RidgeParams;

    fn predict(&self, features: &[f64]) -> Result<f64, Error> {
        let p = &self.params;
        if features.len() != p.weights.len() {
            return Err(Error::FeatureMismatch {
                expected: p.weights.len(),
                got: features.len(),
            });
        }

        let mut acc = p.bias;
        for i in 0..features.len() {
            acc += p.weights[i] * (features[i] - p.means[i]) / p.stds[i];
        }
        Ok(acc)
    }

    fn extract_params(&self) -> RidgeParams {
        self.params.clone()
    }

    fn from_params(params: RidgeParams) -> Result<Self, Error> {
        let d = params.weights.len();
        if params.means.len() != d || params.stds.len() != d {
            return Err(Error::Serialization(format!(
                "inconsistent parameter lengths: {} weights, {} means, {} stds",
                d,
                params.means.len(),
                params.stds.len()
            )));
        }
        Ok(Self { params })
    }
}

/// Solves `a * x = b` by Gaussian elimination with partial pivoting.
///
/// `a` is the symmetric positive definite gram matrix; with `alpha > 0`
/// the pivots stay bounded away from zero.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, Error> {
    let d = b.len();

    for col in 0..d {
        let pivot_row = (col..d)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);
        if a[pivot_row][col].abs() < 1e-12 {
            return Err(Error::InvalidParameter(
                "linear system is singular; increase alpha".to_string(),
            ));
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..d {
            let factor = a[row][col] / a[col][col];
            for k in col..d {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; d];
    for col in (0..d).rev() {
        let mut acc = b[col];
        for k in (col + 1)..d {
            acc -= a[col][k] * x[k];
        }
        x[col] = acc / a[col][col];
    }
    Ok(x)
}
