//! Metrics for evaluating regression quality on a holdout partition.

/// Regression metrics over paired truth/prediction slices.
pub struct Metrics;

impl Metrics {
    /// Mean Absolute Error: `mean(|y_true - y_pred|)`. Lower is better.
    pub fn mae(y_true: &[f64], y_pred: &[f64]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );

        if y_true.is_empty() {
            return 0.0;
        }

        let sum_abs: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).abs())
            .sum();

        sum_abs / y_true.len() as f64
    }

    /// Mean Squared Error: `mean((y_true - y_pred)^2)`. Lower is better.
    pub fn mse(y_true: &[f64], y_pred: &[f64]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );

        if y_true.is_empty() {
            return 0.0;
        }

        let sum_sq: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();

        sum_sq / y_true.len() as f64
    }

    /// Coefficient of determination: `1 - SS_res / SS_tot`.
    ///
    /// At most 1.0 (perfect fit); can go negative when the model is worse
    /// than predicting the mean. A constant target with exact predictions
    /// scores 1.0, otherwise 0.0, so division by zero never occurs.
    pub fn r_squared(y_true: &[f64], y_pred: &[f64]) -> f64 {
        assert_eq!(
            y_true.len(),
            y_pred.len(),
            "Arrays must have the same length"
        );

        if y_true.is_empty() {
            return 0.0;
        }

        let mean_true: f64 = y_true.iter().copied().sum::<f64>() / y_true.len() as f64;

        let ss_res: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(&t, &p)| (t - p).powi(2))
            .sum();

        let ss_tot: f64 = y_true.iter().map(|&t| (t - mean_true).powi(2)).sum();

        if ss_tot == 0.0 {
            return if ss_res == 0.0 { 1.0 } else { 0.0 };
        }

        1.0 - (ss_res / ss_tot)
    }

    /// Computes all holdout metrics at once.
    pub fn evaluate(y_true: &[f64], y_pred: &[f64]) -> EvalReport {
        EvalReport {
            mae: Self::mae(y_true, y_pred),
            mse: Self::mse(y_true, y_pred),
            r2: Self::r_squared(y_true, y_pred),
        }
    }
}

/// Holdout evaluation result returned by the trainer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalReport {
    pub mae: f64,
    pub mse: f64,
    pub r2: f64,
}

impl std::fmt::Display for EvalReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MAE: {:.4}, MSE: {:.4}, R2: {:.4}",
            self.mae, self.mse, self.r2
        )
    }
}
