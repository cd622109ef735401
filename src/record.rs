//! The financial input record and its feature schema.

/// Feature columns the payoff model is trained on, in schema order.
pub const FEATURE_NAMES: [&str; 4] = [
    "total_assets",
    "monthly_income",
    "monthly_expenses",
    "total_debt",
];

/// Target column: months needed to pay off the debt.
pub const TARGET: &str = "months_to_payoff";

/// A single user-supplied financial record, already validated and
/// numeric. All amounts are in the same currency unit as the training
/// data; months_to_payoff is what the model predicts from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialRecord {
    pub total_assets: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub total_debt: f64,
}

impl FinancialRecord {
    /// Converts the record into a feature vector in [`FEATURE_NAMES`] order.
    pub fn to_features(&self) -> [f64; 4] {
        [
            self.total_assets,
            self.monthly_income,
            self.monthly_expenses,
            self.total_debt,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_order_matches_schema() {
        let record = FinancialRecord {
            total_assets: 50_000_000.0,
            monthly_income: 8_000_000.0,
            monthly_expenses: 4_000_000.0,
            total_debt: 20_000_000.0,
        };
        let features = record.to_features();
        assert_eq!(features.len(), FEATURE_NAMES.len());
        assert_eq!(features[0], 50_000_000.0);
        assert_eq!(features[3], 20_000_000.0);
    }
}
