//! Tabular dataset loading and train/test splitting.
//!
//! A [`Table`] is a row-oriented table of `f64` values with named columns.
//! It can be built in memory or loaded from a CSV file with a header row.
//! The trainer never reads the table directly; it selects feature columns
//! and a target column via [`Table::select`] and splits the result with
//! [`train_test_split`].

use crate::error::Error;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Row-oriented numeric table with named columns.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Table {
    /// Creates a table from column names and rows.
    ///
    /// Every row must have exactly one value per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, Error> {
        if columns.is_empty() {
            return Err(Error::EmptyData("table has no columns".to_string()));
        }
        if let Some(pos) = rows.iter().position(|row| row.len() != columns.len()) {
            return Err(Error::InvalidParameter(format!(
                "row {} has {} values, expected {}",
                pos,
                rows[pos].len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Loads a table from a CSV file with a header row.
    ///
    /// Every cell must parse as a number; a cell that does not fails the
    /// whole load with [`Error::InvalidValue`] naming the column and the
    /// zero-based data row.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut rdr = csv::ReaderBuilder::new().from_reader(reader);

        let columns: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (row_idx, result) in rdr.records().enumerate() {
            let record = result?;
            let mut row = Vec::with_capacity(columns.len());
            for (col_idx, cell) in record.iter().enumerate() {
                let value: f64 = cell.trim().parse().map_err(|_| Error::InvalidValue {
                    column: columns
                        .get(col_idx)
                        .cloned()
                        .unwrap_or_else(|| format!("#{}", col_idx)),
                    row: row_idx,
                })?;
                row.push(value);
            }
            rows.push(row);
        }

        Self::new(columns, rows)
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Checks whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names, in table order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Extracts the feature matrix and target vector for the named columns.
    ///
    /// Feature order in the output matches the order of `features`, which
    /// becomes the schema the fitted model is tied to. Fails with
    /// [`Error::MissingColumns`] listing exactly the absent columns.
    pub fn select(&self, features: &[&str], target: &str) -> Result<(Vec<Vec<f64>>, Vec<f64>), Error> {
        let missing: Vec<String> = features
            .iter()
            .copied()
            .chain(std::iter::once(target))
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingColumns(missing));
        }

        let feature_idx: Vec<usize> = features
            .iter()
            .map(|name| self.column_index(name).unwrap())
            .collect();
        let target_idx = self.column_index(target).unwrap();

        let x: Vec<Vec<f64>> = self
            .rows
            .iter()
            .map(|row| feature_idx.iter().map(|&i| row[i]).collect())
            .collect();
        let y: Vec<f64> = self.rows.iter().map(|row| row[target_idx]).collect();

        Ok((x, y))
    }
}

/// The four partitions produced by [`train_test_split`].
#[derive(Debug, Clone)]
pub struct SplitData {
    pub x_train: Vec<Vec<f64>>,
    pub x_test: Vec<Vec<f64>>,
    pub y_train: Vec<f64>,
    pub y_test: Vec<f64>,
}

/// Splits `(x, y)` into shuffled train and holdout partitions.
///
/// The shuffle is driven by a seeded [`StdRng`], so the same inputs and
/// seed always produce the same partitions. The holdout size is
/// `round(n * test_fraction)`, clamped so both partitions stay non-empty.
pub fn train_test_split(
    x: Vec<Vec<f64>>,
    y: Vec<f64>,
    test_fraction: f64,
    seed: u64,
) -> Result<SplitData, Error> {
    if x.len() != y.len() {
        return Err(Error::InvalidParameter(format!(
            "feature rows ({}) and target values ({}) differ in count",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(Error::EmptyData(
            "at least 2 rows are required to split".to_string(),
        ));
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(Error::InvalidParameter(format!(
            "test_fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    let n = x.len();
    let mut n_test = (n as f64 * test_fraction).round() as usize;
    n_test = n_test.clamp(1, n - 1);

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);

    Ok(SplitData {
        x_train: train_idx.iter().map(|&i| x[i].clone()).collect(),
        x_test: test_idx.iter().map(|&i| x[i].clone()).collect(),
        y_train: train_idx.iter().map(|&i| y[i]).collect(),
        y_test: test_idx.iter().map(|&i| y[i]).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_table(n: usize) -> Table {
        let columns = vec![
            "total_assets".to_string(),
            "monthly_income".to_string(),
            "monthly_expenses".to_string(),
            "total_debt".to_string(),
            "months_to_payoff".to_string(),
        ];
        let rows = (0..n)
            .map(|i| {
                let i = i as f64;
                vec![
                    10_000_000.0 + i * 500_000.0,
                    8_000_000.0 + i * 10_000.0,
                    4_000_000.0 + i * 5_000.0,
                    20_000_000.0 + i * 300_000.0,
                    5.0 + i * 0.1,
                ]
            })
            .collect();
        Table::new(columns, rows).unwrap()
    }

    #[test]
    fn test_table_new_rejects_ragged_rows() {
        let columns = vec!["a".to_string(), "b".to_string()];
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            Table::new(columns, rows),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_select_preserves_feature_order() {
        let table = sample_table(3);
        let (x, y) = table
            .select(&["total_debt", "total_assets"], "months_to_payoff")
            .unwrap();
        assert_eq!(x[0], vec![20_000_000.0, 10_000_000.0]);
        assert_eq!(y.len(), 3);
    }

    #[test]
    fn test_select_missing_columns_named_exactly() {
        let table = sample_table(3);
        let err = table
            .select(&["total_debt", "no_such", "another"], "months_to_payoff")
            .unwrap_err();
        match err {
            Error::MissingColumns(cols) => {
                assert_eq!(cols, vec!["no_such".to_string(), "another".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_select_missing_target() {
        let table = sample_table(3);
        let err = table.select(&["total_debt"], "months").unwrap_err();
        match err {
            Error::MissingColumns(cols) => assert_eq!(cols, vec!["months".to_string()]),
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_split_counts_sum_to_total() {
        let table = sample_table(100);
        let (x, y) = table
            .select(
                &["total_assets", "monthly_income", "monthly_expenses", "total_debt"],
                "months_to_payoff",
            )
            .unwrap();
        let split = train_test_split(x, y, 0.2, 42).unwrap();
        assert_eq!(split.x_train.len(), 80);
        assert_eq!(split.x_test.len(), 20);
        assert_eq!(split.y_train.len(), 80);
        assert_eq!(split.y_test.len(), 20);
    }

    #[test]
    fn test_split_is_deterministic() {
        let table = sample_table(50);
        let (x, y) = table.select(&["total_debt"], "months_to_payoff").unwrap();
        let a = train_test_split(x.clone(), y.clone(), 0.2, 42).unwrap();
        let b = train_test_split(x, y, 0.2, 42).unwrap();
        assert_eq!(a.y_test, b.y_test);
        assert_eq!(a.y_train, b.y_train);
    }

    #[test]
    fn test_split_two_rows_keeps_both_partitions() {
        let x = vec![vec![1.0], vec![2.0]];
        let y = vec![1.0, 2.0];
        let split = train_test_split(x, y, 0.2, 42).unwrap();
        assert_eq!(split.x_train.len(), 1);
        assert_eq!(split.x_test.len(), 1);
    }

    #[test]
    fn test_split_rejects_bad_fraction() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0]];
        let y = vec![1.0, 2.0, 3.0];
        assert!(train_test_split(x.clone(), y.clone(), 0.0, 42).is_err());
        assert!(train_test_split(x, y, 1.0, 42).is_err());
    }

    #[test]
    fn test_split_rejects_single_row() {
        let err = train_test_split(vec![vec![1.0]], vec![1.0], 0.2, 42).unwrap_err();
        assert!(matches!(err, Error::EmptyData(_)));
    }

    #[test]
    fn test_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "total_assets,total_debt,months_to_payoff").unwrap();
        writeln!(file, "50000000,20000000,5").unwrap();
        writeln!(file, "10000000,30000000,12.5").unwrap();

        let table = Table::from_csv(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns().len(), 3);
        let (x, y) = table.select(&["total_debt"], "months_to_payoff").unwrap();
        assert_eq!(x, vec![vec![20_000_000.0], vec![30_000_000.0]]);
        assert_eq!(y, vec![5.0, 12.5]);
    }

    #[test]
    fn test_from_csv_rejects_non_numeric_cell() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "total_assets,total_debt").unwrap();
        writeln!(file, "50000000,20000000").unwrap();
        writeln!(file, "unknown,30000000").unwrap();

        let err = Table::from_csv(&path).unwrap_err();
        match err {
            Error::InvalidValue { column, row } => {
                assert_eq!(column, "total_assets");
                assert_eq!(row, 1);
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }
}
