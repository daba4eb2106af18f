//! Column-major datasets.

use serde::{Deserialize, Serialize};

use crate::errors::DatasetError;

use super::value::Value;

/// A named column of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered, rectangular table of named columns.
///
/// Rows have no identity beyond their position. Column names are not
/// checked for uniqueness here; whether duplicates are acceptable is up to
/// the store the dataset is written to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    columns: Vec<Column>,
}

/// Unchecked wire form of [`Dataset`]; length checks run on conversion.
#[derive(Deserialize)]
struct RawDataset {
    columns: Vec<Column>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = DatasetError;

    fn try_from(raw: RawDataset) -> Result<Self, Self::Error> {
        Dataset::new(raw.columns)
    }
}

impl Dataset {
    /// Build a dataset from columns. All columns must have the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self, DatasetError> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(DatasetError::ColumnLength {
                    column: bad.name.clone(),
                    expected,
                    actual: bad.len(),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Build a dataset from column names and row-major values.
    pub fn from_rows<N, R>(
        names: impl IntoIterator<Item = N>,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self, DatasetError>
    where
        N: Into<String>,
        R: IntoIterator<Item = Value>,
    {
        let mut builder = DatasetBuilder::new(names);
        for row in rows {
            builder.push_row(row)?;
        }
        Ok(builder.build())
    }

    /// Start a row-by-row builder.
    pub fn builder<N: Into<String>>(names: impl IntoIterator<Item = N>) -> DatasetBuilder {
        DatasetBuilder::new(names)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows. A dataset without columns has no rows.
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Values of row `index` in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.num_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> + '_ {
        (0..self.num_rows()).map(move |i| self.columns.iter().map(|c| &c.values[i]).collect())
    }
}

/// Row-by-row dataset construction with width checking.
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    columns: Vec<Column>,
    rows: usize,
}

impl DatasetBuilder {
    pub fn new<N: Into<String>>(names: impl IntoIterator<Item = N>) -> Self {
        Self {
            columns: names
                .into_iter()
                .map(|n| Column::new(n, Vec::new()))
                .collect(),
            rows: 0,
        }
    }

    /// Append a row. Its width must match the number of columns.
    pub fn push_row(
        &mut self,
        row: impl IntoIterator<Item = Value>,
    ) -> Result<&mut Self, DatasetError> {
        let values: Vec<Value> = row.into_iter().collect();
        if values.len() != self.columns.len() {
            return Err(DatasetError::RowWidth {
                row: self.rows,
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.values.push(value);
        }
        self.rows += 1;
        Ok(self)
    }

    pub fn build(self) -> Dataset {
        Dataset {
            columns: self.columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Dataset {
        Dataset::from_rows(
            ["id", "name"],
            [
                vec![Value::from(1), Value::from("Ann")],
                vec![Value::from(2), Value::from("Bo")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows_shape() {
        let ds = users();
        assert_eq!(ds.num_columns(), 2);
        assert_eq!(ds.num_rows(), 2);
        assert_eq!(ds.column_names().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(ds.row(1).unwrap(), vec![&Value::Integer(2), &Value::Text("Bo".into())]);
        assert!(ds.row(2).is_none());
    }

    #[test]
    fn test_rows_iterates_in_order() {
        let ids: Vec<Value> = users().rows().map(|r| r[0].clone()).collect();
        assert_eq!(ids, vec![Value::Integer(1), Value::Integer(2)]);
    }

    #[test]
    fn test_ragged_row_rejected() {
        let err = Dataset::from_rows(["a", "b"], [vec![Value::from(1)]]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::RowWidth {
                row: 0,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let err = Dataset::new(vec![
            Column::new("a", vec![Value::from(1), Value::from(2)]),
            Column::new("b", vec![Value::from(1)]),
        ])
        .unwrap_err();
        assert!(matches!(err, DatasetError::ColumnLength { ref column, .. } if column == "b"));
    }

    #[test]
    fn test_deserialize_rejects_ragged_columns() {
        let json = r#"{"columns":[{"name":"a","values":[1,2]},{"name":"b","values":[1]}]}"#;
        let err = serde_json::from_str::<Dataset>(json).unwrap_err();
        assert!(err.to_string().contains("column 'b'"), "{err}");
    }

    #[test]
    fn test_deserialize_rectangular() {
        let json = r#"{"columns":[{"name":"id","values":[1,2]},{"name":"name","values":["Ann","Bo"]}]}"#;
        let ds: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(ds, users());
        assert_eq!(serde_json::to_string(&ds).unwrap(), json);
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::default();
        assert_eq!(ds.num_rows(), 0);
        assert_eq!(ds.num_columns(), 0);
        assert_eq!(ds.rows().count(), 0);
    }
}
