use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use crate::foundation::error::{DatagifError, DatagifResult};
use crate::foundation::value::Value;

/// One named dataset column.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    /// Build a column from anything convertible into [`Value`]s.
    pub fn new<V: Into<Value>>(name: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cells in row order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Numeric view of the column; nulls map to `None`.
    ///
    /// Any non-null, non-numeric cell is a schema error.
    pub fn numeric(&self) -> DatagifResult<Vec<Option<f64>>> {
        self.values
            .iter()
            .enumerate()
            .map(|(row, v)| match v {
                Value::Null => Ok(None),
                other => other.as_f64().map(Some).ok_or_else(|| {
                    DatagifError::schema(format!(
                        "column '{}' must be numeric, found {other:?} at row {row}",
                        self.name
                    ))
                }),
            })
            .collect()
    }
}

/// Row-homogeneous table of named columns.
///
/// Columns keep their insertion order. A dataset is never mutated once built; row subsets are
/// new datasets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    /// Build a dataset, rejecting ragged or duplicate-named columns.
    pub fn new(columns: Vec<Column>) -> DatagifResult<Self> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        let mut seen = BTreeSet::new();
        for c in &columns {
            if !seen.insert(c.name.as_str()) {
                return Err(DatagifError::schema(format!(
                    "duplicate column name '{}'",
                    c.name
                )));
            }
            if c.len() != rows {
                return Err(DatagifError::schema(format!(
                    "column '{}' has {} rows, expected {rows}",
                    c.name,
                    c.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// All columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// `true` when a column named `name` exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> DatagifResult<&Column> {
        self.columns.iter().find(|c| c.name == name).ok_or_else(|| {
            DatagifError::schema(format!(
                "column '{name}' not found (available: {})",
                self.column_names().collect::<Vec<_>>().join(", ")
            ))
        })
    }

    /// Fail with a schema error naming the first absent column.
    pub fn require_columns<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> DatagifResult<()> {
        for name in names {
            self.column(name)?;
        }
        Ok(())
    }

    /// New dataset holding the given rows (in the given order), all columns retained.
    pub fn take_rows(&self, indices: &[usize]) -> Dataset {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: indices
                    .iter()
                    .filter_map(|&i| c.values.get(i).cloned())
                    .collect(),
            })
            .collect();
        Dataset {
            columns,
            rows: indices.iter().filter(|&&i| i < self.rows).count(),
        }
    }

    /// Paired numeric `(x, y)` values, skipping rows where either side is null.
    pub fn numeric_pairs(&self, x: &str, y: &str) -> DatagifResult<Vec<(f64, f64)>> {
        let xs = self.column(x)?.numeric()?;
        let ys = self.column(y)?.numeric()?;
        Ok(xs
            .into_iter()
            .zip(ys)
            .filter_map(|(a, b)| Some((a?, b?)))
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .collect())
    }

    /// Load a dataset from a `.csv` or `.json` file, chosen by extension.
    pub fn load(path: &Path) -> DatagifResult<Self> {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Self::from_csv_path(path),
            Some("json") => Self::from_json_path(path),
            _ => Err(DatagifError::configuration(format!(
                "unsupported dataset file '{}' (expected .csv or .json)",
                path.display()
            ))),
        }
    }

    /// Load a CSV file with a header row.
    pub fn from_csv_path(path: &Path) -> DatagifResult<Self> {
        let f = std::fs::File::open(path).map_err(|e| DatagifError::io_at("open dataset", path, e))?;
        Self::from_csv_reader(f)
    }

    /// Read CSV with a header row; cells are typed with [`Value::parse_cell`].
    pub fn from_csv_reader<R: Read>(reader: R) -> DatagifResult<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let headers = rdr.headers().map_err(csv_error)?.clone();
        let mut cols: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
        for record in rdr.records() {
            let record = record.map_err(csv_error)?;
            for (col, cell) in cols.iter_mut().zip(record.iter()) {
                col.push(Value::parse_cell(cell));
            }
        }
        Self::new(
            headers
                .iter()
                .zip(cols)
                .map(|(name, values)| Column {
                    name: name.to_string(),
                    values,
                })
                .collect(),
        )
    }

    /// Load a JSON dataset file (see [`Dataset::from_json_value`]).
    pub fn from_json_path(path: &Path) -> DatagifResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| DatagifError::io_at("read dataset", path, e))?;
        let v: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| DatagifError::schema(format!("parse dataset JSON: {e}")))?;
        Self::from_json_value(&v)
    }

    /// Build a dataset from JSON.
    ///
    /// Accepts either an array of flat records (`[{"t": 1, "x": 2.0}, ...]`, keys unioned in
    /// first-seen order, missing keys become null) or a column object
    /// (`{"t": [1, 2], "x": [2.0, 3.0]}`).
    pub fn from_json_value(v: &serde_json::Value) -> DatagifResult<Self> {
        match v {
            serde_json::Value::Array(records) => Self::from_json_records(records),
            serde_json::Value::Object(map) => {
                let mut columns = Vec::with_capacity(map.len());
                for (name, cells) in map {
                    let cells = cells.as_array().ok_or_else(|| {
                        DatagifError::schema(format!("column '{name}' must be a JSON array"))
                    })?;
                    let values = cells.iter().map(Value::from_json).collect::<DatagifResult<_>>()?;
                    columns.push(Column {
                        name: name.clone(),
                        values,
                    });
                }
                Self::new(columns)
            }
            _ => Err(DatagifError::schema(
                "dataset JSON must be an array of records or an object of columns",
            )),
        }
    }

    fn from_json_records(records: &[serde_json::Value]) -> DatagifResult<Self> {
        let mut names: Vec<String> = Vec::new();
        for r in records {
            let obj = r
                .as_object()
                .ok_or_else(|| DatagifError::schema("dataset records must be JSON objects"))?;
            for k in obj.keys() {
                if !names.iter().any(|n| n == k) {
                    names.push(k.clone());
                }
            }
        }
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let values = records
                .iter()
                .map(|r| match r.get(&name) {
                    Some(cell) => Value::from_json(cell),
                    None => Ok(Value::Null),
                })
                .collect::<DatagifResult<Vec<_>>>()?;
            columns.push(Column { name, values });
        }
        Self::new(columns)
    }
}

fn csv_error(e: csv::Error) -> DatagifError {
    if e.is_io_error() {
        DatagifError::io(format!("read csv: {e}"))
    } else {
        DatagifError::schema(format!("parse csv: {e}"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/dataset.rs"]
mod tests;
