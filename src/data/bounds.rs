use crate::data::dataset::Dataset;
use crate::foundation::error::{DatagifError, DatagifResult};

/// Closed numeric range `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Smallest observed value.
    pub min: f64,
    /// Largest observed value.
    pub max: f64,
}

impl Bounds {
    /// Range as a `(min, max)` tuple.
    pub fn as_tuple(self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Min/max over every listed column of the full dataset, combined into one range.
///
/// Duplicate column names are counted once; nulls and non-finite values are skipped.
pub fn global_bounds<'a>(
    data: &Dataset,
    columns: impl IntoIterator<Item = &'a str>,
) -> DatagifResult<Bounds> {
    let mut names: Vec<&str> = Vec::new();
    for c in columns {
        if !names.contains(&c) {
            names.push(c);
        }
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for name in &names {
        for v in data.column(name)?.numeric()?.into_iter().flatten() {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
    }

    if min > max {
        return Err(DatagifError::schema(format!(
            "no numeric values to bound in column(s) {}",
            names.join(", ")
        )));
    }
    Ok(Bounds { min, max })
}

#[cfg(test)]
#[path = "../../tests/unit/data/bounds.rs"]
mod tests;
