use std::cmp::Ordering;

use crate::data::dataset::Dataset;
use crate::foundation::error::{DatagifError, DatagifResult};
use crate::foundation::value::{Value, ValueKind};

/// Rows of a dataset sharing one time value.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSlice {
    /// The shared time value.
    pub time: Value,
    /// Matching rows, all columns retained, in source order.
    pub rows: Dataset,
}

/// Split `data` into one slice per distinct value of `time_column`, ascending.
///
/// Rows whose time value is null belong to no slice.
#[tracing::instrument(skip(data), fields(rows = data.n_rows()))]
pub fn partition(data: &Dataset, time_column: &str) -> DatagifResult<Vec<TimeSlice>> {
    let groups = group_rows(data, time_column)?;
    Ok(groups
        .into_iter()
        .map(|(time, rows)| TimeSlice {
            time,
            rows: data.take_rows(&rows),
        })
        .collect())
}

/// Ascending distinct non-null values of `time_column`.
pub fn distinct_times(data: &Dataset, time_column: &str) -> DatagifResult<Vec<Value>> {
    Ok(group_rows(data, time_column)?
        .into_iter()
        .map(|(time, _)| time)
        .collect())
}

fn group_rows(data: &Dataset, time_column: &str) -> DatagifResult<Vec<(Value, Vec<usize>)>> {
    let column = data.column(time_column)?;

    let mut kind: Option<ValueKind> = None;
    let mut keyed: Vec<(usize, &Value)> = Vec::with_capacity(column.len());
    let mut nulls = 0usize;
    for (row, v) in column.values().iter().enumerate() {
        if v.is_null() {
            nulls += 1;
            continue;
        }
        match kind {
            None => kind = Some(v.kind()),
            Some(k) if k != v.kind() => {
                return Err(DatagifError::schema(format!(
                    "time column '{time_column}' mixes incomparable values ({k:?} and {:?} at row {row})",
                    v.kind()
                )));
            }
            Some(_) => {}
        }
        keyed.push((row, v));
    }
    if nulls > 0 {
        tracing::warn!(column = time_column, nulls, "rows with a null time value are skipped");
    }

    // Stable sort keeps source row order inside each group.
    keyed.sort_by(|a, b| a.1.total_cmp(b.1));

    let mut groups: Vec<(Value, Vec<usize>)> = Vec::new();
    for (row, v) in keyed {
        match groups.last_mut() {
            Some((time, rows)) if time.total_cmp(v) == Ordering::Equal => rows.push(row),
            _ => groups.push((v.clone(), vec![row])),
        }
    }
    Ok(groups)
}

#[cfg(test)]
#[path = "../../tests/unit/data/partition.rs"]
mod tests;
