use serde::Deserialize;

use crate::chart::kind::{PlotKind, PlotLayer};
use crate::config::args::StyleArgs;
use crate::foundation::error::{DatagifError, DatagifResult};

/// A parameter given either once (broadcast to every layer) or once per layer.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A scalar, repeated to match the layer count.
    One(T),
    /// One value per layer.
    Many(Vec<T>),
}

impl<T: Default> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::One(T::default())
    }
}

impl<T: Clone> OneOrMany<T> {
    /// Wrap a scalar.
    pub fn one(v: T) -> Self {
        Self::One(v)
    }

    /// Wrap a per-layer list.
    pub fn many(v: impl IntoIterator<Item = T>) -> Self {
        Self::Many(v.into_iter().collect())
    }

    /// Length when list-valued; `None` for scalars.
    pub fn list_len(&self) -> Option<usize> {
        match self {
            Self::One(_) => None,
            Self::Many(v) => Some(v.len()),
        }
    }

    /// Expand to exactly `n` values.
    pub fn broadcast(&self, n: usize, what: &str) -> DatagifResult<Vec<T>> {
        match self {
            Self::One(v) => Ok(vec![v.clone(); n]),
            Self::Many(v) if v.len() == n => Ok(v.clone()),
            Self::Many(v) => Err(DatagifError::configuration(format!(
                "'{what}' has {} entries but {n} plot layers were requested",
                v.len()
            ))),
        }
    }

    /// Every value, without broadcasting.
    pub fn values(&self) -> Vec<T> {
        match self {
            Self::One(v) => vec![v.clone()],
            Self::Many(v) => v.clone(),
        }
    }
}

impl From<&str> for OneOrMany<String> {
    fn from(v: &str) -> Self {
        Self::One(v.to_string())
    }
}

impl From<Vec<&str>> for OneOrMany<String> {
    fn from(v: Vec<&str>) -> Self {
        Self::Many(v.into_iter().map(str::to_string).collect())
    }
}

impl From<PlotKind> for OneOrMany<PlotKind> {
    fn from(v: PlotKind) -> Self {
        Self::One(v)
    }
}

impl From<Vec<PlotKind>> for OneOrMany<PlotKind> {
    fn from(v: Vec<PlotKind>) -> Self {
        Self::Many(v)
    }
}

impl From<StyleArgs> for OneOrMany<StyleArgs> {
    fn from(v: StyleArgs) -> Self {
        Self::One(v)
    }
}

impl From<Vec<StyleArgs>> for OneOrMany<StyleArgs> {
    fn from(v: Vec<StyleArgs>) -> Self {
        Self::Many(v)
    }
}

/// Zip plot kinds, columns and style bags into layers.
///
/// Every list-valued parameter must have the same non-zero length; scalars repeat to match it.
/// With no list-valued parameter there is exactly one layer.
pub fn resolve_layers(
    plots: &OneOrMany<PlotKind>,
    x: &OneOrMany<String>,
    y: &OneOrMany<String>,
    style: &OneOrMany<StyleArgs>,
) -> DatagifResult<Vec<PlotLayer>> {
    let lens = [
        ("plots", plots.list_len()),
        ("x", x.list_len()),
        ("y", y.list_len()),
        ("style_args", style.list_len()),
    ];

    let mut n: Option<(&str, usize)> = None;
    for (what, len) in lens {
        let Some(len) = len else { continue };
        if len == 0 {
            return Err(DatagifError::configuration(format!("'{what}' must not be empty")));
        }
        match n {
            None => n = Some((what, len)),
            Some((first, expected)) if expected != len => {
                return Err(DatagifError::configuration(format!(
                    "'{what}' has {len} entries but '{first}' has {expected}; list-valued plot parameters must have equal length"
                )));
            }
            Some(_) => {}
        }
    }
    let n = n.map(|(_, len)| len).unwrap_or(1);

    let kinds = plots.broadcast(n, "plots")?;
    let xs = x.broadcast(n, "x")?;
    let ys = y.broadcast(n, "y")?;
    let styles = style.broadcast(n, "style_args")?;

    Ok(kinds
        .into_iter()
        .zip(xs)
        .zip(ys)
        .zip(styles)
        .map(|(((kind, x), y), style)| PlotLayer { kind, x, y, style })
        .collect())
}

#[cfg(test)]
#[path = "../../tests/unit/config/broadcast.rs"]
mod tests;
