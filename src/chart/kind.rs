use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::config::args::StyleArgs;
use crate::foundation::error::DatagifError;

/// Supported plot kinds.
///
/// This is a closed allow list: identifiers outside it are rejected when parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum PlotKind {
    /// Figure-level relational plot (scatter or line, chosen by the `kind` style argument).
    Relplot,
    /// Scatter plot.
    #[default]
    Scatterplot,
    /// Line plot with per-x aggregation.
    Lineplot,
    /// Bivariate histogram heatmap.
    Histplot,
    /// Bivariate kernel density contours.
    Kdeplot,
}

impl PlotKind {
    /// Every supported kind, in documentation order.
    pub const ALL: [PlotKind; 5] = [
        Self::Relplot,
        Self::Scatterplot,
        Self::Lineplot,
        Self::Histplot,
        Self::Kdeplot,
    ];

    /// Identifier used in requests.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relplot => "relplot",
            Self::Scatterplot => "scatterplot",
            Self::Lineplot => "lineplot",
            Self::Histplot => "histplot",
            Self::Kdeplot => "kdeplot",
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlotKind {
    type Err = DatagifError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                DatagifError::configuration(format!(
                    "invalid plot kind '{s}', must be one of {}",
                    Self::ALL.map(PlotKind::as_str).join(", ")
                ))
            })
    }
}

impl TryFrom<String> for PlotKind {
    type Error = DatagifError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One plot drawn onto a frame's figure.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotLayer {
    /// Which plot to draw.
    pub kind: PlotKind,
    /// Column on the x axis.
    pub x: String,
    /// Column on the y axis.
    pub y: String,
    /// Style arguments forwarded to the plot.
    pub style: StyleArgs,
}

#[cfg(test)]
#[path = "../../tests/unit/chart/kind.rs"]
mod tests;
