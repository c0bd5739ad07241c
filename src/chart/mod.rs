//! Charting: plot kinds, the figure model, themes, colors and the statistical layers.

pub(crate) mod color;
pub(crate) mod contour;
pub(crate) mod distribution;
pub(crate) mod figure;
pub(crate) mod kind;
pub(crate) mod relational;
pub(crate) mod style;
pub(crate) mod theme;

use crate::{
    chart::{figure::Figure, kind::PlotKind, kind::PlotLayer},
    data::dataset::Dataset,
    foundation::error::DatagifResult,
};

/// Draw one layer onto `fig` using the rows of `data`.
pub fn draw_layer(fig: &mut Figure, data: &Dataset, layer: &PlotLayer) -> DatagifResult<()> {
    match layer.kind {
        PlotKind::Relplot => relational::relplot(fig, data, layer),
        PlotKind::Scatterplot => relational::scatterplot(fig, data, layer),
        PlotKind::Lineplot => relational::lineplot(fig, data, layer),
        PlotKind::Histplot => distribution::histplot(fig, data, layer),
        PlotKind::Kdeplot => distribution::kdeplot(fig, data, layer),
    }
}

/// Column named by a layer's `hue` style argument, if any.
pub fn hue_column(layer: &PlotLayer) -> Option<&str> {
    layer.style.get("hue").and_then(|v| v.as_str())
}
