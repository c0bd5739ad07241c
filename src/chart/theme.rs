use crate::{
    chart::color::{Palette, Rgb},
    config::args::{Bag, HookArgs, HookList},
    foundation::error::{DatagifError, DatagifResult},
};

/// Axes decoration preset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxesStyle {
    /// Gray axes background with a white grid.
    #[default]
    DarkGrid,
    /// White background with a light gray grid.
    WhiteGrid,
    /// Gray background, no grid.
    Dark,
    /// White background, no grid.
    White,
    /// White background with outward tick marks.
    Ticks,
}

impl AxesStyle {
    /// Names accepted by `set_style`.
    pub const NAMES: [&'static str; 5] = ["darkgrid", "whitegrid", "dark", "white", "ticks"];

    /// Parse a style name.
    pub fn parse(name: &str) -> DatagifResult<Self> {
        match name {
            "darkgrid" => Ok(Self::DarkGrid),
            "whitegrid" => Ok(Self::WhiteGrid),
            "dark" => Ok(Self::Dark),
            "white" => Ok(Self::White),
            "ticks" => Ok(Self::Ticks),
            other => Err(DatagifError::configuration(format!(
                "unknown style '{other}', must be one of {}",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// Scaling preset for fonts and line widths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlotContext {
    /// 0.8×.
    Paper,
    /// 1×.
    #[default]
    Notebook,
    /// 1.5×.
    Talk,
    /// 2×.
    Poster,
}

impl PlotContext {
    /// Parse a context name.
    pub fn parse(name: &str) -> DatagifResult<Self> {
        match name {
            "paper" => Ok(Self::Paper),
            "notebook" => Ok(Self::Notebook),
            "talk" => Ok(Self::Talk),
            "poster" => Ok(Self::Poster),
            other => Err(DatagifError::configuration(format!(
                "unknown context '{other}', must be one of paper, notebook, talk, poster"
            ))),
        }
    }

    /// Multiplier applied to fonts and line widths.
    pub fn scale(self) -> f64 {
        match self {
            Self::Paper => 0.8,
            Self::Notebook => 1.0,
            Self::Talk => 1.5,
            Self::Poster => 2.0,
        }
    }
}

/// Resolved visual style, threaded into every figure of one animation.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    /// Axes decoration.
    pub style: AxesStyle,
    /// Color cycle for layers without an explicit color.
    pub palette: Palette,
    /// Font and line scaling preset.
    pub context: PlotContext,
    /// Extra font multiplier.
    pub font_scale: f64,
    /// Font family used for all text.
    pub font_family: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            style: AxesStyle::default(),
            palette: Palette::default(),
            context: PlotContext::default(),
            font_scale: 1.0,
            font_family: "sans-serif".to_string(),
        }
    }
}

impl Theme {
    /// Resolve a theme by applying style-setup hooks, in order, to the default theme.
    pub fn from_hooks(hooks: &HookList) -> DatagifResult<Self> {
        let mut theme = Self::default();
        for hook in hooks.iter() {
            theme.apply(&hook.name, &hook.args)?;
        }
        Ok(theme)
    }

    fn apply(&mut self, name: &str, args: &HookArgs) -> DatagifResult<()> {
        match (name, args) {
            ("set_theme", HookArgs::NoArgs) => *self = Self::default(),
            ("set_theme", HookArgs::Positional(v)) => {
                *self = Self::default();
                self.context = PlotContext::parse(hook_str(name, v)?)?;
            }
            ("set_theme", HookArgs::Named(bag)) => {
                *self = Self::default();
                self.apply_named(name, bag, &["style", "palette", "context", "font_scale", "font"])?;
            }
            ("set_style", HookArgs::Positional(v)) => self.style = AxesStyle::parse(hook_str(name, v)?)?,
            ("set_style", HookArgs::Named(bag)) => self.apply_named(name, bag, &["style"])?,
            ("set_style", HookArgs::NoArgs) => self.style = AxesStyle::default(),
            ("set_palette", HookArgs::Positional(v)) => self.palette = palette(hook_str(name, v)?)?,
            ("set_palette", HookArgs::Named(bag)) => self.apply_named(name, bag, &["palette"])?,
            ("set_context", HookArgs::Positional(v)) => {
                self.context = PlotContext::parse(hook_str(name, v)?)?
            }
            ("set_context", HookArgs::Named(bag)) => {
                self.apply_named(name, bag, &["context", "font_scale"])?
            }
            ("set_theme" | "set_style" | "set_palette" | "set_context", _) => {
                return Err(DatagifError::configuration(format!(
                    "style hook '{name}' requires arguments"
                )));
            }
            _ => {
                return Err(DatagifError::configuration(format!(
                    "unknown style hook '{name}', must be one of set_theme, set_style, set_palette, set_context"
                )));
            }
        }
        Ok(())
    }

    fn apply_named(&mut self, hook: &str, bag: &Bag, allowed: &[&str]) -> DatagifResult<()> {
        for (key, v) in bag {
            if !allowed.contains(&key.as_str()) {
                return Err(DatagifError::configuration(format!(
                    "{hook}() got an unexpected keyword argument '{key}'"
                )));
            }
            match key.as_str() {
                "style" => self.style = AxesStyle::parse(hook_str(hook, v)?)?,
                "palette" => self.palette = palette(hook_str(hook, v)?)?,
                "context" => self.context = PlotContext::parse(hook_str(hook, v)?)?,
                "font" => self.font_family = hook_str(hook, v)?.to_string(),
                "font_scale" => {
                    self.font_scale = v.as_f64().filter(|s| s.is_finite() && *s > 0.0).ok_or_else(|| {
                        DatagifError::configuration(format!(
                            "{hook}(): 'font_scale' must be a positive number"
                        ))
                    })?
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Combined font multiplier.
    pub fn text_scale(&self) -> f64 {
        self.context.scale() * self.font_scale
    }

    /// Axes background color.
    pub fn axes_facecolor(&self) -> Rgb {
        match self.style {
            AxesStyle::DarkGrid | AxesStyle::Dark => Rgb::from_u8(0xEA, 0xEA, 0xF2),
            _ => Rgb::gray(1.0),
        }
    }

    /// Whether the grid is drawn unless a hook says otherwise.
    pub fn grid_by_default(&self) -> bool {
        matches!(self.style, AxesStyle::DarkGrid | AxesStyle::WhiteGrid)
    }

    /// Grid line color.
    pub fn grid_color(&self) -> Rgb {
        match self.style {
            AxesStyle::DarkGrid | AxesStyle::Dark => Rgb::gray(1.0),
            _ => Rgb::gray(0.8),
        }
    }

    /// Axes frame color, or `None` when the frame is hidden.
    pub fn spine_color(&self) -> Option<Rgb> {
        match self.style {
            AxesStyle::DarkGrid | AxesStyle::Dark => None,
            AxesStyle::WhiteGrid => Some(Rgb::gray(0.8)),
            AxesStyle::White | AxesStyle::Ticks => Some(Rgb::gray(0.15)),
        }
    }

    /// Whether tick marks are drawn next to tick labels.
    pub fn tick_marks(&self) -> bool {
        self.style == AxesStyle::Ticks
    }

    /// Text and tick color.
    pub fn text_color(&self) -> Rgb {
        Rgb::gray(0.15)
    }
}

fn hook_str<'a>(hook: &str, v: &'a serde_json::Value) -> DatagifResult<&'a str> {
    v.as_str()
        .ok_or_else(|| DatagifError::configuration(format!("{hook}(): expected a string, got {v}")))
}

fn palette(name: &str) -> DatagifResult<Palette> {
    Palette::named(name).ok_or_else(|| {
        DatagifError::configuration(format!(
            "unknown palette '{name}', must be one of {}",
            Palette::NAMES.join(", ")
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/chart/theme.rs"]
mod tests;
