use crate::foundation::error::{DatagifError, DatagifResult};

/// Opaque sRGB color with channels in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
}

impl Rgb {
    /// Color from 0–255 channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        }
    }

    /// Gray level `v` (0 black, 1 white).
    pub fn gray(v: f64) -> Self {
        let v = v.clamp(0.0, 1.0);
        Self { r: v, g: v, b: v }
    }

    /// Parse `#rgb` or `#rrggbb`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()?;
        match digits.as_slice() {
            [r, g, b] => Some(Self::from_u8(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Some(Self::from_u8(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
            _ => None,
        }
    }

    /// 0–255 channels.
    pub fn to_u8(self) -> (u8, u8, u8) {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (c(self.r), c(self.g), c(self.b))
    }

    /// Linear blend towards `other`; `t = 0` is `self`.
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

const DEEP: [&str; 10] = [
    "#4C72B0", "#DD8452", "#55A868", "#C44E52", "#8172B3", "#937860", "#DA8BC3", "#8C8C8C",
    "#CCB974", "#64B5CD",
];
const MUTED: [&str; 10] = [
    "#4878D0", "#EE854A", "#6ACC64", "#D65F5F", "#956CB4", "#8C613C", "#DC7EC0", "#797979",
    "#D5BB67", "#82C6E2",
];
const BRIGHT: [&str; 10] = [
    "#023EFF", "#FF7C00", "#1AC938", "#E8000B", "#8B2BE2", "#9F4800", "#F14CC1", "#A3A3A3",
    "#FFC400", "#00D7FF",
];
const PASTEL: [&str; 10] = [
    "#A1C9F4", "#FFB482", "#8DE5A1", "#FF9F9B", "#D0BBFF", "#DEBB9B", "#FAB0E4", "#CFCFCF",
    "#FFFEA3", "#B9F2F0",
];
const DARK: [&str; 10] = [
    "#001C7F", "#B1400D", "#12711C", "#8C0800", "#591E71", "#592F0D", "#A23582", "#3C3C3C",
    "#B8850A", "#006374",
];
const COLORBLIND: [&str; 10] = [
    "#0173B2", "#DE8F05", "#029E73", "#D55E00", "#CC78BC", "#CA9161", "#FBAFE4", "#949494",
    "#ECE133", "#56B4E9",
];

/// Named qualitative palette; layers without an explicit color cycle through it.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    name: String,
    colors: Vec<Rgb>,
}

impl Palette {
    /// Names accepted by [`Palette::named`].
    pub const NAMES: [&'static str; 6] = ["deep", "muted", "bright", "pastel", "dark", "colorblind"];

    /// Look up a palette by name.
    pub fn named(name: &str) -> Option<Self> {
        let hexes = match name {
            "deep" => DEEP,
            "muted" => MUTED,
            "bright" => BRIGHT,
            "pastel" => PASTEL,
            "dark" => DARK,
            "colorblind" => COLORBLIND,
            _ => return None,
        };
        Some(Self {
            name: name.to_string(),
            colors: hexes.iter().filter_map(|h| Rgb::from_hex(h)).collect(),
        })
    }

    /// Palette name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `idx`-th color, wrapping around.
    pub fn color(&self, idx: usize) -> Rgb {
        if self.colors.is_empty() {
            return Rgb::gray(0.0);
        }
        self.colors[idx % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            name: "deep".to_string(),
            colors: DEEP.iter().filter_map(|h| Rgb::from_hex(h)).collect(),
        }
    }
}

fn named_color(name: &str) -> Option<Rgb> {
    let hex = match name {
        "b" => "#4C72B0",
        "g" => "#55A868",
        "r" => "#C44E52",
        "m" => "#8172B2",
        "y" => "#CCB974",
        "c" => "#64B5CD",
        "k" | "black" => "#000000",
        "w" | "white" => "#FFFFFF",
        "red" => "#FF0000",
        "green" => "#008000",
        "blue" => "#0000FF",
        "orange" => "#FFA500",
        "purple" => "#800080",
        "gray" | "grey" => "#808080",
        "lightgray" | "lightgrey" => "#D3D3D3",
        "darkgray" | "darkgrey" => "#A9A9A9",
        "yellow" => "#FFFF00",
        "cyan" => "#00FFFF",
        "magenta" => "#FF00FF",
        "brown" => "#A52A2A",
        "pink" => "#FFC0CB",
        "navy" => "#000080",
        "teal" => "#008080",
        "olive" => "#808000",
        "lime" => "#00FF00",
        "maroon" => "#800000",
        "gold" => "#FFD700",
        "silver" => "#C0C0C0",
        "steelblue" => "#4682B4",
        "darkblue" => "#00008B",
        "darkred" => "#8B0000",
        "darkgreen" => "#006400",
        "tab:blue" => "#1F77B4",
        "tab:orange" => "#FF7F0E",
        "tab:green" => "#2CA02C",
        "tab:red" => "#D62728",
        "tab:purple" => "#9467BD",
        "tab:brown" => "#8C564B",
        "tab:pink" => "#E377C2",
        "tab:gray" | "tab:grey" => "#7F7F7F",
        "tab:olive" => "#BCBD22",
        "tab:cyan" => "#17BECF",
        _ => return None,
    };
    Rgb::from_hex(hex)
}

/// Parse a color given as a style argument.
///
/// Accepts named colors, `C0`–`C9` (resolved against `palette`), `#rgb`/`#rrggbb`, gray
/// strings such as `"0.8"`, and `[r, g, b]` float triples.
pub fn parse_color(v: &serde_json::Value, palette: &Palette) -> DatagifResult<Rgb> {
    let bad = || DatagifError::render(format!("invalid color value {v}"));
    match v {
        serde_json::Value::String(s) => {
            let s = s.trim();
            if s.starts_with('#') {
                return Rgb::from_hex(s).ok_or_else(bad);
            }
            if let Some(idx) = s.strip_prefix('C').and_then(|d| d.parse::<usize>().ok()) {
                return Ok(palette.color(idx));
            }
            if let Ok(level) = s.parse::<f64>() {
                return if (0.0..=1.0).contains(&level) {
                    Ok(Rgb::gray(level))
                } else {
                    Err(bad())
                };
            }
            named_color(&s.to_ascii_lowercase()).ok_or_else(bad)
        }
        serde_json::Value::Array(items) if items.len() == 3 || items.len() == 4 => {
            let ch: Vec<f64> = items
                .iter()
                .map(|c| c.as_f64().filter(|c| (0.0..=1.0).contains(c)))
                .collect::<Option<_>>()
                .ok_or_else(bad)?;
            Ok(Rgb {
                r: ch[0],
                g: ch[1],
                b: ch[2],
            })
        }
        _ => Err(bad()),
    }
}

/// Continuous color map sampled over `0.0..=1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    stops: Vec<Rgb>,
}

impl Colormap {
    /// Names accepted by [`Colormap::named`] (each also with a `_r` suffix).
    pub const NAMES: [&'static str; 8] =
        ["viridis", "magma", "mako", "rocket", "crest", "flare", "Blues", "Greys"];

    /// Look up a colormap; a `_r` suffix reverses it.
    pub fn named(name: &str) -> DatagifResult<Self> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (name, false),
        };
        let hexes: &[&str] = match base {
            "viridis" => &[
                "#440154", "#482878", "#3E4989", "#31688E", "#26828E", "#1F9E89", "#35B779",
                "#6DCD59", "#B4DE2C", "#FDE725",
            ],
            "magma" => &[
                "#000004", "#180F3D", "#440F76", "#721F81", "#9E2F7F", "#CD4071", "#F1605D",
                "#FD9668", "#FECA8D", "#FCFDBF",
            ],
            "mako" => &[
                "#0B0405", "#2E1E3C", "#413D7B", "#37659E", "#348FA7", "#40B7AD", "#8AD9B1",
                "#DEF5E5",
            ],
            "rocket" => &["#03051A", "#4C1D4B", "#A11A5B", "#E83F3F", "#F69C73", "#FAEBDD"],
            "crest" => &[
                "#A5CD90", "#6DB592", "#4A9C93", "#2C8591", "#216B8C", "#2C5183", "#2C3172",
            ],
            "flare" => &[
                "#EDB081", "#E98D6B", "#E3685C", "#D14A61", "#B13C6C", "#8F3371", "#6C2B6D",
            ],
            "Blues" => &[
                "#F7FBFF", "#DEEBF7", "#C6DBEF", "#9ECAE1", "#6BAED6", "#4292C6", "#2171B5",
                "#08519C", "#08306B",
            ],
            "Greys" => &[
                "#FFFFFF", "#F0F0F0", "#D9D9D9", "#BDBDBD", "#969696", "#737373", "#525252",
                "#252525", "#000000",
            ],
            _ => {
                return Err(DatagifError::render(format!(
                    "unknown colormap '{name}', must be one of {} (optionally with '_r')",
                    Self::NAMES.join(", ")
                )));
            }
        };
        let mut stops: Vec<Rgb> = hexes.iter().filter_map(|h| Rgb::from_hex(h)).collect();
        if reversed {
            stops.reverse();
        }
        Ok(Self { stops })
    }

    /// Map running from near-white to `color`.
    pub fn light(color: Rgb) -> Self {
        Self {
            stops: vec![Rgb::gray(0.95).mix(color, 0.05), color],
        }
    }

    /// Color at `t`, clamped to `0.0..=1.0`.
    pub fn sample(&self, t: f64) -> Rgb {
        match self.stops.as_slice() {
            [] => Rgb::gray(0.0),
            [only] => *only,
            stops => {
                let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
                if t >= 1.0 {
                    return stops[stops.len() - 1];
                }
                let pos = t * (stops.len() - 1) as f64;
                let lo = (pos.floor() as usize).min(stops.len() - 2);
                stops[lo].mix(stops[lo + 1], pos - lo as f64)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/color.rs"]
mod tests;
