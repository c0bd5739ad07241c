use std::collections::BTreeSet;

use crate::{
    chart::color::{Colormap, Palette, Rgb, parse_color},
    config::args::StyleArgs,
    foundation::error::{DatagifError, DatagifResult},
};

/// Typed, consumption-tracking view over one layer's style arguments.
///
/// Every getter marks its key as understood; [`StyleReader::finish`] rejects whatever is left,
/// so a plot kind only accepts the keys it actually reads.
pub struct StyleReader<'a> {
    plot: &'static str,
    args: &'a StyleArgs,
    used: BTreeSet<&'a str>,
}

impl<'a> StyleReader<'a> {
    /// Start reading `args` on behalf of `plot`.
    pub fn new(plot: &'static str, args: &'a StyleArgs) -> Self {
        Self {
            plot,
            args,
            used: BTreeSet::new(),
        }
    }

    /// Raw value of the first present key among `keys`; JSON `null` counts as present.
    pub fn raw(&mut self, keys: &[&str]) -> Option<&'a serde_json::Value> {
        let mut found = None;
        for key in keys {
            if let Some((k, v)) = self.args.get_key_value(*key) {
                self.used.insert(k.as_str());
                found = found.or(Some(v));
            }
        }
        found
    }

    /// Raw value, treating JSON `null` as absent.
    fn value(&mut self, keys: &[&str]) -> Option<&'a serde_json::Value> {
        self.raw(keys).filter(|v| !v.is_null())
    }

    fn invalid(&self, key: &str, expected: &str, got: &serde_json::Value) -> DatagifError {
        DatagifError::render(format!(
            "{}(): '{key}' must be {expected}, got {got}",
            self.plot
        ))
    }

    /// Finite number.
    pub fn f64(&mut self, key: &str) -> DatagifResult<Option<f64>> {
        match self.value(&[key]) {
            None => Ok(None),
            Some(v) => v
                .as_f64()
                .filter(|f| f.is_finite())
                .map(Some)
                .ok_or_else(|| self.invalid(key, "a number", v)),
        }
    }

    /// Non-negative number.
    pub fn non_negative(&mut self, key: &str) -> DatagifResult<Option<f64>> {
        match self.f64(key)? {
            Some(f) if f < 0.0 => Err(DatagifError::render(format!(
                "{}(): '{key}' must be non-negative, got {f}",
                self.plot
            ))),
            other => Ok(other),
        }
    }

    /// Number in `0.0..=1.0`.
    pub fn unit(&mut self, key: &str) -> DatagifResult<Option<f64>> {
        match self.f64(key)? {
            Some(f) if !(0.0..=1.0).contains(&f) => Err(DatagifError::render(format!(
                "{}(): '{key}' must be between 0 and 1, got {f}",
                self.plot
            ))),
            other => Ok(other),
        }
    }

    /// Strictly positive integer.
    pub fn count(&mut self, key: &str) -> DatagifResult<Option<usize>> {
        match self.value(&[key]) {
            None => Ok(None),
            Some(v) => v
                .as_u64()
                .filter(|n| *n > 0)
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| self.invalid(key, "a positive integer", v)),
        }
    }

    /// Positive integer no larger than `max`.
    pub fn count_at_most(&mut self, key: &str, max: usize) -> DatagifResult<Option<usize>> {
        match self.count(key)? {
            Some(n) if n > max => Err(DatagifError::render(format!(
                "{}(): '{key}' must be at most {max}, got {n}",
                self.plot
            ))),
            other => Ok(other),
        }
    }

    /// Boolean flag.
    pub fn bool(&mut self, key: &str) -> DatagifResult<Option<bool>> {
        match self.value(&[key]) {
            None => Ok(None),
            Some(v) => v
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.invalid(key, "a boolean", v)),
        }
    }

    /// String value.
    pub fn str(&mut self, key: &str) -> DatagifResult<Option<&'a str>> {
        match self.value(&[key]) {
            None => Ok(None),
            Some(v) => v
                .as_str()
                .map(Some)
                .ok_or_else(|| self.invalid(key, "a string", v)),
        }
    }

    /// Color under any of `keys` (aliases such as `color`/`c`).
    pub fn color(&mut self, keys: &[&str], palette: &Palette) -> DatagifResult<Option<Rgb>> {
        match self.value(keys) {
            None => Ok(None),
            Some(v) => parse_color(v, palette).map(Some),
        }
    }

    /// Number under any of `keys` (aliases such as `linewidth`/`lw`).
    pub fn f64_alias(&mut self, keys: &[&str]) -> DatagifResult<Option<f64>> {
        match self.value(keys) {
            None => Ok(None),
            Some(v) => v
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(Some)
                .ok_or_else(|| self.invalid(keys[0], "a non-negative number", v)),
        }
    }

    /// Named colormap.
    pub fn colormap(&mut self, key: &str) -> DatagifResult<Option<Colormap>> {
        self.str(key)?.map(Colormap::named).transpose()
    }

    /// Reject every key no getter asked for.
    pub fn finish(self) -> DatagifResult<()> {
        match self
            .args
            .keys()
            .find(|k| !self.used.contains(k.as_str()))
        {
            Some(key) => Err(DatagifError::render(format!(
                "{}() got an unexpected keyword argument '{key}'",
                self.plot
            ))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/style.rs"]
mod tests;
