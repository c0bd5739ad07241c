use serde_json::json;

use crate::config::args::Bag;
use crate::foundation::error::{DatagifError, DatagifResult};

/// Frame duration used when the caller gives neither `duration` nor `fps`, in seconds.
pub const DEFAULT_FRAME_DURATION_S: f64 = 0.5;
/// Writer mode used when the caller gives none: incremental multi-image.
pub const DEFAULT_MODE: &str = "I";
/// Palette quantization speed used when the caller gives none.
pub const DEFAULT_SPEED: i32 = 10;

const KNOWN_OPTIONS: [&str; 5] = ["duration", "fps", "mode", "loop", "speed"];

/// Fill in missing encoder options with the built-in defaults.
///
/// Caller values always win. `duration` is only defaulted when `fps` is absent too.
pub fn with_encoder_defaults(mut options: Bag) -> Bag {
    if !options.contains_key("duration") && !options.contains_key("fps") {
        options.insert("duration".to_string(), json!(DEFAULT_FRAME_DURATION_S));
    }
    options
        .entry("mode".to_string())
        .or_insert_with(|| json!(DEFAULT_MODE));
    options
}

/// How frames are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncoderMode {
    /// `"I"`: append every frame to one looping animation.
    Animated,
    /// `"i"`: a single still image; exactly one frame is accepted.
    Single,
}

/// Display time of each frame.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameDuration {
    /// Same duration for every frame, in seconds.
    Uniform(f64),
    /// One duration per frame, in seconds.
    PerFrame(Vec<f64>),
}

/// Parsed encoder configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct EncoderSettings {
    /// Frame display time.
    pub duration: FrameDuration,
    /// Writer mode.
    pub mode: EncoderMode,
    /// Loop count; `0` loops forever.
    pub loop_count: u16,
    /// Palette quantization speed, 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            duration: FrameDuration::Uniform(DEFAULT_FRAME_DURATION_S),
            mode: EncoderMode::Animated,
            loop_count: 0,
            speed: DEFAULT_SPEED,
        }
    }
}

impl EncoderSettings {
    /// Merge `options` with defaults and parse them.
    ///
    /// Unknown option names and ill-typed values are configuration errors.
    pub fn from_options(options: &Bag) -> DatagifResult<Self> {
        if let Some(unknown) = options.keys().find(|k| !KNOWN_OPTIONS.contains(&k.as_str())) {
            return Err(DatagifError::configuration(format!(
                "unsupported encoder option '{unknown}' (supported: {})",
                KNOWN_OPTIONS.join(", ")
            )));
        }
        if options.contains_key("duration") && options.contains_key("fps") {
            return Err(DatagifError::configuration(
                "encoder options 'duration' and 'fps' are mutually exclusive",
            ));
        }

        let merged = with_encoder_defaults(options.clone());
        let mut out = Self::default();

        if let Some(fps) = merged.get("fps") {
            let fps = fps
                .as_f64()
                .filter(|f| f.is_finite() && *f > 0.0)
                .ok_or_else(|| DatagifError::configuration("encoder 'fps' must be a positive number"))?;
            out.duration = FrameDuration::Uniform(1.0 / fps);
        }
        if let Some(d) = merged.get("duration") {
            out.duration = parse_duration(d)?;
        }
        if let Some(mode) = merged.get("mode") {
            out.mode = match mode.as_str() {
                Some("I") => EncoderMode::Animated,
                Some("i") => EncoderMode::Single,
                _ => {
                    return Err(DatagifError::configuration(format!(
                        "unsupported encoder mode {mode} (expected \"I\" or \"i\")"
                    )));
                }
            };
        }
        if let Some(l) = merged.get("loop") {
            out.loop_count = l
                .as_u64()
                .and_then(|v| u16::try_from(v).ok())
                .ok_or_else(|| DatagifError::configuration("encoder 'loop' must be an integer in 0..=65535"))?;
        }
        if let Some(s) = merged.get("speed") {
            out.speed = s
                .as_i64()
                .filter(|v| (1..=30).contains(v))
                .map(|v| v as i32)
                .ok_or_else(|| DatagifError::configuration("encoder 'speed' must be an integer in 1..=30"))?;
        }
        Ok(out)
    }

    /// Validate the settings against the number of frames to be written.
    pub fn check_frame_count(&self, frames: usize) -> DatagifResult<()> {
        if let FrameDuration::PerFrame(d) = &self.duration
            && d.len() != frames
        {
            return Err(DatagifError::configuration(format!(
                "encoder 'duration' lists {} values for {frames} frames",
                d.len()
            )));
        }
        if self.mode == EncoderMode::Single && frames != 1 {
            return Err(DatagifError::configuration(format!(
                "single-image mode \"i\" accepts exactly one frame, got {frames}"
            )));
        }
        Ok(())
    }

    /// Display time of frame `idx` in seconds.
    pub fn duration_s(&self, idx: usize) -> f64 {
        match &self.duration {
            FrameDuration::Uniform(d) => *d,
            FrameDuration::PerFrame(d) => d.get(idx).copied().unwrap_or(DEFAULT_FRAME_DURATION_S),
        }
    }

    /// Display time of frame `idx` in GIF centiseconds.
    pub fn delay_centis(&self, idx: usize) -> u16 {
        let cs = (self.duration_s(idx) * 100.0).round();
        cs.clamp(0.0, f64::from(u16::MAX)) as u16
    }
}

fn parse_duration(v: &serde_json::Value) -> DatagifResult<FrameDuration> {
    let seconds = |x: &serde_json::Value| {
        x.as_f64()
            .filter(|s| s.is_finite() && *s >= 0.0)
            .ok_or_else(|| {
                DatagifError::configuration(format!(
                    "encoder 'duration' must be non-negative seconds, got {x}"
                ))
            })
    };
    match v {
        serde_json::Value::Array(items) => Ok(FrameDuration::PerFrame(
            items.iter().map(seconds).collect::<DatagifResult<_>>()?,
        )),
        other => seconds(other).map(FrameDuration::Uniform),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/encoder.rs"]
mod tests;
