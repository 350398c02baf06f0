//! Mirror width/height in millimeters.
//!
//! Two write paths exist. The slider path clamps and commits immediately. The
//! manual path buffers raw text in a [`ManualEntry`] and only touches the
//! committed value on [`ManualEntry::commit`], where sub-minimum or unparsable
//! text is rejected and over-maximum values are clamped down.

use crate::constants::{DEFAULT_HEIGHT_MM, DEFAULT_WIDTH_MM, MAX_MM, MIN_MM, MM_TO_M};
use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Width, Axis::Height];
}

/// Clamp an arbitrary number into `[MIN_MM, MAX_MM]`, rounded to whole mm.
///
/// Returns `None` for NaN and infinities so callers can keep their previous value.
#[inline]
pub fn clamp_mm(value: f64) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    Some(value.round().clamp(MIN_MM as f64, MAX_MM as f64) as u32)
}

/// Normalized slider position in `[0, 1]` for a committed dimension.
#[inline]
pub fn slider_progress(mm: u32) -> f32 {
    let mm = mm.clamp(MIN_MM, MAX_MM);
    (mm - MIN_MM) as f32 / (MAX_MM - MIN_MM) as f32
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    width_mm: u32,
    height_mm: u32,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width_mm: DEFAULT_WIDTH_MM,
            height_mm: DEFAULT_HEIGHT_MM,
        }
    }
}

impl Dimensions {
    pub fn new(width_mm: u32, height_mm: u32) -> Self {
        Self {
            width_mm: width_mm.clamp(MIN_MM, MAX_MM),
            height_mm: height_mm.clamp(MIN_MM, MAX_MM),
        }
    }

    pub fn width_mm(&self) -> u32 {
        self.width_mm
    }

    pub fn height_mm(&self) -> u32 {
        self.height_mm
    }

    pub fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Width => self.width_mm,
            Axis::Height => self.height_mm,
        }
    }

    /// Clamp and store. Non-finite input leaves the value untouched and returns `false`.
    pub fn set(&mut self, axis: Axis, mm: f64) -> bool {
        let Some(v) = clamp_mm(mm) else {
            return false;
        };
        match axis {
            Axis::Width => self.width_mm = v,
            Axis::Height => self.height_mm = v,
        }
        true
    }

    pub fn set_width(&mut self, mm: f64) -> bool {
        self.set(Axis::Width, mm)
    }

    pub fn set_height(&mut self, mm: f64) -> bool {
        self.set(Axis::Height, mm)
    }

    /// Width in scene units (meters).
    pub fn width_m(&self) -> f32 {
        self.width_mm as f32 * MM_TO_M
    }

    /// Height in scene units (meters).
    pub fn height_m(&self) -> f32 {
        self.height_mm as f32 * MM_TO_M
    }

    pub fn area_m2(&self) -> f64 {
        (self.width_mm as f64 * self.height_mm as f64) / 1_000_000.0
    }

    pub fn progress(&self, axis: Axis) -> f32 {
        slider_progress(self.get(axis))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Slider,
    Manual,
}

/// Result of committing a manual entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    Committed(u32),
    /// Above maximum, stored as the maximum.
    ClampedHigh(u32),
    /// Rejected; the committed value and the buffer were restored.
    Reverted { restored: u32, reason: ConfigError },
}

/// Parse manual-entry text as millimeters.
///
/// Accepts surrounding whitespace, an optional `mm` suffix and a decimal comma.
/// Numbers too large for `f64` come back as infinities so the caller can clamp
/// or reject them by sign; spelled-out `inf`/`nan` are not numbers.
pub fn parse_mm(text: &str) -> Result<f64, ConfigError> {
    let not_a_number = || ConfigError::NotANumber {
        input: text.to_string(),
    };
    let trimmed = text.trim();
    let number = trimmed
        .strip_suffix("mm")
        .map(str::trim_end)
        .unwrap_or(trimmed)
        .replace(',', ".");
    if number
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return Err(not_a_number());
    }
    match number.parse::<f64>() {
        Ok(v) if !v.is_nan() => Ok(v),
        _ => Err(not_a_number()),
    }
}

/// Text buffer behind a manual numeric input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManualEntry {
    mode: InputMode,
    buffer: String,
}

impl ManualEntry {
    pub fn new(committed_mm: u32) -> Self {
        Self {
            mode: InputMode::Slider,
            buffer: committed_mm.to_string(),
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Switching modes always re-syncs the buffer to the committed value.
    pub fn set_mode(&mut self, mode: InputMode, committed_mm: u32) {
        self.mode = mode;
        self.sync(committed_mm);
    }

    pub fn sync(&mut self, committed_mm: u32) {
        self.buffer = committed_mm.to_string();
    }

    /// Store raw keystrokes; no validation until commit.
    pub fn edit(&mut self, text: &str) {
        self.buffer.clear();
        self.buffer.push_str(text);
    }

    pub fn commit(&mut self, dims: &mut Dimensions, axis: Axis) -> EntryOutcome {
        let previous = dims.get(axis);
        let outcome = match parse_mm(&self.buffer) {
            Err(reason) => EntryOutcome::Reverted {
                restored: previous,
                reason,
            },
            Ok(v) if v.round() < MIN_MM as f64 => EntryOutcome::Reverted {
                restored: previous,
                reason: ConfigError::BelowMinimum {
                    value: v.round() as i64,
                    min: MIN_MM,
                },
            },
            Ok(v) if v.round() > MAX_MM as f64 => {
                dims.set(axis, MAX_MM as f64);
                EntryOutcome::ClampedHigh(MAX_MM)
            }
            Ok(v) => {
                dims.set(axis, v);
                EntryOutcome::Committed(dims.get(axis))
            }
        };
        self.sync(dims.get(axis));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_hits_both_ends() {
        assert_eq!(slider_progress(MIN_MM), 0.0);
        assert_eq!(slider_progress(MAX_MM), 1.0);
        assert!((slider_progress(1600) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn set_rejects_non_finite() {
        let mut d = Dimensions::default();
        assert!(!d.set_width(f64::NAN));
        assert!(!d.set_height(f64::INFINITY));
        assert_eq!(d, Dimensions::default());
    }

    #[test]
    fn set_clamps_both_sides() {
        let mut d = Dimensions::default();
        d.set_width(10.0);
        d.set_height(1.0e9);
        assert_eq!(d.width_mm(), MIN_MM);
        assert_eq!(d.height_mm(), MAX_MM);
    }

    #[test]
    fn parse_accepts_common_spellings() {
        assert_eq!(parse_mm(" 1200 ").unwrap(), 1200.0);
        assert_eq!(parse_mm("1200mm").unwrap(), 1200.0);
        assert_eq!(parse_mm("1200 mm").unwrap(), 1200.0);
        assert_eq!(parse_mm("1200,5").unwrap(), 1200.5);
        assert!(parse_mm("").is_err());
        assert!(parse_mm("12a").is_err());
        assert!(parse_mm("inf").is_err());
        assert!(parse_mm("NaN").is_err());
    }

    #[test]
    fn overflowing_entry_clamps_high_and_negative_overflow_reverts() {
        assert_eq!(parse_mm("1e400").unwrap(), f64::INFINITY);

        let mut d = Dimensions::default();
        let mut e = ManualEntry::new(d.height_mm());
        e.edit("1e400");
        assert_eq!(e.commit(&mut d, Axis::Height), EntryOutcome::ClampedHigh(MAX_MM));
        assert_eq!(d.height_mm(), MAX_MM);
        assert_eq!(e.text(), "2800");

        e.edit("-1e400");
        assert!(matches!(
            e.commit(&mut d, Axis::Height),
            EntryOutcome::Reverted {
                restored: MAX_MM,
                reason: ConfigError::BelowMinimum { .. }
            }
        ));
        assert_eq!(d.height_mm(), MAX_MM);
    }

    #[test]
    fn commit_below_minimum_reverts() {
        let mut d = Dimensions::default();
        let mut e = ManualEntry::new(d.width_mm());
        e.edit("120");
        let out = e.commit(&mut d, Axis::Width);
        assert_eq!(
            out,
            EntryOutcome::Reverted {
                restored: 900,
                reason: ConfigError::BelowMinimum { value: 120, min: MIN_MM },
            }
        );
        assert_eq!(e.text(), "900");
        assert_eq!(d.width_mm(), 900);
    }

    #[test]
    fn mode_switch_resyncs_buffer() {
        let mut d = Dimensions::default();
        let mut e = ManualEntry::new(d.height_mm());
        e.edit("77");
        d.set_height(2000.0);
        e.set_mode(InputMode::Manual, d.height_mm());
        assert_eq!(e.mode(), InputMode::Manual);
        assert_eq!(e.text(), "2000");
    }
}
