// Settings module
// Tunable layout metrics and timing, persisted as TOML

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::utils::date::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// IANA timezone name used for all day arithmetic
    pub timezone: String,
    /// Days addressable either side of the reference date
    pub window_days: i64,
    /// Extra day columns laid out beyond each viewport edge
    pub buffer_days: i64,

    pub hour_height: f32,
    pub grid_top_inset: f32,
    pub timed_vertical_inset: f32,
    pub timed_min_height: f32,
    pub timed_horizontal_inset: f32,
    /// Extra width granted to overlapping cards, as a fraction of their column
    pub overlap_fraction: f32,
    /// Below this column width the overlap fraction shrinks proportionally
    pub min_readable_column_width: f32,

    pub all_day_row_height: f32,
    pub all_day_inset: f32,
    pub all_day_padding: f32,

    pub scroll_debounce_ms: u64,
    pub scroll_step_delay_ms: u64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            window_days: DEFAULT_WINDOW_DAYS,
            buffer_days: 1,
            hour_height: 60.0,
            grid_top_inset: 8.0,
            timed_vertical_inset: 2.0,
            timed_min_height: 18.0,
            timed_horizontal_inset: 4.0,
            overlap_fraction: 0.2,
            min_readable_column_width: 44.0,
            all_day_row_height: 22.0,
            all_day_inset: 4.0,
            all_day_padding: 6.0,
            scroll_debounce_ms: 200,
            scroll_step_delay_ms: 350,
        }
    }
}

impl LayoutSettings {
    /// Parsed timezone, if the configured name is a known IANA zone.
    pub fn tz(&self) -> Option<Tz> {
        self.timezone.parse().ok()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.tz().is_none() {
            return Err(format!("Unknown timezone '{}'", self.timezone));
        }
        if self.window_days < 1 {
            return Err("Day window must be at least one day".to_string());
        }
        if self.window_days > MAX_WINDOW_DAYS {
            return Err(format!("Day window cannot exceed {} days", MAX_WINDOW_DAYS));
        }
        if self.buffer_days < 0 {
            return Err("Buffer days cannot be negative".to_string());
        }

        let positive = [
            ("hour_height", self.hour_height),
            ("timed_min_height", self.timed_min_height),
            ("min_readable_column_width", self.min_readable_column_width),
            ("all_day_row_height", self.all_day_row_height),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be positive", name));
            }
        }

        let non_negative = [
            ("grid_top_inset", self.grid_top_inset),
            ("timed_vertical_inset", self.timed_vertical_inset),
            ("timed_horizontal_inset", self.timed_horizontal_inset),
            ("all_day_inset", self.all_day_inset),
            ("all_day_padding", self.all_day_padding),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(format!("{} cannot be negative", name));
            }
        }

        if !(0.0..1.0).contains(&self.overlap_fraction) {
            return Err("overlap_fraction must be in [0, 1)".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = LayoutSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.window_days, 365);
        assert_eq!(settings.scroll_debounce_ms, 200);
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let settings = LayoutSettings {
            timezone: "Mars/Olympus_Mons".into(),
            ..LayoutSettings::default()
        };
        assert!(settings.validate().unwrap_err().contains("timezone"));
    }

    #[test]
    fn test_window_days_bounds() {
        let huge = LayoutSettings {
            window_days: 200_000_000,
            ..LayoutSettings::default()
        };
        assert!(huge.validate().unwrap_err().contains("exceed"));

        let widest = LayoutSettings {
            window_days: MAX_WINDOW_DAYS,
            ..LayoutSettings::default()
        };
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn test_overlap_fraction_range() {
        let settings = LayoutSettings {
            overlap_fraction: 1.0,
            ..LayoutSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: LayoutSettings = toml::from_str("hour_height = 48.0\ntimezone = \"Europe/Paris\"").unwrap();
        assert_eq!(settings.hour_height, 48.0);
        assert_eq!(settings.all_day_row_height, 22.0);
        assert!(settings.tz().is_some());
    }
}
