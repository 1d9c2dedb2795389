//! Numeric mappings for the "time ago" scrubber: a piecewise-linear
//! conversion between a 0-100 percent handle position and a set of
//! named offset presets, plus a relative-time formatter. Percent 100
//! is "Now" (offset 0); percent 0 is the largest preset. Pure
//! functions; inputs are clamped to the modeled range.

const SECOND_MS: f64 = 1_000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;
const WEEK_MS: f64 = 7.0 * DAY_MS;
const MONTH_MS: f64 = 30.0 * DAY_MS;
const YEAR_MS: f64 = 365.0 * DAY_MS;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimePreset {
    pub label: &'static str,
    pub offset_ms: f64,
}

/// Scrubber stops, ascending by offset. Evenly spaced along the
/// percent axis; offsets interpolate linearly between neighbors.
pub const PRESETS: &[TimePreset] = &[
    TimePreset { label: "Now", offset_ms: 0.0 },
    TimePreset { label: "1h", offset_ms: HOUR_MS },
    TimePreset { label: "3h", offset_ms: 3.0 * HOUR_MS },
    TimePreset { label: "12h", offset_ms: 12.0 * HOUR_MS },
    TimePreset { label: "1d", offset_ms: DAY_MS },
    TimePreset { label: "3d", offset_ms: 3.0 * DAY_MS },
    TimePreset { label: "1w", offset_ms: WEEK_MS },
    TimePreset { label: "1mo", offset_ms: MONTH_MS },
    TimePreset { label: "3mo", offset_ms: 3.0 * MONTH_MS },
    TimePreset { label: "1y", offset_ms: YEAR_MS },
];

pub fn max_offset_ms() -> f64 {
    PRESETS[PRESETS.len() - 1].offset_ms
}

/// Scrubber position -> "time ago" offset in milliseconds.
pub fn percent_to_offset(percent: f64) -> f64 {
    let percent = percent.clamp(0.0, 100.0);
    let segments = (PRESETS.len() - 1) as f64;

    // Distance from the "Now" end, in preset segments.
    let u = (100.0 - percent) / 100.0 * segments;
    let index = (u.floor() as usize).min(PRESETS.len() - 2);
    let frac = u - index as f64;

    let lo = PRESETS[index].offset_ms;
    let hi = PRESETS[index + 1].offset_ms;
    lo + (hi - lo) * frac
}

/// Inverse of `percent_to_offset`.
pub fn offset_to_percent(offset_ms: f64) -> f64 {
    let offset_ms = offset_ms.clamp(0.0, max_offset_ms());
    let segments = (PRESETS.len() - 1) as f64;

    let index = PRESETS
        .windows(2)
        .position(|pair| offset_ms <= pair[1].offset_ms)
        .unwrap_or(PRESETS.len() - 2);

    let lo = PRESETS[index].offset_ms;
    let hi = PRESETS[index + 1].offset_ms;
    let ratio = if hi > lo { (offset_ms - lo) / (hi - lo) } else { 0.0 };

    100.0 - (index as f64 + ratio) / segments * 100.0
}

/// Human-readable relative time: `"<n>s/m/h/d ago"`. One decimal
/// place below 10 units, rounded above; offset 0 is "Now".
pub fn format_relative(offset_ms: f64) -> String {
    let offset_ms = offset_ms.max(0.0);
    if offset_ms < SECOND_MS {
        return "Now".to_string();
    }

    let (value, unit) = if offset_ms < MINUTE_MS {
        (offset_ms / SECOND_MS, "s")
    } else if offset_ms < HOUR_MS {
        (offset_ms / MINUTE_MS, "m")
    } else if offset_ms < DAY_MS {
        (offset_ms / HOUR_MS, "h")
    } else {
        (offset_ms / DAY_MS, "d")
    };

    if value < 10.0 {
        format!("{value:.1}{unit} ago")
    } else {
        format!("{}{unit} ago", value.round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Scenario D.
    #[test]
    fn endpoints_map_to_now_and_largest_preset() {
        let now = percent_to_offset(100.0);
        assert_eq!(now, 0.0);
        assert_eq!(format_relative(now), "Now");

        assert_eq!(percent_to_offset(0.0), YEAR_MS);
    }

    #[test]
    fn presets_sit_on_even_percent_stops() {
        let step = 100.0 / (PRESETS.len() - 1) as f64;
        for (index, preset) in PRESETS.iter().enumerate() {
            let percent = 100.0 - index as f64 * step;
            assert!(
                (percent_to_offset(percent) - preset.offset_ms).abs() < 1.0,
                "preset {} should sit at percent {percent}",
                preset.label
            );
        }
    }

    #[test]
    fn interpolates_between_bracketing_presets() {
        let step = 100.0 / (PRESETS.len() - 1) as f64;
        // Halfway between "Now" and "1h".
        let offset = percent_to_offset(100.0 - step * 0.5);
        assert!((offset - HOUR_MS * 0.5).abs() < 1.0);
    }

    #[test]
    fn percent_offset_roundtrip() {
        for percent in [0.0, 7.0, 25.0, 33.3, 50.0, 66.6, 88.0, 100.0] {
            let offset = percent_to_offset(percent);
            let back = offset_to_percent(offset);
            assert!(
                (back - percent).abs() < 1e-6,
                "percent {percent} -> offset {offset} -> percent {back}"
            );
        }
    }

    #[test]
    fn inputs_are_clamped() {
        assert_eq!(percent_to_offset(150.0), 0.0);
        assert_eq!(percent_to_offset(-20.0), YEAR_MS);
        assert_eq!(offset_to_percent(-5.0), 100.0);
        assert_eq!(offset_to_percent(YEAR_MS * 10.0), 0.0);
    }

    #[test]
    fn format_relative_units_and_precision() {
        assert_eq!(format_relative(0.0), "Now");
        assert_eq!(format_relative(500.0), "Now");
        assert_eq!(format_relative(1_500.0), "1.5s ago");
        assert_eq!(format_relative(42.0 * SECOND_MS), "42s ago");
        assert_eq!(format_relative(2.5 * MINUTE_MS), "2.5m ago");
        assert_eq!(format_relative(30.0 * MINUTE_MS), "30m ago");
        assert_eq!(format_relative(3.5 * HOUR_MS), "3.5h ago");
        assert_eq!(format_relative(13.0 * HOUR_MS), "13h ago");
        assert_eq!(format_relative(2.0 * DAY_MS), "2.0d ago");
        assert_eq!(format_relative(45.0 * DAY_MS), "45d ago");
    }
}
