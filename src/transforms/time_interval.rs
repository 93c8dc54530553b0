use std::f64::consts::LN_10;

use serde::{Deserialize, Serialize};
use strum::Display;

use super::bin_step::bin_step;

/// A calendar granularity usable as a DuckDB interval unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum TimeUnit {
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

/// A binning interval: a whole number of time units per bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeInterval {
    pub unit: TimeUnit,
    pub step: f64,
}

const DURATION_SECOND: f64 = 1000.0;
const DURATION_MINUTE: f64 = DURATION_SECOND * 60.0;
const DURATION_HOUR: f64 = DURATION_MINUTE * 60.0;
const DURATION_DAY: f64 = DURATION_HOUR * 24.0;
const DURATION_WEEK: f64 = DURATION_DAY * 7.0;
const DURATION_MONTH: f64 = DURATION_DAY * 30.0;
const DURATION_YEAR: f64 = DURATION_DAY * 365.0;

struct Unit {
    unit: TimeUnit,
    step: f64,
    dt: f64,
}

const fn unit(unit: TimeUnit, step: f64, dt: f64) -> Unit {
    Unit { unit, step, dt }
}

const UNITS: [Unit; 17] = [
    unit(TimeUnit::Second, 1.0, DURATION_SECOND),
    unit(TimeUnit::Second, 5.0, DURATION_SECOND * 5.0),
    unit(TimeUnit::Second, 15.0, DURATION_SECOND * 15.0),
    unit(TimeUnit::Second, 30.0, DURATION_SECOND * 30.0),
    unit(TimeUnit::Minute, 1.0, DURATION_MINUTE),
    unit(TimeUnit::Minute, 5.0, DURATION_MINUTE * 5.0),
    unit(TimeUnit::Minute, 15.0, DURATION_MINUTE * 15.0),
    unit(TimeUnit::Minute, 30.0, DURATION_MINUTE * 30.0),
    unit(TimeUnit::Hour, 1.0, DURATION_HOUR),
    unit(TimeUnit::Hour, 3.0, DURATION_HOUR * 3.0),
    unit(TimeUnit::Hour, 6.0, DURATION_HOUR * 6.0),
    unit(TimeUnit::Hour, 12.0, DURATION_HOUR * 12.0),
    unit(TimeUnit::Day, 1.0, DURATION_DAY),
    unit(TimeUnit::Day, 7.0, DURATION_WEEK),
    unit(TimeUnit::Month, 1.0, DURATION_MONTH),
    unit(TimeUnit::Month, 3.0, DURATION_MONTH * 3.0),
    unit(TimeUnit::Year, 1.0, DURATION_YEAR),
];

/// Determine a time interval for binning based on minimum and maximum
/// timestamps (in milliseconds since the UNIX epoch) and an approximate
/// step count. Selects the ladder entry whose duration is closest to the
/// target step duration `span / steps`; spans outside the ladder fall back
/// to arithmetic millisecond or year steps.
pub fn time_interval(min: f64, max: f64, steps: usize) -> TimeInterval {
    let span = max - min;
    let target = span / steps as f64;
    let i = if target.is_nan() {
        UNITS.len()
    } else {
        UNITS.partition_point(|u| u.dt <= target)
    };

    if i == UNITS.len() {
        TimeInterval {
            unit: TimeUnit::Year,
            step: bin_step(span / DURATION_YEAR, steps as f64, 0.0, LN_10),
        }
    } else if i > 0 {
        // closer of the two bracketing ladder entries, by duration ratio
        let u = if target / UNITS[i - 1].dt < UNITS[i].dt / target {
            &UNITS[i - 1]
        } else {
            &UNITS[i]
        };
        TimeInterval {
            unit: u.unit,
            step: u.step,
        }
    } else {
        let step = bin_step(span, steps as f64, 0.0, LN_10);
        if step >= 1.0 {
            TimeInterval {
                unit: TimeUnit::Millisecond,
                step,
            }
        } else {
            TimeInterval {
                unit: TimeUnit::Microsecond,
                step: step * 1000.0,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn spans_map_to_ladder_entries() {
        // one day in 24 steps lands on hours
        let t = time_interval(0.0, DURATION_DAY, 24);
        assert_eq!(t.unit, TimeUnit::Hour);
        assert_eq!(t.step, 1.0);

        // one hour in 12 steps lands on 5 minute bins
        let t = time_interval(0.0, DURATION_HOUR, 12);
        assert_eq!(t.unit, TimeUnit::Minute);
        assert_eq!(t.step, 5.0);
    }

    #[test]
    fn long_spans_fall_back_to_year_steps() {
        let t = time_interval(0.0, DURATION_YEAR * 1000.0, 10);
        assert_eq!(t.unit, TimeUnit::Year);
        assert_eq!(t.step, 100.0);
    }

    #[test]
    fn short_spans_fall_back_to_milliseconds() {
        let t = time_interval(0.0, 100.0, 10);
        assert_eq!(t.unit, TimeUnit::Millisecond);
        assert_eq!(t.step, 10.0);
    }

    #[test]
    fn unit_names_are_interval_keywords() {
        assert_eq!(TimeUnit::Month.to_string(), "month");
        assert_eq!(TimeUnit::Microsecond.to_string(), "microsecond");
    }
}
