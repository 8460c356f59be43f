use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::time::Duration;

/// Granularity of a duration, ordered from finest to coarsest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub fn to_duration(self, amount: u64) -> Duration {
        match self {
            TimeUnit::Nanoseconds => Duration::from_nanos(amount),
            TimeUnit::Microseconds => Duration::from_micros(amount),
            TimeUnit::Milliseconds => Duration::from_millis(amount),
            TimeUnit::Seconds => Duration::from_secs(amount),
            TimeUnit::Minutes => Duration::from_secs(amount.saturating_mul(60)),
            TimeUnit::Hours => Duration::from_secs(amount.saturating_mul(3_600)),
            TimeUnit::Days => Duration::from_secs(amount.saturating_mul(86_400)),
        }
    }

    /// Whole milliseconds in `amount` of this unit, truncating like `TimeUnit.toMillis`
    pub fn to_millis(self, amount: u64) -> u128 {
        self.to_duration(amount).as_millis()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Nanoseconds => "NANOSECONDS",
            TimeUnit::Microseconds => "MICROSECONDS",
            TimeUnit::Milliseconds => "MILLISECONDS",
            TimeUnit::Seconds => "SECONDS",
            TimeUnit::Minutes => "MINUTES",
            TimeUnit::Hours => "HOURS",
            TimeUnit::Days => "DAYS",
        };
        write!(f, "{}", name)
    }
}

/// Order by magnitude with an unset unit sorting last
pub fn compare_time_units(left: Option<TimeUnit>, right: Option<TimeUnit>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_millis() {
        assert_eq!(TimeUnit::Seconds.to_millis(5), 5_000);
        assert_eq!(TimeUnit::Microseconds.to_millis(1_500), 1);
        assert_eq!(TimeUnit::Nanoseconds.to_millis(999_999), 0);
        assert_eq!(TimeUnit::Days.to_millis(1), 86_400_000);
    }

    #[test]
    fn test_compare_time_units() {
        assert_eq!(
            compare_time_units(Some(TimeUnit::Nanoseconds), Some(TimeUnit::Days)),
            Ordering::Less
        );
        assert_eq!(
            compare_time_units(Some(TimeUnit::Hours), Some(TimeUnit::Minutes)),
            Ordering::Greater
        );
        assert_eq!(
            compare_time_units(Some(TimeUnit::Seconds), Some(TimeUnit::Seconds)),
            Ordering::Equal
        );
        assert_eq!(
            compare_time_units(Some(TimeUnit::Days), None),
            Ordering::Less
        );
        assert_eq!(compare_time_units(None, None), Ordering::Equal);
    }

    #[test]
    fn test_sorting_puts_unset_last() {
        let mut units = vec![
            None,
            Some(TimeUnit::Minutes),
            Some(TimeUnit::Milliseconds),
            Some(TimeUnit::Days),
        ];
        units.sort_by(|left, right| compare_time_units(*left, *right));
        assert_eq!(
            units,
            vec![
                Some(TimeUnit::Milliseconds),
                Some(TimeUnit::Minutes),
                Some(TimeUnit::Days),
                None
            ]
        );
    }
}
