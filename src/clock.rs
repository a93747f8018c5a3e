/// Reference clock abstraction
///
/// All "now" reads go through this trait so calculations stay deterministic
/// under test. The pure streak/milestone code never touches a clock at all;
/// only the engine derives today's key and reminder-due times from it.

use chrono::{DateTime, NaiveDate, Utc};

/// Supplies the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Today's UTC calendar day
    fn today(&self) -> NaiveDate {
        self.now().naive_utc().date()
    }
}

/// The real system clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_is_utc_date() {
        struct Fixed;
        impl Clock for Fixed {
            fn now(&self) -> DateTime<Utc> {
                // 23:30 UTC: still the same UTC day no matter the local zone
                "2024-01-07T23:30:00Z".parse().unwrap()
            }
        }

        assert_eq!(
            Fixed.today(),
            NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
        );
    }
}
