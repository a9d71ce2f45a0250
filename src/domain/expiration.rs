//! Expiration timeline of a domain.
//!
//! A `.ton` domain stays valid for one year after its last fill-up. The
//! expiration date is always anchored on the last fill-up, never on the
//! mint date.

use chrono::{DateTime, Duration, Utc};

/// Validity window opened by each fill-up.
pub const VALIDITY_PERIOD: Duration = Duration::days(365);

const SECONDS_PER_DAY: i64 = 86_400;

/// Calendar format used in reports (`DD.MM.YYYY`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Facts derived for one domain at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpirationFacts {
    pub mint_date: DateTime<Utc>,
    pub last_fill_up: DateTime<Utc>,
    pub expires_on: DateTime<Utc>,
    /// Whole days left, rounded toward negative infinity.
    pub days_to_expire: i64,
    /// Time left is strictly below the renewal threshold.
    pub is_need_to_renew: bool,
}

impl ExpirationFacts {
    pub fn derive(
        mint_date: DateTime<Utc>,
        last_fill_up: DateTime<Utc>,
        now: DateTime<Utc>,
        threshold: Duration,
    ) -> Self {
        let expires_on = last_fill_up + VALIDITY_PERIOD;
        let time_left = expires_on - now;

        Self {
            mint_date,
            last_fill_up,
            expires_on,
            days_to_expire: time_left.num_seconds().div_euclid(SECONDS_PER_DAY),
            is_need_to_renew: time_left < threshold,
        }
    }
}

/// Render a timestamp as `DD.MM.YYYY` (UTC).
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_expires_one_year_after_fill_up() {
        let fill = at(1_700_000_000);
        let facts = ExpirationFacts::derive(at(0), fill, fill, Duration::days(30));
        assert_eq!(facts.expires_on, fill + Duration::days(365));
        assert_eq!(facts.days_to_expire, 365);
        assert!(!facts.is_need_to_renew);
    }

    #[test]
    fn test_long_expired_domain() {
        let now = at(1_750_000_000);
        let fill = now - Duration::days(400);
        let facts = ExpirationFacts::derive(at(0), fill, now, Duration::hours(720));
        assert!(facts.is_need_to_renew);
        assert_eq!(facts.days_to_expire, -35);
    }

    #[test]
    fn test_threshold_boundary_is_strict() {
        let now = at(1_750_000_000);
        let threshold = Duration::days(30);
        let fill = now + threshold - VALIDITY_PERIOD;
        let facts = ExpirationFacts::derive(at(0), fill, now, threshold);
        assert!(!facts.is_need_to_renew);

        let fill = fill - Duration::seconds(1);
        let facts = ExpirationFacts::derive(at(0), fill, now, threshold);
        assert!(facts.is_need_to_renew);
    }

    #[test]
    fn test_days_round_down_when_negative() {
        let now = at(1_750_000_000);
        let fill = now - VALIDITY_PERIOD - Duration::hours(1);
        let facts = ExpirationFacts::derive(at(0), fill, now, Duration::zero());
        assert_eq!(facts.days_to_expire, -1);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&at(1_700_000_000)), "14.11.2023");
    }
}
