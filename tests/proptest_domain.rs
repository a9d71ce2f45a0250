//! Property-Based Tests - Domain Layer Invariants
//!
//! Uses `proptest` to verify that the expiration arithmetic, the renewal
//! policy and the address codec hold their invariants across random inputs.

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

use tondns::domain::{
    Address, CheckResult, ExpirationFacts, RenewalAction, RenewalPolicy, VALIDITY_PERIOD,
};

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap()
}

// ── Expiration Properties ───────────────────────────────────

proptest! {
    /// Expiration is exactly one validity period after the last fill-up.
    #[test]
    fn expires_exactly_one_period_after_fill_up(
        fill in 1_500_000_000i64..2_000_000_000,
        offset in -800i64 * 86_400..800 * 86_400,
        threshold_h in 0i64..5_000,
    ) {
        let now = at(fill + offset);
        let facts = ExpirationFacts::derive(at(0), at(fill), now, Duration::hours(threshold_h));
        prop_assert_eq!(facts.expires_on, at(fill) + VALIDITY_PERIOD);
    }

    /// Renewal is needed iff time left is strictly below the threshold.
    #[test]
    fn need_to_renew_is_strict(
        fill in 1_500_000_000i64..2_000_000_000,
        threshold_s in 0i64..400 * 86_400,
        delta in -10_000i64..10_000,
    ) {
        let expires = fill + VALIDITY_PERIOD.num_seconds();
        let now = at(expires - threshold_s + delta);
        let facts = ExpirationFacts::derive(at(0), at(fill), now, Duration::seconds(threshold_s));
        // time left = threshold - delta
        prop_assert_eq!(facts.is_need_to_renew, delta > 0);
    }

    /// Whole days left never overstate the remaining time.
    #[test]
    fn days_to_expire_is_floor(
        fill in 1_500_000_000i64..2_000_000_000,
        offset in -800i64 * 86_400..800 * 86_400,
    ) {
        let now = at(fill + offset);
        let facts = ExpirationFacts::derive(at(0), at(fill), now, Duration::days(30));
        let left = (facts.expires_on - now).num_seconds();
        prop_assert!(facts.days_to_expire * 86_400 <= left);
        prop_assert!((facts.days_to_expire + 1) * 86_400 > left);
    }
}

// ── Policy Properties ───────────────────────────────────────

proptest! {
    /// Lite mode never selects an action.
    #[test]
    fn lite_never_acts(
        renew: bool,
        force: bool,
        is_mine: bool,
        is_assigned: bool,
        need: bool,
    ) {
        let policy = RenewalPolicy { lite: true, renew, force, ..RenewalPolicy::default() };
        prop_assert_eq!(policy.decide(is_mine, is_assigned, need), RenewalAction::None);
    }

    /// Foreign domains are never acted upon, force or not.
    #[test]
    fn foreign_domains_untouched(
        renew: bool,
        force: bool,
        is_assigned: bool,
        need: bool,
    ) {
        let policy = RenewalPolicy { renew, force, ..RenewalPolicy::default() };
        prop_assert_eq!(policy.decide(false, is_assigned, need), RenewalAction::None);
    }

    /// Force acts on owned domains regardless of the threshold; the action
    /// depends only on whether the record is already assigned.
    #[test]
    fn force_acts_on_owned_domains(renew: bool, is_assigned: bool, need: bool) {
        let policy = RenewalPolicy { renew, force: true, ..RenewalPolicy::default() };
        let expected = if is_assigned { RenewalAction::Renew } else { RenewalAction::Assign };
        prop_assert_eq!(policy.decide(true, is_assigned, need), expected);
    }
}

// ── Report and Address Properties ───────────────────────────

proptest! {
    /// Zero-valued fields never appear in the JSON report.
    #[test]
    fn zero_fields_absent(name in "[a-z]{1,12}\\.ton", error in "[a-z ]{0,20}") {
        let result = CheckResult::failed(name, error.clone());
        let json = serde_json::to_value(&result).unwrap();
        let obj = json.as_object().unwrap();
        prop_assert!(obj.values().all(|v| !v.is_null()));
        prop_assert_eq!(obj.contains_key("error"), !error.is_empty());
        prop_assert!(!obj.contains_key("daysToExpire"));
        prop_assert!(!obj.contains_key("isMine"));
    }

    /// Friendly and raw forms parse back to the same address.
    #[test]
    fn address_forms_agree(workchain in prop_oneof![Just(0i8), Just(-1i8)], hash: [u8; 32]) {
        let address = Address::new(workchain, hash);
        prop_assert_eq!(address.to_raw().parse::<Address>().unwrap(), address);
        prop_assert_eq!(address.to_friendly(true).parse::<Address>().unwrap(), address);
        prop_assert_eq!(address.to_friendly(false).parse::<Address>().unwrap(), address);
    }
}
