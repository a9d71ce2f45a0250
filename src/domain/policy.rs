//! Renewal policy and the action it selects for a domain.

use std::fmt;

use chrono::Duration;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use super::error::CheckError;

/// Comment attached to plain renewal transfers.
pub const RENEW_COMMENT: &str = "Renew";

/// Default renewal threshold: 30 days.
pub const DEFAULT_THRESHOLD: Duration = Duration::hours(720);

const NANOS_PER_TON: Decimal = dec!(1000000000);

/// Operator-selected behavior for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenewalPolicy {
    /// Read-only mode: no wallet, no ownership index, no transactions.
    pub lite: bool,
    /// Renew automatically when the threshold is crossed.
    pub renew: bool,
    /// Act regardless of the threshold.
    pub force: bool,
    /// Renewal is needed when less than this much time is left.
    pub threshold: Duration,
    /// Block until the chain confirms each transaction.
    pub wait_for_confirmation: bool,
}

impl Default for RenewalPolicy {
    fn default() -> Self {
        Self {
            lite: false,
            renew: false,
            force: false,
            threshold: DEFAULT_THRESHOLD,
            wait_for_confirmation: false,
        }
    }
}

/// What to do with a domain after its facts are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalAction {
    None,
    /// Plain transfer with the renewal comment; wallet is already the record owner.
    Renew,
    /// Set-wallet-record payload; makes the wallet the record owner and renews.
    Assign,
}

impl RenewalPolicy {
    /// Whether the policy allows acting on this domain at all.
    ///
    /// `force` only bypasses the threshold and the `renew` switch; lite mode
    /// and foreign domains are never acted upon.
    pub const fn is_eligible(&self, is_mine: bool, is_need_to_renew: bool) -> bool {
        !self.lite && is_mine && (self.force || (self.renew && is_need_to_renew))
    }

    pub const fn decide(
        &self,
        is_mine: bool,
        is_assigned: bool,
        is_need_to_renew: bool,
    ) -> RenewalAction {
        if !self.is_eligible(is_mine, is_need_to_renew) {
            RenewalAction::None
        } else if is_assigned {
            RenewalAction::Renew
        } else {
            RenewalAction::Assign
        }
    }
}

/// Amount attached to renew and assign transactions, in nanotons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenewalFee(u64);

impl RenewalFee {
    /// 0.005 TON.
    pub const DEFAULT: Self = Self(5_000_000);

    pub const fn from_nanotons(nanotons: u64) -> Self {
        Self(nanotons)
    }

    /// Parse a decimal TON amount such as `"0.005"`.
    pub fn from_ton(amount: &str) -> Result<Self, CheckError> {
        let invalid = |why: &str| CheckError::Config(format!("renew amount {amount:?}: {why}"));
        let ton: Decimal = amount.trim().parse().map_err(|_| invalid("not a number"))?;
        if ton <= Decimal::ZERO {
            return Err(invalid("must be positive"));
        }
        let nanos = ton * NANOS_PER_TON;
        if nanos.fract() != Decimal::ZERO {
            return Err(invalid("more than 9 decimal places"));
        }
        nanos
            .to_u64()
            .map(Self)
            .ok_or_else(|| invalid("out of range"))
    }

    pub const fn nanotons(&self) -> u64 {
        self.0
    }
}

impl Default for RenewalFee {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for RenewalFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ton = Decimal::from(self.0) / NANOS_PER_TON;
        write!(f, "{} TON", ton.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(lite: bool, renew: bool, force: bool) -> RenewalPolicy {
        RenewalPolicy {
            lite,
            renew,
            force,
            ..RenewalPolicy::default()
        }
    }

    #[test]
    fn test_renew_when_needed_and_enabled() {
        let p = policy(false, true, false);
        assert_eq!(p.decide(true, true, true), RenewalAction::Renew);
        assert_eq!(p.decide(true, false, true), RenewalAction::Assign);
        assert_eq!(p.decide(true, true, false), RenewalAction::None);
    }

    #[test]
    fn test_no_action_without_renew_flag() {
        let p = policy(false, false, false);
        assert_eq!(p.decide(true, true, true), RenewalAction::None);
    }

    #[test]
    fn test_force_bypasses_threshold_only() {
        let p = policy(false, false, true);
        assert_eq!(p.decide(true, true, false), RenewalAction::Renew);
        assert_eq!(p.decide(true, false, false), RenewalAction::Assign);
        // force never reaches foreign domains
        assert_eq!(p.decide(false, true, true), RenewalAction::None);
        assert_eq!(p.decide(false, false, false), RenewalAction::None);
    }

    #[test]
    fn test_lite_never_acts() {
        for renew in [false, true] {
            for force in [false, true] {
                let p = policy(true, renew, force);
                assert_eq!(p.decide(true, true, true), RenewalAction::None);
                assert_eq!(p.decide(true, false, true), RenewalAction::None);
            }
        }
    }

    #[test]
    fn test_fee_parsing() {
        assert_eq!(RenewalFee::from_ton("0.005").unwrap(), RenewalFee::DEFAULT);
        assert_eq!(RenewalFee::from_ton("1").unwrap().nanotons(), 1_000_000_000);
        assert!(RenewalFee::from_ton("0").is_err());
        assert!(RenewalFee::from_ton("-1").is_err());
        assert!(RenewalFee::from_ton("abc").is_err());
        assert!(RenewalFee::from_ton("0.0000000001").is_err());
    }

    #[test]
    fn test_fee_display() {
        assert_eq!(RenewalFee::DEFAULT.to_string(), "0.005 TON");
    }
}
