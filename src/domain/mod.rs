//! Domain layer - renewal decision model.
//!
//! Pure types and rules: addresses, domain items and the ownership index,
//! expiration arithmetic, renewal policy, and the report record. Nothing
//! in here performs I/O.

pub mod address;
pub mod error;
pub mod expiration;
pub mod item;
pub mod policy;
pub mod result;

pub use address::Address;
pub use error::CheckError;
pub use expiration::{ExpirationFacts, VALIDITY_PERIOD};
pub use item::{DNS_COLLECTION, DomainItem, OwnershipIndex, TLD_SUFFIX, validate_domain_name};
pub use policy::{RENEW_COMMENT, RenewalAction, RenewalFee, RenewalPolicy};
pub use result::CheckResult;
