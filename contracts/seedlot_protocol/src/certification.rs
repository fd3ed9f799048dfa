//! Manager certification lattice.
//!
//! Transitions are computed here as pure functions; the entry points in
//! `lib.rs` only load, call and store.

use soroban_sdk::Address;

use crate::types::{CertificationTier, MAX_TIER};
use crate::Error;

/// Tier a manager moves to when certified at `level`.
///
/// The only legal step is exactly one level above the current tier, with a
/// decertified manager starting again from tier 1.
pub fn certify(
    admin: &Address,
    manager: &Address,
    current: CertificationTier,
    level: u32,
) -> Result<CertificationTier, Error> {
    if admin == manager {
        return Err(Error::AdminCannotBeCertified);
    }
    if level == 0 {
        return Err(Error::NoCertificationTierZero);
    }
    if level > MAX_TIER {
        return Err(Error::CannotCertifyAboveTierFour);
    }
    if level != current.next_level() {
        return Err(Error::CertificationsMustIncreaseByOneTier);
    }
    CertificationTier::from_level(level).ok_or(Error::CannotCertifyAboveTierFour)
}

/// Admin-initiated decertification.
pub fn decertify(
    admin: &Address,
    manager: &Address,
    current: CertificationTier,
) -> Result<CertificationTier, Error> {
    if admin == manager {
        return Err(Error::AdminCannotBeCertified);
    }
    if current == CertificationTier::Decertified {
        return Err(Error::ManagerAlreadyDecertified);
    }
    Ok(CertificationTier::Decertified)
}

/// Gate for lot preparation.
pub fn require_certified(current: CertificationTier) -> Result<(), Error> {
    if current.is_certified() {
        Ok(())
    } else {
        Err(Error::ManagerNotCertified)
    }
}
