//! # Collaborator Traits
//!
//! Seams the engine exposes to its callers.

/// Advisory address check supplied by the caller
///
/// The result is reported next to each row and never blocks an import or an
/// edit. Any `Fn(&str) -> bool` closure can be used.
pub trait AddressVerifier: Send + Sync {
    fn verify(&self, address: &str) -> bool;
}

impl<F> AddressVerifier for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn verify(&self, address: &str) -> bool {
        self(address)
    }
}
