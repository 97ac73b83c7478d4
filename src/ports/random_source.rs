//! Random Source Port - Injected randomness for question picking.
//!
//! The random strategy never touches a global generator. Callers supply a
//! `RandomSource`, so tests can pin the outcome and production code can
//! choose between thread-local and seeded generators.

/// Port for drawing uniform indices.
///
/// # Contract
///
/// `pick_index(len)` is only called with `len > 0` and must return a value
/// in `0..len`, drawn uniformly for non-deterministic implementations.
pub trait RandomSource: Send + Sync {
    /// Draws an index in `0..len`.
    fn pick_index(&self, len: usize) -> usize;
}
