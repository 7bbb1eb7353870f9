use thiserror::Error;

/// Errors raised by the region-discovery engine.
///
/// These cover only the conditions the engine itself can detect: mismatched
/// multiset domains and an invalid bound passed to the synthesis entry
/// point. Lookups of a name not present in the LTS are not errors; they are
/// surfaced as `Option::None` by the functions in [`crate::lts`] that take a
/// single event or state name, so a caller can choose to skip or propagate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A multiset operation (`eq`, `subset`, `union`, `intersect`, `diff`,
    /// ...) was invoked on two markings whose key sets (domains) differ.
    #[error("multiset operation invoked on markings with mismatched domains")]
    DomainMismatch,

    /// `k` must be a positive integer; `synthesize_minimal_regions` was
    /// called with `k == 0`.
    #[error("k must be a positive integer, got {0}")]
    InvalidK(u32),
}
