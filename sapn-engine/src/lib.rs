//! Minimal k-bounded region discovery for labeled transition systems, via
//! the theory of regions.
//!
//! This crate is deliberately unaware of how a caller names or stores its
//! states and events: it works entirely against the [`Lts`] trait and the
//! caller's own `State`/`Event` types. A concrete, interned, graph-backed
//! `Lts` implementation lives one crate up, in the CLI front end.
//!
//! # Completeness
//!
//! [`synthesize_minimal_regions`] is a directed search, not an exhaustive
//! enumeration: it only ever explores markings reachable from the seed set
//! (every event's excitation and switching indicator) by repeated
//! expand-by-g/expand-by-G repairs. This is known to discover the minimal
//! k-bounded regions reachable from that seed set; whether the seed set is
//! sufficient for completeness over *all* minimal k-bounded regions of a
//! given LTS is not proven here and should be treated as a known
//! limitation, not a guarantee.
//!
//! # Deterministic tie-breaking
//!
//! When a marking has several equally illegal events (the same largest
//! `|g_e|`), expansion always picks the first one encountered in
//! [`Lts::events`]'s sorted, deduplicated order, rather than, say, the
//! order the caller's `events()` happened to return them in. The same goes
//! for the outer/inner worklists: ties in value-sum are broken by first
//! occurrence. Two runs against the same `Lts` and `k` therefore always
//! expand candidates in the same order and discover the same regions.

mod cancellation;
mod driver;
mod error;
mod expansion;
mod lts;
mod marking;
mod minimality;
mod region;

pub use cancellation::CancellationToken;
pub use driver::{synthesize_minimal_regions, synthesize_minimal_regions_cancellable, SynthesisResult};
pub use error::EngineError;
pub use lts::{excitation_set_named, switching_set_named, Lts};
pub use marking::Marking;
pub use region::{is_postregion_of_event_named, is_preregion_of_event_named, is_region_of};
