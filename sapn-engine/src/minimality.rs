//! The final minimality filter applied to the accumulated `Discovered` set.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::marking::Marking;

/// Drops any marking that is not a region (a defensive recheck; the driver
/// should never push a non-region here), then drops any marking that
/// strictly contains another surviving marking, then deduplicates.
pub(crate) fn filter_minimal<S, F>(discovered: Vec<Marking<S>>, is_region: F) -> Vec<Marking<S>>
where
    S: Clone + Eq + Ord + Hash + Debug,
    F: Fn(&Marking<S>) -> bool,
{
    let regions: Vec<Marking<S>> = discovered.into_iter().filter(|m| is_region(m)).collect();

    let mut minimal = Vec::with_capacity(regions.len());
    for (i, candidate) in regions.iter().enumerate() {
        let dominated = regions.iter().enumerate().any(|(j, other)| {
            i != j && other != candidate && other.subset(candidate).unwrap_or(false)
        });
        if !dominated {
            minimal.push(candidate.clone());
        }
    }

    let mut seen = FxHashSet::default();
    minimal.retain(|m| seen.insert(m.clone()));
    minimal
}
