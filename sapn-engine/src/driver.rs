//! The fixed-point worklist search: outer cheapest-first discovery loop
//! wrapped around an inner most-expensive-first expansion subroutine.

use std::fmt::Debug;
use std::hash::Hash;

use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::cancellation::CancellationToken;
use crate::error::EngineError;
use crate::expansion::{expand_by_lower_gradient, expand_by_upper_gradient, select_expansion_event};
use crate::lts::{Facts, Lts};
use crate::marking::Marking;
use crate::minimality::filter_minimal;
use crate::region::is_region;

/// The outcome of a synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisResult<S> {
    /// The minimal k-bounded regions discovered, after the minimality
    /// filter.
    pub regions: Vec<Marking<S>>,
    /// Every marking the search visited, in the order it first settled
    /// there (regions and dead ends alike).
    pub explored: Vec<Marking<S>>,
    /// The number of outer-loop iterations performed.
    pub iterations: u64,
    /// True if the search stopped early because of a cancellation request;
    /// `regions` still reflects a minimality-filtered partial `Discovered`
    /// set in that case.
    pub cancelled: bool,
}

/// Synthesizes the minimal k-bounded regions of `lts`.
///
/// `k` must be a positive integer; `k == 0` returns
/// [`EngineError::InvalidK`].
pub fn synthesize_minimal_regions<L: Lts>(lts: &L, k: u32) -> Result<SynthesisResult<L::State>, EngineError> {
    synthesize_minimal_regions_cancellable(lts, k, None)
}

/// As [`synthesize_minimal_regions`], but polls `cancellation` once per
/// outer-loop iteration (never inside the inner expansion subroutine) and
/// returns early with `cancelled: true` if it is set.
pub fn synthesize_minimal_regions_cancellable<L: Lts>(
    lts: &L,
    k: u32,
    cancellation: Option<&CancellationToken>,
) -> Result<SynthesisResult<L::State>, EngineError> {
    if k == 0 {
        return Err(EngineError::InvalidK(0));
    }

    let facts = Facts::build(lts);

    let mut candidates = seed_candidates(&facts);
    debug!("seeded {} candidates after dedup/superset removal", candidates.len());

    let mut explored_set: FxHashSet<Marking<L::State>> = FxHashSet::default();
    let mut explored_log: Vec<Marking<L::State>> = Vec::new();
    let mut discovered: Vec<Marking<L::State>> = Vec::new();
    let mut iterations: u64 = 0;
    let mut cancelled = false;

    while !candidates.is_empty() {
        if let Some(token) = cancellation {
            if token.is_cancelled() {
                debug!("cancellation observed before outer iteration {}", iterations);
                cancelled = true;
                break;
            }
        }

        let idx = extremal_sum_index(&candidates, Extremum::Min);
        let r_tilde = candidates.remove(idx);
        trace!("outer: popped candidate with sum {}", sum_values(&r_tilde));

        if is_region(&facts, &r_tilde) {
            record_visit(&mut explored_set, &mut explored_log, r_tilde.clone());
            discovered.push(r_tilde);
        } else {
            run_inner_expansion(
                &facts,
                k,
                r_tilde,
                &mut discovered,
                &mut explored_set,
                &mut explored_log,
            );
        }

        iterations += 1;
    }

    let regions = filter_minimal(discovered, |m| is_region(&facts, m));
    debug!(
        "synthesis finished: {} iterations, {} regions, cancelled = {}",
        iterations,
        regions.len(),
        cancelled
    );

    Ok(SynthesisResult { regions, explored: explored_log, iterations, cancelled })
}

/// Pushes `marking` onto `explored_log` if it hasn't been seen before.
/// Returns whether it was newly recorded.
fn record_visit<S: Clone + Eq + Hash>(
    explored_set: &mut FxHashSet<Marking<S>>,
    explored_log: &mut Vec<Marking<S>>,
    marking: Marking<S>,
) -> bool {
    if explored_set.insert(marking.clone()) {
        explored_log.push(marking);
        true
    } else {
        false
    }
}

enum Extremum {
    Min,
    Max,
}

fn sum_values<S>(m: &Marking<S>) -> u64 {
    (0..m.len()).map(|i| m.value_at(i) as u64).sum()
}

/// Index of the candidate with the smallest (`Min`) or largest (`Max`)
/// value-sum, first occurrence breaking ties. `candidates` must be nonempty.
fn extremal_sum_index<S>(candidates: &[Marking<S>], which: Extremum) -> usize {
    let mut best_idx = 0;
    let mut best_sum = sum_values(&candidates[0]);
    for (i, c) in candidates.iter().enumerate().skip(1) {
        let s = sum_values(c);
        let better = match which {
            Extremum::Min => s < best_sum,
            Extremum::Max => s > best_sum,
        };
        if better {
            best_idx = i;
            best_sum = s;
        }
    }
    best_idx
}

/// Builds the outer loop's initial candidate set: every event's excitation
/// and switching indicator, deduplicated, then stripped of markings that
/// strictly contain another seed.
fn seed_candidates<S, E>(facts: &Facts<S, E>) -> Vec<Marking<S>>
where
    S: Clone + Eq + Ord + Hash + Debug,
    E: Clone + Eq + Ord + Hash + Debug,
{
    let mut seeds = Vec::new();
    for e in facts.events() {
        seeds.push(facts.excitation_set(e));
        seeds.push(facts.switching_set(e));
    }

    let mut seen = FxHashSet::default();
    seeds.retain(|m| seen.insert(m.clone()));

    let snapshot = seeds.clone();
    seeds.retain(|m| !snapshot.iter().any(|other| other != m && other.subset(m).unwrap_or(false)));

    seeds
}

/// The inner expansion subroutine: starting from `seed` (already known not
/// to be a region), repeatedly picks the most-expensive pending marking,
/// finds its most illegal event, and expands along both the lower- and
/// upper-gradient directions until the local worklist is empty.
fn run_inner_expansion<S, E>(
    facts: &Facts<S, E>,
    k: u32,
    seed: Marking<S>,
    discovered: &mut Vec<Marking<S>>,
    explored_set: &mut FxHashSet<Marking<S>>,
    explored_log: &mut Vec<Marking<S>>,
) where
    S: Clone + Eq + Ord + Hash + Debug,
    E: Clone + Eq + Ord + Hash + Debug,
{
    let mut work: Vec<Marking<S>> = vec![seed];

    while !work.is_empty() {
        let idx = extremal_sum_index(&work, Extremum::Max);
        let r_hat = work.remove(idx);

        if explored_set.contains(&r_hat) {
            continue;
        }
        record_visit(explored_set, explored_log, r_hat.clone());

        let illegal = facts.illegal_events(&r_hat);
        if illegal.is_empty() {
            // Already a region; shouldn't normally reach here since callers
            // only enqueue non-regions, but a later expansion step can turn
            // a candidate back into one, so handle it defensively.
            discovered.push(r_hat);
            continue;
        }

        let (event, _g_min, _g_max, g_e) = select_expansion_event(&illegal);

        let r1 = expand_by_lower_gradient(facts, &r_hat, &event, g_e);
        let r2 = expand_by_upper_gradient(facts, &r_hat, &event, g_e + 1);

        for candidate in [r1, r2] {
            if explored_set.contains(&candidate) {
                continue;
            }
            if candidate.power() > k || candidate.is_trivial() {
                record_visit(explored_set, explored_log, candidate);
                continue;
            }
            if is_region(facts, &candidate) {
                record_visit(explored_set, explored_log, candidate.clone());
                discovered.push(candidate);
            } else {
                work.push(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Diamond;

    impl Lts for Diamond {
        type State = String;
        type Event = String;

        fn states(&self) -> Vec<String> {
            vec!["s0".into(), "s1".into(), "s2".into(), "s3".into()]
        }
        fn events(&self) -> Vec<String> {
            vec!["a".into(), "b".into(), "c".into(), "d".into()]
        }
        fn transitions(&self) -> Vec<(String, String, String)> {
            vec![
                ("s0".into(), "a".into(), "s1".into()),
                ("s0".into(), "b".into(), "s2".into()),
                ("s1".into(), "c".into(), "s3".into()),
                ("s2".into(), "d".into(), "s3".into()),
            ]
        }
    }

    struct SelfLoop;

    impl Lts for SelfLoop {
        type State = String;
        type Event = String;

        fn states(&self) -> Vec<String> {
            vec!["s0".into()]
        }
        fn events(&self) -> Vec<String> {
            vec!["a".into()]
        }
        fn transitions(&self) -> Vec<(String, String, String)> {
            vec![("s0".into(), "a".into(), "s0".into())]
        }
    }

    #[test]
    fn diamond_yields_at_least_one_region() {
        // RUST_LOG=trace cargo test -p sapn-engine shows per-iteration detail.
        let _ = env_logger::try_init();
        let result = synthesize_minimal_regions(&Diamond, 2).unwrap();
        assert!(!result.regions.is_empty());
        assert!(!result.cancelled);
        for r in &result.regions {
            assert!(r.is_k_bounded(2));
        }
    }

    #[test]
    fn self_loop_has_no_illegal_events_at_the_seed() {
        // the only event is a self-loop, so its gradient is trivially 0
        // everywhere: every seed is already a region.
        let result = synthesize_minimal_regions(&SelfLoop, 1).unwrap();
        assert!(!result.regions.is_empty());
    }

    #[test]
    fn invalid_k_is_rejected() {
        let err = synthesize_minimal_regions(&Diamond, 0).unwrap_err();
        assert_eq!(err, EngineError::InvalidK(0));
    }

    #[test]
    fn cancelling_before_the_first_iteration_returns_immediately() {
        let token = CancellationToken::new();
        token.cancel();
        let result = synthesize_minimal_regions_cancellable(&Diamond, 2, Some(&token)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn synthesis_is_idempotent() {
        let a = synthesize_minimal_regions(&Diamond, 2).unwrap();
        let b = synthesize_minimal_regions(&Diamond, 2).unwrap();
        assert_eq!(a.regions.len(), b.regions.len());
    }
}
