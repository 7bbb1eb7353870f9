//! The labeled transition system the engine observes, and the derived
//! per-event facts (excitation/switching sets, arc indices) built from it.

use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::marking::{Marking, StateUniverse};

/// An observed labeled transition system, over the caller's own state and
/// event name types.
///
/// The engine never invents names of its own; `State` and `Event` are
/// whatever the caller already uses to identify states and events (strings,
/// interned indices, ...). They only need to be cloneable, comparable, and
/// hashable so the engine can index them internally.
pub trait Lts {
    type State: Clone + Eq + Ord + Hash + Debug;
    type Event: Clone + Eq + Ord + Hash + Debug;

    /// Every state reachable in the system. May be returned in any order;
    /// duplicates are tolerated.
    fn states(&self) -> Vec<Self::State>;

    /// Every event label used by some transition. May be returned in any
    /// order; duplicates are tolerated. `Facts` sorts and dedupes this list
    /// once at construction, and that sorted order is what breaks ties
    /// when several events are equally illegal during expansion (see the
    /// crate-level note on deterministic tie-breaking): callers don't need
    /// `events()` itself to be ordered.
    fn events(&self) -> Vec<Self::Event>;

    /// Every transition, as `(from, event, to)` triples.
    fn transitions(&self) -> Vec<(Self::State, Self::Event, Self::State)>;

    /// The designated initial states, if the caller's system has a notion of
    /// one. Not consulted by [`crate::synthesize_minimal_regions`] itself --
    /// region synthesis is initial-state-agnostic -- but part of the
    /// collaborator contract for a downstream consumer (e.g. a PNML emitter)
    /// that needs a starting marking. Defaults to empty.
    fn initial_states(&self) -> Vec<Self::State> {
        Vec::new()
    }
}

/// Precomputed per-event and per-state arc indices built once from an
/// [`Lts`], so the search driver never re-scans the transition relation.
pub(crate) struct Facts<S, E> {
    universe: Rc<StateUniverse<S>>,
    events: Vec<E>,
    by_event: FxHashMap<E, Vec<(usize, usize)>>,
    out_arcs: Vec<Vec<(E, usize)>>,
    in_arcs: Vec<Vec<(E, usize)>>,
}

impl<S: Clone + Eq + Ord + Hash + Debug, E: Clone + Eq + Ord + Hash + Debug> Facts<S, E> {
    pub(crate) fn build<L: Lts<State = S, Event = E>>(lts: &L) -> Self {
        let mut states = lts.states();
        states.sort();
        states.dedup();
        let universe = Rc::new(StateUniverse::from_sorted_deduped(states));

        let mut events = lts.events();
        events.sort();
        events.dedup();

        let n = universe.len();
        let mut by_event: FxHashMap<E, Vec<(usize, usize)>> = FxHashMap::default();
        let mut out_arcs: Vec<Vec<(E, usize)>> = vec![Vec::new(); n];
        let mut in_arcs: Vec<Vec<(E, usize)>> = vec![Vec::new(); n];

        for (from, event, to) in lts.transitions() {
            // An LTS is required to only reference states it also reports
            // via `states()` (the data model's domain invariant); a
            // violation here is a bug in the caller's Lts impl, not a
            // recoverable runtime condition.
            let from_idx = universe
                .index_of(&from)
                .unwrap_or_else(|| panic!("transition references state {:?} absent from states()", from));
            let to_idx = universe
                .index_of(&to)
                .unwrap_or_else(|| panic!("transition references state {:?} absent from states()", to));

            by_event.entry(event.clone()).or_default().push((from_idx, to_idx));
            out_arcs[from_idx].push((event.clone(), to_idx));
            in_arcs[to_idx].push((event, from_idx));
        }

        Facts { universe, events, by_event, out_arcs, in_arcs }
    }

    pub(crate) fn universe(&self) -> &Rc<StateUniverse<S>> {
        &self.universe
    }

    pub(crate) fn events(&self) -> &[E] {
        &self.events
    }

    pub(crate) fn out_arcs(&self, state_idx: usize) -> &[(E, usize)] {
        &self.out_arcs[state_idx]
    }

    pub(crate) fn in_arcs(&self, state_idx: usize) -> &[(E, usize)] {
        &self.in_arcs[state_idx]
    }

    /// The excitation set of `event`: the indicator marking over every state
    /// the event can fire from.
    pub(crate) fn excitation_set(&self, event: &E) -> Marking<S> {
        match self.by_event.get(event) {
            None => Marking::zero(self.universe.clone()),
            Some(arcs) => {
                let froms: std::collections::HashSet<usize> = arcs.iter().map(|(f, _)| *f).collect();
                Marking::indicator(self.universe.clone(), |i| froms.contains(&i))
            }
        }
    }

    /// The switching set of `event`: the indicator marking over every state
    /// the event can fire into.
    pub(crate) fn switching_set(&self, event: &E) -> Marking<S> {
        match self.by_event.get(event) {
            None => Marking::zero(self.universe.clone()),
            Some(arcs) => {
                let tos: std::collections::HashSet<usize> = arcs.iter().map(|(_, t)| *t).collect();
                Marking::indicator(self.universe.clone(), |i| tos.contains(&i))
            }
        }
    }

    /// The gradient of `event` at every arc it labels: `g = m(to) - m(from)`.
    /// `None` if the event labels no transition at all.
    fn gradients(&self, marking: &Marking<S>, event: &E) -> Option<(i64, i64)> {
        let arcs = self.by_event.get(event)?;
        if arcs.is_empty() {
            return None;
        }
        let mut g_min = i64::MAX;
        let mut g_max = i64::MIN;
        for &(from, to) in arcs {
            let g = marking.value_at(to) as i64 - marking.value_at(from) as i64;
            g_min = g_min.min(g);
            g_max = g_max.max(g);
        }
        Some((g_min, g_max))
    }

    /// True iff `event` has a single well-defined gradient under `marking`
    /// (vacuously true for events it doesn't label).
    pub(crate) fn is_region_for_event(&self, marking: &Marking<S>, event: &E) -> bool {
        match self.gradients(marking, event) {
            None => true,
            Some((g_min, g_max)) => g_min == g_max,
        }
    }

    /// Every event whose gradient is ill-defined under `marking`, as
    /// `(event, g_min, g_max, g_e)` where `g_e = floor((g_min + g_max) / 2)`.
    pub(crate) fn illegal_events(&self, marking: &Marking<S>) -> Vec<(E, i64, i64, i64)> {
        self.events
            .iter()
            .filter_map(|e| {
                let (g_min, g_max) = self.gradients(marking, e)?;
                if g_min == g_max {
                    None
                } else {
                    let g_e = (g_min + g_max).div_euclid(2);
                    Some((e.clone(), g_min, g_max, g_e))
                }
            })
            .collect()
    }
}

/// The excitation set of `event` under `lts`, or `None` if `event` does not
/// label any transition of `lts`.
pub fn excitation_set_named<L: Lts>(lts: &L, event: &L::Event) -> Option<Marking<L::State>> {
    if !lts.events().contains(event) {
        return None;
    }
    let facts = Facts::build(lts);
    Some(facts.excitation_set(event))
}

/// The switching set of `event` under `lts`, or `None` if `event` does not
/// label any transition of `lts`.
pub fn switching_set_named<L: Lts>(lts: &L, event: &L::Event) -> Option<Marking<L::State>> {
    if !lts.events().contains(event) {
        return None;
    }
    let facts = Facts::build(lts);
    Some(facts.switching_set(event))
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

    #[test]
    fn excitation_and_switching_sets() {
        let facts = Facts::build(&Diamond);
        let exc_a = facts.excitation_set(&"a".to_string());
        assert_eq!(exc_a.support(), vec!["s0".to_string()]);
        let sw_a = facts.switching_set(&"a".to_string());
        assert_eq!(sw_a.support(), vec!["s1".to_string()]);
    }

    #[test]
    fn unknown_event_is_absent_not_an_error() {
        assert!(excitation_set_named(&Diamond, &"zzz".to_string()).is_none());
    }

    #[test]
    fn zero_marking_has_every_event_illegal_or_legal_by_uniform_gradient() {
        let facts = Facts::build(&Diamond);
        let zero = Marking::zero(facts.universe().clone());
        // every event labels exactly one arc, so the gradient is trivially
        // well-defined even though it is nonzero.
        assert!(facts.illegal_events(&zero).is_empty());
    }
}
