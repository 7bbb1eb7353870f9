//! The expansion kernel: per-state deltas and the two candidate markings
//! produced from an illegal event during the inner search.

use std::fmt::Debug;
use std::hash::Hash;

use crate::lts::Facts;
use crate::marking::Marking;

/// `delta_g(s)`: how much `marking(s)` must grow, along `event`'s outgoing
/// arcs from `s`, to bring every such arc's gradient down to at most `g`.
fn delta_g<S, E>(facts: &Facts<S, E>, marking: &Marking<S>, event: &E, state_idx: usize, g: i64) -> u32
where
    S: Clone + Eq + Ord + Hash + Debug,
    E: Clone + Eq + Ord + Hash + Debug,
{
    let mut best = 0i64;
    for (ev, to_idx) in facts.out_arcs(state_idx) {
        if ev == event {
            let needed = marking.value_at(*to_idx) as i64 - marking.value_at(state_idx) as i64 - g;
            best = best.max(needed);
        }
    }
    best.max(0) as u32
}

/// `delta_G(s)`: how much `marking(s)` must grow, along `event`'s incoming
/// arcs into `s`, to bring every such arc's gradient up to at least `g`.
fn delta_cap_g<S, E>(facts: &Facts<S, E>, marking: &Marking<S>, event: &E, state_idx: usize, g: i64) -> u32
where
    S: Clone + Eq + Ord + Hash + Debug,
    E: Clone + Eq + Ord + Hash + Debug,
{
    let mut best = 0i64;
    for (ev, from_idx) in facts.in_arcs(state_idx) {
        if ev == event {
            let needed = marking.value_at(*from_idx) as i64 - marking.value_at(state_idx) as i64 + g;
            best = best.max(needed);
        }
    }
    best.max(0) as u32
}

/// Expansion-by-g: adds `delta_g(s)` to every state `s`, capping `event`'s
/// outgoing gradients at `g`.
pub(crate) fn expand_by_lower_gradient<S, E>(facts: &Facts<S, E>, marking: &Marking<S>, event: &E, g: i64) -> Marking<S>
where
    S: Clone + Eq + Ord + Hash + Debug,
    E: Clone + Eq + Ord + Hash + Debug,
{
    let values: Vec<u32> = (0..marking.len())
        .map(|i| marking.value_at(i) + delta_g(facts, marking, event, i, g))
        .collect();
    Marking::from_values(facts.universe().clone(), values)
}

/// Expansion-by-G: adds `delta_G(s)` to every state `s`, floors `event`'s
/// incoming gradients at `g`.
pub(crate) fn expand_by_upper_gradient<S, E>(facts: &Facts<S, E>, marking: &Marking<S>, event: &E, g: i64) -> Marking<S>
where
    S: Clone + Eq + Ord + Hash + Debug,
    E: Clone + Eq + Ord + Hash + Debug,
{
    let values: Vec<u32> = (0..marking.len())
        .map(|i| marking.value_at(i) + delta_cap_g(facts, marking, event, i, g))
        .collect();
    Marking::from_values(facts.universe().clone(), values)
}

/// Picks the illegal event with the largest `|g_e|`, first occurrence
/// breaking ties. `illegal` must be nonempty.
pub(crate) fn select_expansion_event<E: Clone>(illegal: &[(E, i64, i64, i64)]) -> (E, i64, i64, i64) {
    let mut best = illegal[0].clone();
    let mut best_abs = best.3.unsigned_abs();
    for item in &illegal[1..] {
        let abs = item.3.unsigned_abs();
        if abs > best_abs {
            best = item.clone();
            best_abs = abs;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_break_keeps_first_occurrence() {
        let illegal = vec![
            ("a".to_string(), 0i64, 2i64, 1i64),
            ("b".to_string(), -2i64, 0i64, -1i64),
        ];
        let chosen = select_expansion_event(&illegal);
        assert_eq!(chosen.0, "a");
    }

    #[test]
    fn tie_break_picks_larger_magnitude() {
        let illegal = vec![
            ("a".to_string(), 0i64, 2i64, 1i64),
            ("b".to_string(), -4i64, 0i64, -2i64),
        ];
        let chosen = select_expansion_event(&illegal);
        assert_eq!(chosen.0, "b");
    }
}
