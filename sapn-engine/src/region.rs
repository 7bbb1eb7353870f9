//! Region predicates: whole-LTS regions and per-event pre-/post-regions.

use std::fmt::Debug;
use std::hash::Hash;

use crate::lts::{Facts, Lts};
use crate::marking::Marking;

/// True iff `marking` has a single well-defined gradient for every event of
/// the LTS the facts were built from (the region predicate).
pub(crate) fn is_region<S, E>(facts: &Facts<S, E>, marking: &Marking<S>) -> bool
where
    S: Clone + Eq + Ord + Hash + Debug,
    E: Clone + Eq + Ord + Hash + Debug,
{
    facts.events().iter().all(|e| facts.is_region_for_event(marking, e))
}

/// True iff `marking` is a region and `event`'s excitation set is covered by
/// it (`ER(e) ⊑ marking`).
pub(crate) fn is_preregion_of_event<S, E>(facts: &Facts<S, E>, marking: &Marking<S>, event: &E) -> bool
where
    S: Clone + Eq + Ord + Hash + Debug,
    E: Clone + Eq + Ord + Hash + Debug,
{
    is_region(facts, marking) && facts.excitation_set(event).subset(marking).unwrap_or(false)
}

/// True iff `marking` is a region and `event`'s switching set is covered by
/// it (`SR(e) ⊑ marking`).
pub(crate) fn is_postregion_of_event<S, E>(facts: &Facts<S, E>, marking: &Marking<S>, event: &E) -> bool
where
    S: Clone + Eq + Ord + Hash + Debug,
    E: Clone + Eq + Ord + Hash + Debug,
{
    is_region(facts, marking) && facts.switching_set(event).subset(marking).unwrap_or(false)
}

/// True iff `marking` is a region of `lts` (every event has a single
/// well-defined gradient under it).
///
/// A downstream Petri-net assembler (out of scope here; see crate docs)
/// would call this, together with [`is_preregion_of_event`] and
/// [`is_postregion_of_event`], to turn a discovered region into a place and
/// decide which transitions it connects to.
pub fn is_region_of<L: Lts>(lts: &L, marking: &Marking<L::State>) -> bool {
    is_region(&Facts::build(lts), marking)
}

/// True iff `marking` is a region of `lts` and is the pre-region of `event`
/// (`ER(event) ⊑ marking`). `None` if `event` labels no transition of `lts`.
pub fn is_preregion_of_event_named<L: Lts>(lts: &L, marking: &Marking<L::State>, event: &L::Event) -> Option<bool> {
    if !lts.events().contains(event) {
        return None;
    }
    Some(is_preregion_of_event(&Facts::build(lts), marking, event))
}

/// True iff `marking` is a region of `lts` and is the post-region of `event`
/// (`SR(event) ⊑ marking`). `None` if `event` labels no transition of `lts`.
pub fn is_postregion_of_event_named<L: Lts>(lts: &L, marking: &Marking<L::State>, event: &L::Event) -> Option<bool> {
    if !lts.events().contains(event) {
        return None;
    }
    Some(is_postregion_of_event(&Facts::build(lts), marking, event))
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
    fn trivial_marking_is_always_a_region() {
        let facts = Facts::build(&Diamond);
        let one = Marking::from_pairs(
            ["s0", "s1", "s2", "s3"].iter().map(|s| (s.to_string(), 1u32)),
        );
        assert!(is_region(&facts, &one));
    }

    #[test]
    fn single_place_splitting_the_diamond_is_a_region() {
        let facts = Facts::build(&Diamond);
        // m(s0) = 1, everything downstream of a or b is 0: a and b each have
        // a single arc, so their gradient is trivially well-defined; c and d
        // are likewise single-arc events.
        let m = Marking::from_pairs(vec![
            ("s0".to_string(), 1),
            ("s1".to_string(), 0),
            ("s2".to_string(), 0),
            ("s3".to_string(), 0),
        ]);
        assert!(is_region(&facts, &m));
    }

    struct ParallelBranch;

    impl Lts for ParallelBranch {
        type State = String;
        type Event = String;

        fn states(&self) -> Vec<String> {
            vec!["p".into(), "q".into(), "r".into(), "t".into()]
        }
        fn events(&self) -> Vec<String> {
            vec!["x".into(), "y".into(), "z".into()]
        }
        fn transitions(&self) -> Vec<(String, String, String)> {
            vec![
                ("p".into(), "x".into(), "q".into()),
                ("p".into(), "y".into(), "r".into()),
                ("q".into(), "z".into(), "t".into()),
                ("r".into(), "z".into(), "t".into()),
            ]
        }
    }

    #[test]
    fn preregion_and_postregion_of_z_split_the_join() {
        let facts = Facts::build(&ParallelBranch);
        // p:0, q:1, r:1, t:0: x and y each rise by 1, z falls by 1 from
        // either branch; covers ER(z) = {q,r}, so it is z's pre-region with
        // a (consuming) gradient of -1.
        let m = Marking::from_pairs(vec![
            ("p".to_string(), 0),
            ("q".to_string(), 1),
            ("r".to_string(), 1),
            ("t".to_string(), 0),
        ]);
        assert!(is_region(&facts, &m));
        assert!(is_preregion_of_event(&facts, &m, &"z".to_string()));
        assert!(!is_postregion_of_event(&facts, &m, &"z".to_string()));

        // p:0, q:0, r:0, t:1 covers SR(z) = {t}, so it is z's post-region
        // with a (producing) gradient of +1.
        let n = Marking::from_pairs(vec![
            ("p".to_string(), 0),
            ("q".to_string(), 0),
            ("r".to_string(), 0),
            ("t".to_string(), 1),
        ]);
        assert!(is_region(&facts, &n));
        assert!(is_postregion_of_event(&facts, &n, &"z".to_string()));
        assert!(!is_preregion_of_event(&facts, &n, &"z".to_string()));
    }

    #[test]
    fn named_wrappers_return_none_for_unknown_events() {
        assert_eq!(is_preregion_of_event_named(&Diamond, &one_marking(), &"zzz".to_string()), None);
    }

    fn one_marking() -> Marking<String> {
        Marking::from_pairs(["s0", "s1", "s2", "s3"].iter().map(|s| (s.to_string(), 1u32)))
    }
}
