//! Multiset (marking) representation and algebra over a fixed state domain.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error::EngineError;

/// The set of states a family of markings is indexed over, fixed once a
/// marking is built and shared (by `Rc`) with every marking derived from it.
///
/// Two markings are considered to share a domain either because they were
/// built from the same `Rc` (the common case inside the engine, where one
/// universe is built per synthesis run) or because their state lists happen
/// to be pointwise equal (the case for markings built ad hoc via
/// [`Marking::from_pairs`], e.g. in tests).
pub(crate) struct StateUniverse<S> {
    states: Vec<S>,
}

impl<S: Clone + Eq + Ord> StateUniverse<S> {
    pub(crate) fn from_sorted_deduped(states: Vec<S>) -> Self {
        StateUniverse { states }
    }

    pub(crate) fn states(&self) -> &[S] {
        &self.states
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn index_of(&self, s: &S) -> Option<usize> {
        self.states.binary_search(s).ok()
    }
}

/// A multiset over a fixed set of states: `S -> N`.
///
/// Values are stored densely, in the same order as the owning
/// [`StateUniverse`]. Every binary operation (`eq`, `subset`, `union`,
/// `intersect`, `diff`) first checks that both operands share a domain and
/// returns [`EngineError::DomainMismatch`] if they don't; this is the only
/// error the multiset layer can raise.
#[derive(Clone)]
pub struct Marking<S> {
    universe: Rc<StateUniverse<S>>,
    values: Vec<u32>,
}

impl<S: Clone + Eq + Ord> Marking<S> {
    /// Builds a marking from explicit `(state, multiplicity)` pairs. Each
    /// state must appear at most once; the resulting marking's domain is
    /// exactly the set of states named here; panics if a duplicate state is
    /// found, since that is a caller bug rather than a runtime condition.
    pub fn from_pairs<I: IntoIterator<Item = (S, u32)>>(pairs: I) -> Self {
        let mut pairs: Vec<(S, u32)> = pairs.into_iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        for w in pairs.windows(2) {
            assert!(w[0].0 != w[1].0, "Marking::from_pairs given a duplicate state");
        }
        let states = pairs.iter().map(|(s, _)| s.clone()).collect();
        let values = pairs.iter().map(|(_, v)| *v).collect();
        Marking {
            universe: Rc::new(StateUniverse::from_sorted_deduped(states)),
            values,
        }
    }

    pub(crate) fn from_values(universe: Rc<StateUniverse<S>>, values: Vec<u32>) -> Self {
        debug_assert_eq!(universe.len(), values.len());
        Marking { universe, values }
    }

    /// The zero marking (every state mapped to 0) over `universe`.
    pub(crate) fn zero(universe: Rc<StateUniverse<S>>) -> Self {
        let n = universe.len();
        Marking::from_values(universe, vec![0; n])
    }

    /// An indicator marking: 1 at every state for which `on` returns true, 0
    /// elsewhere.
    pub(crate) fn indicator(universe: Rc<StateUniverse<S>>, on: impl Fn(usize) -> bool) -> Self {
        let values = (0..universe.len()).map(|i| if on(i) { 1 } else { 0 }).collect();
        Marking::from_values(universe, values)
    }

    pub(crate) fn value_at(&self, idx: usize) -> u32 {
        self.values[idx]
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    fn same_domain(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.universe, &other.universe) || self.universe.states() == other.universe.states()
    }

    fn require_same_domain(&self, other: &Self) -> Result<(), EngineError> {
        if self.same_domain(other) {
            Ok(())
        } else {
            Err(EngineError::DomainMismatch)
        }
    }

    /// Pointwise equality.
    pub fn eq(&self, other: &Self) -> Result<bool, EngineError> {
        self.require_same_domain(other)?;
        Ok(self.values == other.values)
    }

    /// `self(s) <= other(s)` for every state `s`.
    pub fn subset(&self, other: &Self) -> Result<bool, EngineError> {
        self.require_same_domain(other)?;
        Ok(self.values.iter().zip(&other.values).all(|(a, b)| a <= b))
    }

    /// Pointwise maximum.
    pub fn union(&self, other: &Self) -> Result<Self, EngineError> {
        self.require_same_domain(other)?;
        let values = self.values.iter().zip(&other.values).map(|(a, b)| *a.max(b)).collect();
        Ok(Marking { universe: self.universe.clone(), values })
    }

    /// Pointwise minimum.
    pub fn intersect(&self, other: &Self) -> Result<Self, EngineError> {
        self.require_same_domain(other)?;
        let values = self.values.iter().zip(&other.values).map(|(a, b)| *a.min(b)).collect();
        Ok(Marking { universe: self.universe.clone(), values })
    }

    /// Pointwise saturating subtraction: `max(self(s) - other(s), 0)`.
    pub fn diff(&self, other: &Self) -> Result<Self, EngineError> {
        self.require_same_domain(other)?;
        let values = self.values.iter().zip(&other.values).map(|(a, b)| a.saturating_sub(*b)).collect();
        Ok(Marking { universe: self.universe.clone(), values })
    }

    /// The largest multiplicity assigned to any state (0 for the zero
    /// marking).
    pub fn power(&self) -> u32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// The states assigned a nonzero multiplicity.
    pub fn support(&self) -> Vec<S> {
        self.universe
            .states()
            .iter()
            .zip(&self.values)
            .filter(|(_, v)| **v > 0)
            .map(|(s, _)| s.clone())
            .collect()
    }

    /// True iff no state is assigned a multiplicity greater than `k`.
    pub fn is_k_bounded(&self, k: u32) -> bool {
        self.power() <= k
    }

    /// True iff every state in the domain is assigned a multiplicity of at
    /// least 1 (vacuously true over an empty domain).
    pub fn is_trivial(&self) -> bool {
        self.values.iter().all(|v| *v >= 1)
    }

    /// The marking with every multiplicity below `k` floored to 0 and every
    /// multiplicity at or above `k` left unchanged.
    pub fn k_topset(&self, k: u32) -> Self {
        let values = self.values.iter().map(|v| if *v < k { 0 } else { *v }).collect();
        Marking { universe: self.universe.clone(), values }
    }

    /// The marking's entries as `(state, multiplicity)` pairs, sorted by
    /// state.
    pub fn to_sorted_pairs(&self) -> Vec<(S, u32)> {
        self.universe
            .states()
            .iter()
            .cloned()
            .zip(self.values.iter().copied())
            .collect()
    }
}

// Internal equality/hashing used by the search driver's candidate/explored/
// discovered bookkeeping. Deliberately unchecked: within one synthesis run
// every marking is derived from the same `StateUniverse`, so comparing the
// dense value vectors is sufficient and avoids re-validating domains on
// every hash-set lookup.
impl<S> PartialEq for Marking<S> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<S> Eq for Marking<S> {}

impl<S> Hash for Marking<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
    }
}

impl<S: Clone + Ord + fmt::Debug> fmt::Debug for Marking<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.to_sorted_pairs()).finish()
    }
}
