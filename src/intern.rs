use crate::facts::{EventId, StateId};
use rustc_hash::FxHashMap;

/// Names loaded from fact files are arbitrary strings; we intern them to
/// small dense integers so the rest of the pipeline never compares strings.
pub(crate) struct Interner<TargetType: From<usize> + Copy> {
    strings: FxHashMap<String, TargetType>,
    rev_strings: Vec<String>,
}

impl<TargetType> Interner<TargetType>
where
    TargetType: From<usize> + Into<usize> + Copy,
{
    fn new() -> Self {
        Interner { strings: FxHashMap::default(), rev_strings: vec![] }
    }

    pub(crate) fn untern(&self, data: TargetType) -> &str {
        let data: usize = data.into();
        &self.rev_strings[data]
    }

    pub(crate) fn len(&self) -> usize {
        self.rev_strings.len()
    }

    pub(crate) fn intern(&mut self, data: &str) -> TargetType {
        if let Some(&interned) = self.strings.get(data) {
            return interned;
        }

        let index = TargetType::from(self.strings.len());
        self.rev_strings.push(data.to_string());
        *self.strings.entry(data.to_string()).or_insert(index)
    }
}

pub(crate) struct InternerTables {
    pub(crate) states: Interner<StateId>,
    pub(crate) events: Interner<EventId>,
}

impl InternerTables {
    pub(crate) fn new() -> Self {
        InternerTables { states: Interner::new(), events: Interner::new() }
    }
}

pub(crate) trait InternTo<To> {
    fn intern(tables: &mut InternerTables, input: Self) -> To;
}

impl InternTo<StateId> for &str {
    fn intern(tables: &mut InternerTables, input: &str) -> StateId {
        tables.states.intern(input)
    }
}

impl InternTo<EventId> for &str {
    fn intern(tables: &mut InternerTables, input: &str) -> EventId {
        tables.events.intern(input)
    }
}

impl<A, FromA, B, FromB, C, FromC> InternTo<(A, B, C)> for (FromA, FromB, FromC)
where
    FromA: InternTo<A>,
    FromB: InternTo<B>,
    FromC: InternTo<C>,
{
    fn intern(tables: &mut InternerTables, input: (FromA, FromB, FromC)) -> (A, B, C) {
        let (from_a, from_b, from_c) = input;
        (FromA::intern(tables, from_a), FromB::intern(tables, from_b), FromC::intern(tables, from_c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_stable_and_reversible() {
        let mut tables = InternerTables::new();
        let a = tables.states.intern("s0");
        let b = tables.states.intern("s1");
        let a_again = tables.states.intern("s0");
        assert_eq!(a, a_again);
        assert_ne!(a, b);
        assert_eq!(tables.states.untern(a), "s0");
        assert_eq!(tables.states.untern(b), "s1");
    }
}
