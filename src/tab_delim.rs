//! Loads `transitions.facts` and `initial.facts` out of a fact directory.

use std::fs::File;
use std::io::{self, prelude::*};
use std::path::Path;

use log::error;

use crate::facts::{EventId, RawFacts, StateId};
use crate::intern::{InternTo, InternerTables};

trait FromTabDelimited<'input>: Sized {
    fn parse(tables: &mut InternerTables, inputs: &mut dyn Iterator<Item = &'input str>) -> Option<Self>;
}

impl<'input, T> FromTabDelimited<'input> for T
where
    &'input str: InternTo<T>,
{
    fn parse(tables: &mut InternerTables, inputs: &mut dyn Iterator<Item = &'input str>) -> Option<Self> {
        let x: &str = inputs.next()?;
        Some(InternTo::intern(tables, x))
    }
}

impl<'input, A, B, C> FromTabDelimited<'input> for (A, B, C)
where
    A: FromTabDelimited<'input>,
    B: FromTabDelimited<'input>,
    C: FromTabDelimited<'input>,
{
    fn parse(tables: &mut InternerTables, inputs: &mut dyn Iterator<Item = &'input str>) -> Option<Self> {
        Some((A::parse(tables, inputs)?, B::parse(tables, inputs)?, C::parse(tables, inputs)?))
    }
}

pub(crate) fn load_tab_delimited_facts(tables: &mut InternerTables, facts_dir: &Path) -> io::Result<RawFacts> {
    let transitions: Vec<(StateId, EventId, StateId)> =
        load_tab_delimited_file(tables, &facts_dir.join("transitions.facts"))?;
    let initial: Vec<StateId> = match load_tab_delimited_file(tables, &facts_dir.join("initial.facts")) {
        Ok(initial) => initial,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => return Err(e),
    };
    Ok(RawFacts { transitions, initial })
}

fn load_tab_delimited_file<Row>(tables: &mut InternerTables, path: &Path) -> io::Result<Vec<Row>>
where
    Row: for<'input> FromTabDelimited<'input>,
{
    let file = File::open(path)?;
    io::BufReader::new(file)
        .lines()
        .enumerate()
        .map(|(index, line)| {
            let line = line?;
            let mut columns = line.split('\t');
            let row = FromTabDelimited::parse(tables, &mut columns).ok_or_else(|| {
                error!("error parsing line {} of `{}`", index + 1, path.display());
                io::Error::new(io::ErrorKind::InvalidData, format!("malformed row in {}", path.display()))
            })?;

            if columns.next().is_some() {
                error!("extra data on line {} of `{}`", index + 1, path.display());
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("extra column in {}", path.display()),
                ));
            }

            Ok(row)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn round_trips_transitions_and_initial() {
        let dir = tempfile::tempdir().unwrap();
        let mut transitions = File::create(dir.path().join("transitions.facts")).unwrap();
        writeln!(transitions, "s0\ta\ts1").unwrap();
        writeln!(transitions, "s1\tb\ts0").unwrap();
        let mut initial = File::create(dir.path().join("initial.facts")).unwrap();
        writeln!(initial, "s0").unwrap();

        let mut tables = InternerTables::new();
        let facts = load_tab_delimited_facts(&mut tables, dir.path()).unwrap();

        assert_eq!(facts.transitions.len(), 2);
        assert_eq!(facts.initial.len(), 1);
        assert_eq!(tables.states.untern(facts.initial[0]), "s0");
    }

    #[test]
    fn missing_initial_facts_is_treated_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut transitions = File::create(dir.path().join("transitions.facts")).unwrap();
        writeln!(transitions, "s0\ta\ts1").unwrap();

        let mut tables = InternerTables::new();
        let facts = load_tab_delimited_facts(&mut tables, dir.path()).unwrap();
        assert!(facts.initial.is_empty());
    }

    #[test]
    fn rejects_a_row_with_too_many_columns() {
        let dir = tempfile::tempdir().unwrap();
        let mut transitions = File::create(dir.path().join("transitions.facts")).unwrap();
        writeln!(transitions, "s0\ta\ts1\textra").unwrap();
        File::create(dir.path().join("initial.facts")).unwrap();

        let mut tables = InternerTables::new();
        assert!(load_tab_delimited_facts(&mut tables, dir.path()).is_err());
    }
}
