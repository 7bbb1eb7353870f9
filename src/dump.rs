//! Renders a [`SynthesisResult`] as tab-delimited facts and as JSON.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use sapn_engine::SynthesisResult;
use serde::Serialize;

use crate::facts::StateId;
use crate::intern::InternerTables;

#[derive(Serialize)]
struct MarkingDump {
    index: usize,
    marking: Vec<(String, u32)>,
}

#[derive(Serialize)]
struct ResultDump {
    iterations: u64,
    cancelled: bool,
    regions: Vec<MarkingDump>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explored: Option<Vec<MarkingDump>>,
}

fn marking_dumps<'a>(
    markings: impl IntoIterator<Item = &'a sapn_engine::Marking<StateId>>,
    tables: &InternerTables,
) -> Vec<MarkingDump> {
    markings
        .into_iter()
        .enumerate()
        .map(|(index, marking)| {
            let mut marking: Vec<(String, u32)> = marking
                .to_sorted_pairs()
                .into_iter()
                .map(|(state, mult)| (tables.states.untern(state).to_string(), mult))
                .collect();
            marking.sort_by(|a, b| a.0.cmp(&b.0));
            MarkingDump { index, marking }
        })
        .collect()
}

/// Writes `regions.facts` (tab-delimited `region<TAB>state<TAB>multiplicity`
/// rows) and `regions.json` into `output_directory`, or to stdout if none is
/// given. When `verbose`, also writes the explored set: `explored.facts`
/// alongside `regions.facts`, or the `explored` field of `regions.json`.
pub(crate) fn dump_result(
    result: &SynthesisResult<StateId>,
    tables: &InternerTables,
    output_directory: Option<&Path>,
    verbose: bool,
) -> io::Result<()> {
    let regions = marking_dumps(&result.regions, tables);
    let explored = verbose.then(|| marking_dumps(&result.explored, tables));

    match output_directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            write_facts(&mut File::create(dir.join("regions.facts"))?, &regions)?;
            if let Some(explored) = &explored {
                write_facts(&mut File::create(dir.join("explored.facts"))?, explored)?;
            }
            let json = ResultDump { iterations: result.iterations, cancelled: result.cancelled, regions, explored };
            serde_json::to_writer_pretty(File::create(dir.join("regions.json"))?, &json)?;
        }
        None => {
            write_facts(&mut io::stdout(), &regions)?;
            if let Some(explored) = &explored {
                write_facts(&mut io::stdout(), explored)?;
            }
        }
    }

    Ok(())
}

fn write_facts<W: Write>(w: &mut W, regions: &[MarkingDump]) -> io::Result<()> {
    for region in regions {
        for (state, mult) in &region.marking {
            writeln!(w, "{}\t{}\t{}", region.index, state, mult)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sapn_engine::Marking;

    #[test]
    fn dumps_sorted_pairs_through_the_intern_table() {
        let mut tables = InternerTables::new();
        let s0 = tables.states.intern("s0");
        let s1 = tables.states.intern("s1");
        let marking = Marking::from_pairs(vec![(s0, 1u32), (s1, 0u32)]);
        let result = SynthesisResult { regions: vec![marking], explored: vec![], iterations: 3, cancelled: false };

        let dumps = marking_dumps(&result.regions, &tables);
        assert_eq!(dumps.len(), 1);
        assert_eq!(dumps[0].marking, vec![("s0".to_string(), 1), ("s1".to_string(), 0)]);
    }

    #[test]
    fn explored_set_is_only_dumped_when_verbose() {
        let mut tables = InternerTables::new();
        let s0 = tables.states.intern("s0");
        let marking = Marking::from_pairs(vec![(s0, 1u32)]);
        let result =
            SynthesisResult { regions: vec![marking.clone()], explored: vec![marking], iterations: 1, cancelled: false };

        let explored = false.then(|| marking_dumps(&result.explored, &tables));
        assert!(explored.is_none());
        let explored = true.then(|| marking_dumps(&result.explored, &tables));
        assert_eq!(explored.unwrap().len(), 1);
    }
}
