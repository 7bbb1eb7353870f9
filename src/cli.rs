use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use crate::dump;
use crate::graph::GraphLts;
use crate::intern::InternerTables;
use crate::tab_delim;

/// Synthesizes the minimal k-bounded regions of an observed transition
/// system via the theory of regions.
#[derive(Parser, Debug)]
#[command(name = "sapn")]
pub struct Opt {
    /// Bound on region multiplicities (must be positive).
    #[arg(short = 'k', long = "bound", default_value_t = 1)]
    k: u32,

    /// Print per-iteration progress to the log (also controlled by
    /// RUST_LOG).
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Suppress the wall-clock timing line.
    #[arg(long = "skip-timing")]
    skip_timing: bool,

    /// Directory to write `regions.facts`/`regions.json` into; stdout if
    /// omitted.
    #[arg(short = 'o', long = "output")]
    output_directory: Option<PathBuf>,

    /// One or more directories, each containing a `transitions.facts` and
    /// an optional `initial.facts`.
    #[arg(required = true)]
    fact_dirs: Vec<PathBuf>,
}

pub fn main(opt: Opt) -> Result<()> {
    if opt.k == 0 {
        bail!("`-k`/`--bound` must be a positive integer, got 0");
    }

    if opt.verbose {
        info!("verbose mode requested; set RUST_LOG=debug for per-iteration detail");
    }

    for facts_dir in &opt.fact_dirs {
        let mut tables = InternerTables::new();

        let outcome: Result<(Duration, sapn_engine::SynthesisResult<crate::facts::StateId>)> = (|| {
            let raw = tab_delim::load_tab_delimited_facts(&mut tables, facts_dir)
                .with_context(|| format!("loading facts from {}", facts_dir.display()))?;
            let lts = GraphLts::build(&raw, tables.states.len());
            let (duration, result) = timed(|| sapn_engine::synthesize_minimal_regions(&lts, opt.k));
            Ok((duration, result?))
        })();

        match outcome {
            Ok((duration, result)) => {
                println!("--------------------------------------------------");
                println!("Directory: {}", facts_dir.display());
                if !opt.skip_timing {
                    let seconds = duration.as_secs() as f64;
                    let millis = duration.subsec_nanos() as f64 * 0.000_000_001_f64;
                    println!("Time: {:0.3}s", seconds + millis);
                }
                println!("Regions: {} ({} iterations)", result.regions.len(), result.iterations);
                dump::dump_result(&result, &tables, opt.output_directory.as_deref(), opt.verbose)
                    .with_context(|| format!("writing regions for {}", facts_dir.display()))?;
            }
            Err(error) => {
                eprintln!("`{}`: {:#}", facts_dir.display(), error);
            }
        }
    }

    Ok(())
}

fn timed<T>(op: impl FnOnce() -> T) -> (Duration, T) {
    let start = Instant::now();
    let output = op();
    (start.elapsed(), output)
}
