use std::io::Write;
use std::time::Duration;

use libaligner::align::structs::{Alignment, AlignmentStats};
use libaligner::msa::MultipleAlignment;
use serde::Serialize;

pub const CLUSTAL_BLOCK_WIDTH: usize = 60;

/// The JSON form of a pairwise result.
#[derive(Serialize)]
pub struct PairwiseReport<'a> {
    pub method: String,
    pub alignment: &'a Alignment,
    pub stats: AlignmentStats,
    pub seconds: f64,
}

impl<'a> PairwiseReport<'a> {
    pub fn new(alignment: &'a Alignment, method: &str, elapsed: Duration) -> Self {
        Self {
            method: method.to_string(),
            alignment,
            stats: alignment.stats(),
            seconds: elapsed.as_secs_f64(),
        }
    }
}

pub fn write_pairwise(
    out: &mut impl Write,
    alignment: &Alignment,
    method: &str,
    elapsed: Duration,
) -> anyhow::Result<()> {
    let stats = alignment.stats();

    writeln!(out, "Alignment Score: {}", alignment.score)?;
    writeln!(out, "{}", alignment.seq_1_aligned)?;
    writeln!(out, "{}", alignment.middle_string())?;
    writeln!(out, "{}", alignment.seq_2_aligned)?;
    writeln!(out)?;
    writeln!(out, "Method: {method}")?;
    writeln!(
        out,
        "Seq 1: {}-{}  Seq 2: {}-{}",
        alignment.seq_1_start, alignment.seq_1_end, alignment.seq_2_start, alignment.seq_2_end
    )?;
    writeln!(
        out,
        "Length: {}  Identities: {} ({:.1}%)  Gaps: {}",
        stats.length,
        stats.identities,
        stats.identity_fraction * 100.0,
        stats.gaps
    )?;
    writeln!(out, "Time: {:.2} sec", elapsed.as_secs_f64())?;
    Ok(())
}

pub fn write_msa(
    out: &mut impl Write,
    msa: &MultipleAlignment,
    names: &[String],
    clustal: bool,
    elapsed: Duration,
) -> anyhow::Result<()> {
    if clustal {
        write_clustal(out, msa, names)?;
    } else {
        for (name, row) in names.iter().zip(&msa.rows) {
            writeln!(out, "{name}: {row}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Consensus: {}", msa.consensus)?;
    writeln!(out, "Time: {:.2} sec", elapsed.as_secs_f64())?;
    Ok(())
}

fn write_clustal(
    out: &mut impl Write,
    msa: &MultipleAlignment,
    names: &[String],
) -> anyhow::Result<()> {
    let name_width = names.iter().map(|name| name.len()).max().unwrap_or(0);

    writeln!(out, "CLUSTAL format")?;
    writeln!(out)?;

    for block_start in (0..msa.width()).step_by(CLUSTAL_BLOCK_WIDTH) {
        let block_end = (block_start + CLUSTAL_BLOCK_WIDTH).min(msa.width());
        for (name, row) in names.iter().zip(&msa.rows) {
            writeln!(out, "{name:<name_width$} {}", &row[block_start..block_end])?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
