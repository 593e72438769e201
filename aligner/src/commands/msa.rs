use std::time::Instant;

use libaligner::msa::{multiple_sequence_alignment, MsaParamsBuilder, TieBreak};
use log::info;

use crate::args::MsaArgs;
use crate::io::read_fasta;
use crate::output::{write_json, write_msa};
use crate::util::PathBufExt;

use super::{finish, scheme_from_args};

pub fn msa(args: &MsaArgs) -> anyhow::Result<()> {
    let seqs = read_fasta(&args.seqs_path, args.scoring_args.subsample)?;
    info!("read {} sequences from {}", seqs.len(), args.seqs_path.to_string_lossy());

    let params = MsaParamsBuilder::default()
        .scheme(scheme_from_args(&args.scoring_args)?)
        .threads(args.common_args.num_threads)
        .tie_break(match args.seed {
            Some(seed) => TieBreak::Seeded(seed),
            None => TieBreak::Lowest,
        })
        .build()?;

    let now = Instant::now();
    let msa = multiple_sequence_alignment(&seqs, &params)?;
    let elapsed = now.elapsed();
    info!(
        "aligned {} sequences over {} columns in {elapsed:.2?}",
        msa.rows.len(),
        msa.width()
    );

    let mut out = args
        .output_args
        .path
        .open(args.common_args.allow_overwrite)?;

    if args.output_args.json {
        write_json(&mut out, &msa)?;
    } else {
        let names: Vec<String> = seqs.iter().map(|seq| seq.name.clone()).collect();
        write_msa(&mut out, &msa, &names, args.clustal, elapsed)?;
    }

    finish(out, &args.output_args.path, "multiple alignment")
}
