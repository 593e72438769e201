use std::time::Instant;

use libaligner::align::{kmer_seeded_local, smith_waterman};
use libaligner::config::AlignLimits;
use log::info;

use crate::args::LocalArgs;
use crate::io::read_first_sequence;
use crate::output::{write_json, write_pairwise, PairwiseReport};
use crate::util::PathBufExt;

use super::{finish, scheme_from_args};

pub fn local(args: &LocalArgs) -> anyhow::Result<()> {
    let seq_1 = read_first_sequence(&args.seq_1_path, args.scoring_args.subsample)?;
    let seq_2 = read_first_sequence(&args.seq_2_path, args.scoring_args.subsample)?;
    let scheme = scheme_from_args(&args.scoring_args)?;
    let limits = AlignLimits::default();

    let now = Instant::now();
    let (alignment, method) = match args.seed_k {
        Some(kmer_length) => (
            kmer_seeded_local(
                &seq_1.utf8_bytes,
                &seq_2.utf8_bytes,
                kmer_length,
                &scheme,
                &limits,
            )?,
            format!("{kmer_length}-mer seeded smith-waterman"),
        ),
        None => (
            smith_waterman(&seq_1.utf8_bytes, &seq_2.utf8_bytes, &scheme, &limits)?,
            "smith-waterman".to_string(),
        ),
    };
    let elapsed = now.elapsed();
    info!("{method} alignment scored {} in {elapsed:.2?}", alignment.score);

    let mut out = args
        .output_args
        .path
        .open(args.common_args.allow_overwrite)?;

    if args.output_args.json {
        write_json(&mut out, &PairwiseReport::new(&alignment, &method, elapsed))?;
    } else {
        write_pairwise(&mut out, &alignment, &method, elapsed)?;
    }

    finish(out, &args.output_args.path, "alignment")
}
