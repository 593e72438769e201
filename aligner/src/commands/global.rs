use std::time::Instant;

use libaligner::align::structs::Alignment;
use libaligner::align::{hirschberg, needleman_wunsch, GlobalParams, ScoringScheme};
use libaligner::AlignError;
use log::{info, warn};
use strum::Display;

use crate::args::GlobalArgs;
use crate::io::read_first_sequence;
use crate::output::{write_json, write_pairwise, PairwiseReport};
use crate::util::PathBufExt;

use super::{finish, scheme_from_args};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum GlobalMethod {
    NeedlemanWunsch,
    Banded,
    Affine,
    LinearSpace,
}

pub fn global(args: &GlobalArgs) -> anyhow::Result<()> {
    let seq_1 = read_first_sequence(&args.seq_1_path, args.scoring_args.subsample)?;
    let seq_2 = read_first_sequence(&args.seq_2_path, args.scoring_args.subsample)?;
    info!(
        "aligning {} ({}) against {} ({})",
        seq_1.name,
        seq_1.len(),
        seq_2.name,
        seq_2.len()
    );

    let mut scheme = scheme_from_args(&args.scoring_args)?;
    if let (Some(open), Some(extend)) = (args.gap_open, args.gap_extend) {
        scheme = scheme.with_affine(open, extend);
    }

    let now = Instant::now();
    let (alignment, method) = align(&seq_1.utf8_bytes, &seq_2.utf8_bytes, &scheme, args)?;
    let elapsed = now.elapsed();
    info!("{method} alignment scored {} in {elapsed:.2?}", alignment.score);

    let mut out = args
        .output_args
        .path
        .open(args.common_args.allow_overwrite)?;

    if args.output_args.json {
        write_json(
            &mut out,
            &PairwiseReport::new(&alignment, &method.to_string(), elapsed),
        )?;
    } else {
        write_pairwise(&mut out, &alignment, &method.to_string(), elapsed)?;
    }

    finish(out, &args.output_args.path, "alignment")
}

fn align(
    seq_1: &[u8],
    seq_2: &[u8],
    scheme: &ScoringScheme,
    args: &GlobalArgs,
) -> anyhow::Result<(Alignment, GlobalMethod)> {
    if args.linear_space {
        return Ok((hirschberg(seq_1, seq_2, scheme)?, GlobalMethod::LinearSpace));
    }

    let method = match (scheme.affine, args.band_width) {
        (Some(_), _) => GlobalMethod::Affine,
        (None, Some(_)) => GlobalMethod::Banded,
        (None, None) => GlobalMethod::NeedlemanWunsch,
    };
    let params = GlobalParams {
        band_width: args.band_width,
        ..Default::default()
    };

    match needleman_wunsch(seq_1, seq_2, scheme, &params) {
        Ok(alignment) => Ok((alignment, method)),
        Err(AlignError::SequenceTooLong { length, limit }) if method == GlobalMethod::NeedlemanWunsch => {
            warn!("sequence of length {length} exceeds {limit}, falling back to the linear-space aligner");
            Ok((hirschberg(seq_1, seq_2, scheme)?, GlobalMethod::LinearSpace))
        }
        Err(err) => Err(err.into()),
    }
}
