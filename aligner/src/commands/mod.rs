mod global;
pub use global::global;

mod local;
pub use local::local;

mod msa;
pub use msa::msa;

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use libaligner::align::ScoringScheme;
use libaligner::matrices::SubstitutionMatrix;

use crate::args::ScoringArgs;

/// The linear-gap scheme described by the shared scoring flags.
pub fn scheme_from_args(args: &ScoringArgs) -> anyhow::Result<ScoringScheme> {
    let scheme = ScoringScheme::new(args.match_score, args.mismatch_score, args.gap_penalty);

    Ok(match &args.matrix {
        Some(name) => scheme.with_matrix(SubstitutionMatrix::named(name)?),
        None => scheme,
    })
}

fn finish(mut out: impl Write, path: &Path, what: &str) -> anyhow::Result<()> {
    out.flush()?;
    println!(
        "{} saved in: {}",
        what.green(),
        path.to_string_lossy().bold()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{assert, check};

    fn scoring_args(matrix: Option<&str>) -> ScoringArgs {
        ScoringArgs {
            match_score: 2,
            mismatch_score: -3,
            gap_penalty: -4,
            matrix: matrix.map(str::to_string),
            subsample: None,
        }
    }

    #[test]
    fn test_scheme_from_args() -> anyhow::Result<()> {
        let scheme = scheme_from_args(&scoring_args(None))?;
        check!(scheme == ScoringScheme::new(2, -3, -4));

        let scheme = scheme_from_args(&scoring_args(Some("blosum62")))?;
        check!(scheme.pair_score(b'W', b'W') == 11);
        Ok(())
    }

    #[test]
    fn test_unknown_matrix() {
        assert!(let Err(_) = scheme_from_args(&scoring_args(Some("PAM1000"))));
    }
}
