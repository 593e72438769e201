use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Subcommand)]
pub enum SubCommands {
    #[command(about = "Globally align two sequences (Needleman-Wunsch, banded, affine, or linear-space)")]
    Global(GlobalArgs),
    #[command(about = "Locally align two sequences (Smith-Waterman, optionally k-mer seeded)")]
    Local(LocalArgs),
    #[command(about = "Progressively align a set of sequences along an average-linkage guide tree")]
    Msa(MsaArgs),
}

#[derive(Parser)]
#[command(name = "aligner")]
#[command(about = "Pairwise and multiple sequence alignment")]
pub struct Cli {
    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// The number of threads that aligner will use
    #[arg(
        short = 't',
        long = "threads",
        default_value_t = 8usize,
        value_name = "n"
    )]
    pub num_threads: usize,

    /// Allow aligner to overwrite files
    #[arg(short = 'q', long = "allow-overwrite", default_value_t = false)]
    pub allow_overwrite: bool,

    /// Log debug messages (RUST_LOG takes precedence)
    #[arg(short = 'v', long = "verbose", default_value_t = false)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ScoringArgs {
    /// The score of two identical symbols
    #[arg(long = "match", default_value_t = 1i32, allow_negative_numbers = true)]
    pub match_score: i32,

    /// The score of two different symbols
    #[arg(long = "mismatch", default_value_t = -1i32, allow_negative_numbers = true)]
    pub mismatch_score: i32,

    /// The score of each gap position
    #[arg(long = "gap", default_value_t = -2i32, allow_negative_numbers = true)]
    pub gap_penalty: i32,

    /// Score symbol pairs with a built-in substitution matrix, e.g. BLOSUM62
    #[arg(long = "matrix", value_name = "NAME")]
    pub matrix: Option<String>,

    /// Truncate every input sequence to its first n symbols (0 keeps the full length)
    #[arg(long = "subsample", value_name = "n")]
    pub subsample: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Where to write the alignment
    #[arg(
        short = 'o',
        long = "output",
        default_value = "alignment.txt",
        value_name = "PATH"
    )]
    pub path: PathBuf,

    /// Write the result as JSON
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// The first sequence; only its first record is used
    #[arg(value_name = "SEQ1.fasta")]
    pub seq_1_path: PathBuf,

    /// The second sequence; only its first record is used
    #[arg(value_name = "SEQ2.fasta")]
    pub seq_2_path: PathBuf,

    /// Only fill DP cells within this distance of the main diagonal
    #[arg(short = 'b', long = "band", value_name = "W")]
    pub band_width: Option<usize>,

    /// Use affine gap costs: the score of the first position of a gap
    #[arg(long = "gap-open", requires = "gap_extend", allow_negative_numbers = true)]
    pub gap_open: Option<i32>,

    /// Use affine gap costs: the score of each following position of a gap
    #[arg(long = "gap-extend", requires = "gap_open", allow_negative_numbers = true)]
    pub gap_extend: Option<i32>,

    /// Always use the linear-space (Hirschberg) aligner
    #[arg(long = "linear-space", default_value_t = false)]
    pub linear_space: bool,

    #[command(flatten)]
    pub scoring_args: ScoringArgs,

    #[command(flatten)]
    pub output_args: OutputArgs,

    #[command(flatten)]
    pub common_args: CommonArgs,
}

#[derive(Debug, Args)]
pub struct LocalArgs {
    /// The first sequence; only its first record is used
    #[arg(value_name = "SEQ1.fasta")]
    pub seq_1_path: PathBuf,

    /// The second sequence; only its first record is used
    #[arg(value_name = "SEQ2.fasta")]
    pub seq_2_path: PathBuf,

    /// Only refine around shared k-mers of this length instead of a full Smith-Waterman
    #[arg(short = 'k', long = "seed-k", value_name = "k")]
    pub seed_k: Option<usize>,

    #[command(flatten)]
    pub scoring_args: ScoringArgs,

    #[command(flatten)]
    pub output_args: OutputArgs,

    #[command(flatten)]
    pub common_args: CommonArgs,
}

#[derive(Debug, Args)]
pub struct MsaArgs {
    /// The sequences to align
    #[arg(value_name = "SEQS.fasta")]
    pub seqs_path: PathBuf,

    /// Write the rows in CLUSTAL format
    #[arg(long = "clustal", default_value_t = false)]
    pub clustal: bool,

    /// Break consensus ties randomly with this seed instead of by lowest symbol
    #[arg(long = "seed", value_name = "n")]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub scoring_args: ScoringArgs,

    #[command(flatten)]
    pub output_args: OutputArgs,

    #[command(flatten)]
    pub common_args: CommonArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{assert, check};

    #[test]
    fn test_global_defaults() {
        let cli = Cli::parse_from(["aligner", "global", "a.fa", "b.fa"]);
        let SubCommands::Global(args) = cli.command else {
            panic!("expected the global subcommand");
        };
        check!(args.scoring_args.match_score == 1);
        check!(args.scoring_args.mismatch_score == -1);
        check!(args.scoring_args.gap_penalty == -2);
        check!(args.output_args.path == PathBuf::from("alignment.txt"));
        check!(args.band_width == None);
        check!(!args.linear_space);
    }

    #[test]
    fn test_negative_scores() {
        let cli = Cli::parse_from([
            "aligner", "global", "a.fa", "b.fa", "--gap", "-5", "--gap-open", "-10", "--gap-extend",
            "-1",
        ]);
        let SubCommands::Global(args) = cli.command else {
            panic!("expected the global subcommand");
        };
        check!(args.scoring_args.gap_penalty == -5);
        check!(args.gap_open == Some(-10));
        check!(args.gap_extend == Some(-1));
    }

    #[test]
    fn test_gap_open_requires_extend() {
        let result = Cli::try_parse_from(["aligner", "global", "a.fa", "b.fa", "--gap-open", "-10"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_msa_flags() {
        let cli = Cli::parse_from(["aligner", "msa", "seqs.fa", "--clustal", "--seed", "3", "-t", "2"]);
        let SubCommands::Msa(args) = cli.command else {
            panic!("expected the msa subcommand");
        };
        check!(args.clustal);
        check!(args.seed == Some(3));
        check!(args.common_args.num_threads == 2);
    }
}
