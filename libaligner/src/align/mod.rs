pub mod structs;

mod scoring;
pub use scoring::{score_add, AffineGap, Score, ScoringScheme, SCORE_FLOOR};

mod affine;
pub use affine::AffineState;

pub(crate) mod needleman_wunsch;
pub use needleman_wunsch::{last_row_scores, needleman_wunsch, GlobalParams};

mod smith_waterman;
pub use smith_waterman::smith_waterman;

pub(crate) mod hirschberg;
pub use hirschberg::hirschberg;

mod kmer_seeded;
pub use kmer_seeded::{kmer_seeded_local, SEED_WINDOW_FLANK};
