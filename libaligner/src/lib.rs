pub mod align;
pub mod alphabet;
pub mod config;
pub mod error;
pub mod matrices;
pub mod msa;
pub mod structs;
pub mod util;

pub use error::AlignError;
