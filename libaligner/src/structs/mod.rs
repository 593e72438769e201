pub mod profile;
pub use profile::Profile;

pub mod sequence;
pub use sequence::Sequence;
