mod alignment;
pub use alignment::{Alignment, AlignmentStats};

mod trace;
pub use trace::{best_step, Trace, TraceStep};

mod trace_matrix;
pub use trace_matrix::{BandedTraceMatrix, TraceGrid, TraceMatrix};
