//! Report data structures for commands.
//!
//! Operations build reports, then commands render them to an [`Output`]
//! target.

mod bake;
mod check;
mod diagnostics;
mod explain;
mod output;

pub use bake::{BakeReport, GenerationResult, PhaseTiming, PreviewResult, WrittenResult};
pub use check::CheckReport;
pub use diagnostics::DiagnosticSummary;
pub use explain::ExplainReport;
pub use output::{Report, TerminalOutput};
