//! CLI domain: parse, route and output only.
//! The export itself lives in the engine; routing wires sources and the document around it.

mod output;
mod parse;
mod route;

pub use output::{format_export_summary, map_error, NO_PATHS_MESSAGE};
pub use parse::Cli;
pub use route::{ExportRequest, RunContext};
