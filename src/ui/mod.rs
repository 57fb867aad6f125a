//! Terminal output
//!
//! Report lines from a clean run go through an [`OutputSink`] so tests can
//! capture them; the helper commands (`cache`, `config`) print styled status
//! lines with `console`.

mod output;
mod sink;

pub use output::{section, step_info, step_ok_detail, step_warn_hint};
pub use sink::{BufferSink, OutputSink, StdoutSink};
