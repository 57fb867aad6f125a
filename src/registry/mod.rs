//! Access to the registry through an external management tool
//!
//! No registry API is spoken directly. Every operation is a subprocess
//! invocation of the configured tool:
//! - listing: `<tool> repository show-manifests --name <r> --repository <repo>`
//! - deletion: `<tool> repository delete -y --name <r> --repository <repo> --manifest <digest>`

mod cli;
mod process;

pub use cli::RegistryCli;
pub use process::{command_line, CommandOutput, CommandRunner, SystemRunner};
