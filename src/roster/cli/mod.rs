//! # CLI Behavior
//!
//! This is **one possible UI client** for roster, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and
//! output formatting. For the overall architecture see the crate docs.
//!
//! ## One-shot and Interactive
//!
//! - `roster list` fetches one page and prints it.
//! - `roster browse` keeps a controller alive and reads paging, filter and
//!   toggle commands from the terminal until `q`.
//! - `roster enable|disable|admin|reset-password` act on a single user by id
//!   or email without listing first.
//!
//! Administrator changes and password resets ask for confirmation on the
//! terminal unless `--yes` is given.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch and per-command handlers
//! - `browse`: The interactive pager loop and its input parser
//! - `prompt`: Terminal implementation of the confirmation seam
//! - `render`: Templated output (tables, pager, messages)
//! - `setup`: Argument parsing via clap
//! - `styles`: Named terminal styles
//! - `templates`: Output templates

mod browse;
mod commands;
mod prompt;
mod render;
pub mod setup;
mod styles;
mod templates;

pub use commands::run;
