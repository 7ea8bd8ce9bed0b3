//! # Roster Architecture
//!
//! Roster is a **UI-agnostic admin user-list client**. The terminal binary is
//! one host for it; anything that can draw a table and ask a yes/no question
//! can drive the same controller.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders tables, prompts on the tty     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - UserListController: query state, latest page, ordering   │
//! │  - Returns view models and CmdResult values                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, window.rs)                   │
//! │  - Paging rules, toggles, password reset, page window math  │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Directory Layer (directory/)                               │
//! │  - Abstract UserDirectory trait                             │
//! │  - HttpDirectory (production), InMemoryDirectory (testing)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never exits the
//! process and never prompts directly. Confirmation goes through the
//! [`confirm::Confirm`] trait so the host decides how to ask.
//!
//! ## Testing Strategy
//!
//! 1. **Commands and window math**: thorough unit tests against
//!    `InMemoryDirectory`.
//! 2. **API**: request sequencing, state carry-over, stale responses.
//! 3. **HTTP directory**: request shape against a one-shot local listener.
//! 4. **CLI**: rendering from view models, plus end-to-end binary tests in
//!    `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: The controller facade
//! - [`commands`]: Paging, fetch, toggle, reset and config logic
//! - [`window`]: Page-number window and index range
//! - [`directory`]: Backend trait and implementations
//! - [`model`]: Core data types (`UserRow`, `Scope`, `QueryState`)
//! - [`confirm`]: Confirmation prompt seam
//! - [`config`]: Configuration management
//! - [`init`]: Wires config, directory and controller together
//! - [`error`]: Error types
//! - `cli`: Argument parsing and templated rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod directory;
pub mod error;
pub mod init;
pub mod model;
pub mod window;
