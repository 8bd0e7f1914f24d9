//! flowkit: install Copilot workflow templates into a project
//!
//! Layers, innermost first: `domain` (pure install model), `application`
//! (services over the filesystem trait), `infrastructure` (real I/O and
//! wiring), `cli` (argument parsing, dispatch, console output).

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
