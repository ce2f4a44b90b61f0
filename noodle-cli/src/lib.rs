//! Noodle CLI - command-line front end for the feedback agents.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands, PlotArgs, RespondArgs};
