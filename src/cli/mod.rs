//! CLI module for mcp-this - command-line interface and subcommands.
//!
//! Lets a catalog be checked, listed and exercised from a shell without a
//! protocol transport in front of it.

pub mod commands;

pub use commands::Cli;
