//! CLI subcommand modules.
//!
//! This module contains the implementations for all warroom CLI subcommands.

pub(crate) mod config;
pub(crate) mod evaluate;
pub(crate) mod record;
pub(crate) mod sources;
