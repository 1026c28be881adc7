//! Command pattern interfaces
//!
//! This module defines the core Command pattern interfaces
//! for the CLI application.

use std::io::Write;

use crate::errors::RasterResult;

/// Represents an executable command in the application
pub trait Command {
    /// Execute the command, writing its result to `out`
    ///
    /// Nothing is written unless the whole result is available.
    fn execute(&self, out: &mut dyn Write) -> RasterResult<()>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory {
    /// Create a new Command instance based on CLI arguments
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A command that implements the Command trait, or an error
    fn create_command(&self, args: &clap::ArgMatches) -> RasterResult<Box<dyn Command>>;
}
