//! CLI command implementations
//!
//! This module contains implementations of the commands supported by the
//! CLI application using the Command pattern.

pub mod command_traits;
pub mod extract_hms_command;
pub mod list_attributes_command;

pub use command_traits::{Command, CommandFactory};
pub use extract_hms_command::ExtractHmsCommand;
pub use list_attributes_command::ListAttributesCommand;

use clap::ArgMatches;

use crate::dataset::RasterFormat;
use crate::errors::{RasterError, RasterResult};

/// Factory for creating command instances based on CLI arguments
pub struct SensingTimeCommandFactory;

impl SensingTimeCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        SensingTimeCommandFactory
    }
}

impl Default for SensingTimeCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for SensingTimeCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> RasterResult<Box<dyn Command>> {
        if args.get_flag("list-attributes") {
            Ok(Box::new(ListAttributesCommand::new(args)?))
        } else {
            Ok(Box::new(ExtractHmsCommand::new(args)?))
        }
    }
}

/// Input path argument
pub(crate) fn input_file(args: &ArgMatches) -> RasterResult<String> {
    args.get_one::<String>("input")
        .cloned()
        .ok_or_else(|| RasterError::GenericError("Missing input file".to_string()))
}

/// Format forced with `--format`, None for detection
pub(crate) fn requested_format(args: &ArgMatches) -> RasterResult<Option<RasterFormat>> {
    match args.get_one::<String>("format").map(String::as_str) {
        None | Some("auto") => Ok(None),
        Some(name) => name.parse().map(Some),
    }
}
