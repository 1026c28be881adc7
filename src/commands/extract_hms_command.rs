//! Sensing time extraction command
//!
//! Prints the `HHMMSS` acquisition time of a scene with no trailing
//! newline.

use std::io::Write;
use clap::ArgMatches;
use log::debug;

use crate::api::SensingTimeExtractor;
use crate::commands::command_traits::Command;
use crate::commands::{input_file, requested_format};
use crate::errors::RasterResult;

/// Command for printing the sensing time of a scene
pub struct ExtractHmsCommand {
    /// Path to the input file
    input_file: String,
    /// Extractor configured from the CLI arguments
    extractor: SensingTimeExtractor,
}

impl ExtractHmsCommand {
    /// Create a new extraction command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    pub fn new(args: &ArgMatches) -> RasterResult<Self> {
        Ok(ExtractHmsCommand {
            input_file: input_file(args)?,
            extractor: SensingTimeExtractor::new().with_format(requested_format(args)?),
        })
    }
}

impl Command for ExtractHmsCommand {
    fn execute(&self, out: &mut dyn Write) -> RasterResult<()> {
        let hms = self.extractor.extract_hms(&self.input_file)?;
        debug!("Sensing time of {}: {}", self.input_file, hms);

        out.write_all(hms.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
