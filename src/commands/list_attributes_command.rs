//! Attribute listing command
//!
//! Prints every global attribute of a scene as `KEY=VALUE`, one per line,
//! in file order.

use std::io::Write;
use clap::ArgMatches;

use crate::api::SensingTimeExtractor;
use crate::commands::command_traits::Command;
use crate::commands::{input_file, requested_format};
use crate::errors::RasterResult;

/// Command for listing global attributes
pub struct ListAttributesCommand {
    /// Path to the input file
    input_file: String,
    /// Extractor configured from the CLI arguments
    extractor: SensingTimeExtractor,
}

impl ListAttributesCommand {
    /// Create a new listing command
    pub fn new(args: &ArgMatches) -> RasterResult<Self> {
        Ok(ListAttributesCommand {
            input_file: input_file(args)?,
            extractor: SensingTimeExtractor::new().with_format(requested_format(args)?),
        })
    }
}

impl Command for ListAttributesCommand {
    fn execute(&self, out: &mut dyn Write) -> RasterResult<()> {
        let attributes = self.extractor.attributes(&self.input_file)?;

        let mut listing = String::new();
        for (key, value) in attributes.iter() {
            listing.push_str(key);
            listing.push('=');
            listing.push_str(value);
            listing.push('\n');
        }

        out.write_all(listing.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
