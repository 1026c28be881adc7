//! Command-line interface definition

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Builds the argument parser for the `extract_landsat_hms` binary
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("extract_landsat_hms")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Print the HHMMSS sensing time of a Landsat HDF4 or GeoTIFF scene")
        .arg(
            Arg::new("input")
                .help("Input scene (HDF4 or GeoTIFF)")
                .value_name("INPUT")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print debug diagnostics on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .help("Container format of the input file")
                .value_name("FORMAT")
                .value_parser(["auto", "hdf4", "tiff"])
                .default_value("auto"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Also append diagnostics to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("list-attributes")
                .long("list-attributes")
                .help("Print all global attributes as KEY=VALUE instead of the sensing time")
                .action(ArgAction::SetTrue),
        )
}
