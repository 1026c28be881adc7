use std::io;
use std::process;
use log::error;

use landsat_hms::cli::build_cli;
use landsat_hms::commands::{CommandFactory, SensingTimeCommandFactory};
use landsat_hms::utils::logger::Logger;

fn main() {
    let matches = build_cli().get_matches();

    let log_file = matches.get_one::<String>("log-file").map(String::as_str);
    if let Err(e) = Logger::init_global_logger(log_file, matches.get_flag("verbose")) {
        eprintln!("Error setting up global logger: {}", e);
        process::exit(1);
    }

    let factory = SensingTimeCommandFactory::new();

    let command_result = factory.create_command(&matches);
    match command_result {
        Ok(command) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if let Err(e) = command.execute(&mut out) {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
