use clap::{Arg, Command as ClapCommand, ArgAction};
use log::{error, LevelFilter};
use std::process;

use sizekit::utils::logger::Logger;
use sizekit::commands::{CommandFactory, SizekitCommandFactory};

fn main() {
    let matches = ClapCommand::new("SizeKit")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Report image format and dimensions from header bytes")
        .arg(
            Arg::new("input")
                .help("Input image files")
                .num_args(1..)
                .required_unless_present("list-formats")
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Also write the report to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("formats")
                .long("formats")
                .help("Only try these formats (comma separated, e.g. 'png,jpeg,heic')")
                .value_name("LIST")
                .required(false),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List registered extractors in dispatch order")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let mut log_builder = env_logger::Builder::from_default_env();
    if matches.get_flag("verbose") {
        log_builder.filter_level(LevelFilter::Debug);
    } else if std::env::var_os("RUST_LOG").is_none() {
        log_builder.filter_level(LevelFilter::Warn);
    }
    log_builder.init();

    let logger = match matches.get_one::<String>("output") {
        Some(path) => match Logger::new(path) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error creating report file {}: {}", path, e);
                process::exit(1);
            }
        },
        None => Logger::stdout_only(),
    };

    let factory = SizekitCommandFactory::new();

    let command_result = factory.create_command(&matches, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
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
