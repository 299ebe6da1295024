use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy)]
enum ResponseMode {
    Json,
    Raw,
}

mod commands;
mod output;
mod tty;

use commands::{demo, error, schema, transform};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "rekey")]
#[command(version = VERSION)]
#[command(about = "Rename keys in JSON documents by dotted path")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename keys in a JSON document using a path schema
    Transform(transform::TransformArgs),
    /// Inspect a schema or check it against a document
    Schema(schema::SchemaArgs),
    /// Run the built-in sample mapping
    Demo(demo::DemoArgs),
    /// Describe error codes
    Error(error::ErrorArgs),
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Transform(args) if args.raw => ResponseMode::Raw,
        Commands::Demo(args) if args.raw => ResponseMode::Raw,
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    match response_mode(&cli.command) {
        ResponseMode::Raw => {
            let exit_code = output::print_raw_result(commands::run_raw(cli.command, &global));
            std::process::ExitCode::from(exit_code_to_u8(exit_code))
        }
        ResponseMode::Json => {
            let (json_result, exit_code) = commands::run_json(cli.command, &global);
            if output::print_json_result(json_result).is_err() {
                return std::process::ExitCode::from(1);
            }
            std::process::ExitCode::from(exit_code_to_u8(exit_code))
        }
    }
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
