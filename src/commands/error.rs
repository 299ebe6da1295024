use clap::{Args, Subcommand};
use serde::Serialize;

use rekey::error::{self, ErrorHelp, ErrorHelpSummary};
use rekey::Error;

use super::CmdResult;

#[derive(Args)]
pub struct ErrorArgs {
    #[command(subcommand)]
    command: ErrorCommand,
}

#[derive(Subcommand)]
enum ErrorCommand {
    /// List available error codes
    List,
    /// Explain an error code
    Explain {
        /// Error code (example: `config.invalid_value`)
        code: String,
    },
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ErrorOutput {
    #[serde(rename = "error.list")]
    List { codes: Vec<ErrorHelpSummary> },
    #[serde(rename = "error.explain")]
    Explain { help: ErrorHelp },
}

pub fn run_json(args: ErrorArgs) -> CmdResult<ErrorOutput> {
    match args.command {
        ErrorCommand::List => Ok((
            ErrorOutput::List {
                codes: error::list(),
            },
            0,
        )),
        ErrorCommand::Explain { code } => {
            let Some(code_enum) = error::parse_code(&code) else {
                return Err(Error::validation_unknown_error_code(code));
            };

            Ok((
                ErrorOutput::Explain {
                    help: error::explain(code_enum),
                },
                0,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_known_code() {
        let args = ErrorArgs {
            command: ErrorCommand::Explain {
                code: "config.invalid_value".to_string(),
            },
        };
        let (output, _) = run_json(args).unwrap();
        let value = serde_json::to_value(output).unwrap();
        assert_eq!(value["command"], "error.explain");
        assert_eq!(value["help"]["code"], "config.invalid_value");
    }

    #[test]
    fn explain_unknown_code_fails() {
        let args = ErrorArgs {
            command: ErrorCommand::Explain {
                code: "ssh.auth_failed".to_string(),
            },
        };
        let err = run_json(args).err().unwrap();
        assert_eq!(err.code.as_str(), "validation.unknown_error_code");
    }
}
