use super::{codes, ErrorCode, Hint};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHelpSummary {
    pub code: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHelp {
    pub code: String,
    pub summary: String,
    pub details_schema: serde_json::Value,
    pub hints: Vec<Hint>,
}

pub fn list() -> Vec<ErrorHelpSummary> {
    codes::all_codes()
        .iter()
        .copied()
        .map(|code| {
            let help = explain(code);
            ErrorHelpSummary {
                code: help.code,
                summary: help.summary,
            }
        })
        .collect()
}

fn help(code: ErrorCode, summary: &str, details_schema: serde_json::Value, hint: &str) -> ErrorHelp {
    ErrorHelp {
        code: code.as_str().to_string(),
        summary: summary.to_string(),
        details_schema,
        hints: vec![Hint {
            message: hint.to_string(),
        }],
    }
}

pub fn explain(code: ErrorCode) -> ErrorHelp {
    match code {
        ErrorCode::ConfigInvalidJson => help(
            code,
            "Schema document could not be parsed",
            serde_json::json!({"path":"string","error":"string"}),
            "Fix the syntax of the schema file or inline schema",
        ),
        ErrorCode::ConfigInvalidValue => help(
            code,
            "Schema entry is not a path-to-name string pair",
            serde_json::json!({"key":"string","value":"string?","problem":"string"}),
            "Schema must be a flat object whose values are all strings, e.g. {\"users.id\": \"userId\"}",
        ),
        ErrorCode::ValidationMissingArgument => help(
            code,
            "Missing required CLI argument",
            serde_json::json!({"args":"string[]"}),
            "Rerun the command with the required argument(s)",
        ),
        ErrorCode::ValidationInvalidArgument => help(
            code,
            "Invalid CLI argument",
            serde_json::json!({"field":"string","problem":"string","id":"string?","tried":"string[]?"}),
            "Verify the argument value and try again",
        ),
        ErrorCode::ValidationInvalidJson => help(
            code,
            "Invalid JSON input",
            serde_json::json!({"error":"string","context":"string?","snippet":"string?"}),
            "Validate the JSON you passed to the command",
        ),
        ErrorCode::ValidationUnknownErrorCode => help(
            code,
            "Unknown error code",
            serde_json::json!({"code":"string"}),
            "Run `rekey error list` to list available codes",
        ),
        ErrorCode::InternalIoError => help(
            code,
            "Internal IO error",
            serde_json::json!({"error":"string","context":"string?"}),
            "Check that the referenced file exists and is readable",
        ),
        ErrorCode::InternalJsonError => help(
            code,
            "Internal JSON error",
            serde_json::json!({"error":"string","context":"string?"}),
            "Report as a rekey bug if persistent",
        ),
        ErrorCode::InternalUnexpected => help(
            code,
            "Unexpected internal error",
            serde_json::json!({}),
            "Report as a rekey bug with steps to reproduce",
        ),
    }
}
