use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use rekey::input::parse_json_spec;
use rekey::io::write_file_atomic;
use rekey::keymap;
use rekey::log_status;

use super::{to_pretty, CmdResult, SchemaSourceArgs};

#[derive(Args)]
pub struct TransformArgs {
    /// JSON document (inline, @file, or - for stdin)
    pub input: String,

    #[command(flatten)]
    pub schema: SchemaSourceArgs,

    /// Compile the schema into a path trie before transforming
    #[arg(long)]
    pub compiled: bool,

    /// Print only the transformed document instead of the JSON envelope
    #[arg(long)]
    pub raw: bool,

    /// Write the transformed document to this file
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOutput {
    pub command: String,
    pub schema_paths: usize,
    pub compiled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

fn apply(args: &TransformArgs) -> rekey::Result<(Value, usize)> {
    let schema = args.schema.resolve()?;
    let input = parse_json_spec(&args.input, "input")?;

    let mapped = if args.compiled {
        schema.compile().transform(&input)
    } else {
        keymap::transform(&input, &schema)
    };

    log_status!(
        "transform",
        "Applied {} schema path(s){}",
        schema.len(),
        if args.compiled { " (compiled)" } else { "" }
    );

    Ok((mapped, schema.len()))
}

fn write_output(path: &Path, mapped: &Value) -> rekey::Result<String> {
    let content = to_pretty(mapped)?;
    write_file_atomic(path, &content, "write transformed document")?;
    log_status!("transform", "Wrote {}", path.display());
    Ok(path.display().to_string())
}

pub fn run(args: TransformArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<TransformOutput> {
    let (mapped, schema_paths) = apply(&args)?;

    let (written_to, result) = match &args.output {
        Some(path) => (Some(write_output(path, &mapped)?), None),
        None => (None, Some(mapped)),
    };

    Ok((
        TransformOutput {
            command: "transform".to_string(),
            schema_paths,
            compiled: args.compiled,
            written_to,
            result,
        },
        0,
    ))
}

pub fn run_raw(args: TransformArgs) -> rekey::Result<(String, i32)> {
    let (mapped, _) = apply(&args)?;

    if let Some(path) = &args.output {
        write_output(path, &mapped)?;
        return Ok((String::new(), 0));
    }

    Ok((to_pretty(&mapped)?, 0))
}
