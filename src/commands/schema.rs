use clap::{Args, Subcommand};
use serde::Serialize;

use rekey::input::parse_json_spec;
use rekey::keymap::{self, Coverage};

use super::{CmdResult, SchemaSourceArgs};

#[derive(Args)]
pub struct SchemaArgs {
    #[command(subcommand)]
    command: SchemaCommand,
}

#[derive(Subcommand)]
enum SchemaCommand {
    /// Parse a schema and list its entries
    Show {
        #[command(flatten)]
        schema: SchemaSourceArgs,
    },
    /// Report which schema paths match a document
    Coverage {
        /// JSON document (inline, @file, or - for stdin)
        input: String,

        #[command(flatten)]
        schema: SchemaSourceArgs,

        /// Exit with code 1 when any schema path matches nothing
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Serialize)]
pub struct SchemaEntry {
    pub path: String,
    pub rename: String,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum SchemaOutput {
    #[serde(rename = "schema.show")]
    Show {
        paths: usize,
        depth: usize,
        entries: Vec<SchemaEntry>,
    },
    #[serde(rename = "schema.coverage")]
    Coverage {
        complete: bool,
        #[serde(flatten)]
        coverage: Coverage,
    },
}

pub fn run(args: SchemaArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<SchemaOutput> {
    match args.command {
        SchemaCommand::Show { schema } => run_show(&schema),
        SchemaCommand::Coverage {
            input,
            schema,
            strict,
        } => run_coverage(&input, &schema, strict),
    }
}

fn run_show(source: &SchemaSourceArgs) -> CmdResult<SchemaOutput> {
    let schema = source.resolve()?;
    let depth = schema.compile().depth();

    let entries = schema
        .sorted_entries()
        .into_iter()
        .map(|(path, rename)| SchemaEntry {
            path: path.to_string(),
            rename: rename.to_string(),
        })
        .collect();

    Ok((
        SchemaOutput::Show {
            paths: schema.len(),
            depth,
            entries,
        },
        0,
    ))
}

fn run_coverage(input: &str, source: &SchemaSourceArgs, strict: bool) -> CmdResult<SchemaOutput> {
    let schema = source.resolve()?;
    let document = parse_json_spec(input, "input")?;

    let coverage = keymap::coverage(&document, &schema);
    let complete = coverage.is_complete();
    let exit_code = if strict && !complete { 1 } else { 0 };

    Ok((SchemaOutput::Coverage { complete, coverage }, exit_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(schema: &str) -> SchemaSourceArgs {
        SchemaSourceArgs {
            schema: Some(schema.to_string()),
            schema_file: None,
        }
    }

    #[test]
    fn show_lists_sorted_entries() {
        let (output, _) = run_show(&inline(r#"{"users.id": "userId", "id": "key"}"#)).unwrap();
        let value = serde_json::to_value(output).unwrap();

        assert_eq!(value["command"], "schema.show");
        assert_eq!(value["paths"], 2);
        assert_eq!(value["depth"], 2);
        assert_eq!(value["entries"][0]["path"], "id");
        assert_eq!(value["entries"][1]["rename"], "userId");
    }

    #[test]
    fn coverage_strict_fails_on_unmatched() {
        let source = inline(r#"{"id": "userId", "missing": "gone"}"#);
        let (output, exit_code) = run_coverage(r#"[{"id": 1}]"#, &source, true).unwrap();
        let value = serde_json::to_value(output).unwrap();

        assert_eq!(exit_code, 1);
        assert_eq!(value["command"], "schema.coverage");
        assert_eq!(value["complete"], false);
        assert_eq!(value["unmatched"][0], "missing");
        assert_eq!(value["matched"][0]["hits"], 1);
    }

    #[test]
    fn coverage_without_strict_succeeds() {
        let source = inline(r#"{"missing": "gone"}"#);
        let (_, exit_code) = run_coverage(r#"{"id": 1}"#, &source, false).unwrap();
        assert_eq!(exit_code, 0);
    }
}
