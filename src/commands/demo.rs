use clap::Args;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use rekey::demo::{sample_payload, sample_schema};
use rekey::keymap;

use super::{to_pretty, CmdResult};

#[derive(Args)]
pub struct DemoArgs {
    /// Print only the mapped document
    #[arg(long)]
    pub raw: bool,
}

#[derive(Serialize)]
pub struct DemoOutput {
    pub command: String,
    pub input: Value,
    pub schema: BTreeMap<String, String>,
    pub mapped: Value,
}

pub fn run_json(_args: DemoArgs) -> CmdResult<DemoOutput> {
    let input = sample_payload();
    let schema = sample_schema();
    let mapped = keymap::transform(&input, &schema);

    let schema = schema
        .iter()
        .map(|(path, name)| (path.to_string(), name.to_string()))
        .collect();

    Ok((
        DemoOutput {
            command: "demo".to_string(),
            input,
            schema,
            mapped,
        },
        0,
    ))
}

pub fn run_raw() -> rekey::Result<(String, i32)> {
    let mapped = keymap::transform(&sample_payload(), &sample_schema());
    Ok((to_pretty(&mapped)?, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_output_includes_mapping() {
        let (output, exit_code) = run_json(DemoArgs { raw: false }).unwrap();
        assert_eq!(exit_code, 0);
        assert_eq!(output.schema.get("id").map(String::as_str), Some("userId"));
        assert_eq!(output.mapped[1]["userId"], "1");
        assert_eq!(output.input[1]["id"], "1");
    }

    #[test]
    fn raw_output_is_pretty_json() {
        let (content, _) = run_raw().unwrap();
        assert!(content.contains("\"userId\": \"0\""));
        assert!(content.contains("\"name\": \"Maria\""));
    }
}
