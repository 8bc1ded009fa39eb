use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;

use crate::cli::OutputFormat;
use crate::node::{RunState, TestNode};

const INDENT: &str = "  ";

#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    pub binary: &'a str,
    pub run_state: RunState,
    pub total_tests: usize,
    pub ignored: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<&'a str>,
    pub tree: &'a TestNode,
}

pub struct OutputFormatter;

impl OutputFormatter {
    pub fn format(root: &TestNode, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => {
                let mut rendered = serde_json::to_string_pretty(&Self::build_output(root))?;
                rendered.push('\n');
                Ok(rendered)
            }
            OutputFormat::Tree => Ok(Self::render_tree(root)),
        }
    }

    pub fn build_output(root: &TestNode) -> JsonOutput<'_> {
        JsonOutput {
            binary: &root.full_name,
            run_state: root.run_state,
            total_tests: root.count_cases(),
            ignored: root.count_in_state(RunState::Ignored),
            skip_reason: root.skip_reason(),
            tree: root,
        }
    }

    pub fn render_tree(root: &TestNode) -> String {
        let mut out = String::new();
        render_node(&mut out, root, 0);
        out
    }
}

fn render_node(out: &mut String, node: &TestNode, depth: usize) {
    let marker = match node.run_state {
        RunState::Runnable => "[ok]",
        RunState::Ignored => "[ignored]",
        RunState::NotRunnable => "[not runnable]",
    };

    let _ = write!(out, "{}{marker} {}", INDENT.repeat(depth), node.name);
    if let Some(reason) = node.skip_reason() {
        let _ = write!(out, " ({reason})");
    }
    out.push('\n');

    for child in &node.children {
        render_node(out, child, depth + 1);
    }
}
