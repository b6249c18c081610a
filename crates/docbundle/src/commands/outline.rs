//! `docbundle outline` command implementation.

use clap::Args;
use docbundle_config::CliSettings;
use docbundle_tree::{Node, TreeStats};

use super::input::InputArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the outline command.
#[derive(Args)]
pub(crate) struct OutlineArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Show each node's URL instead of its name.
    #[arg(long)]
    urls: bool,
}

impl OutlineArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let show_urls = self.urls;

        let prepared = self.input.prepare(CliSettings::default())?;
        let nodes = prepared.compiler.compile(prepared.source_dir())?;

        for line in outline_lines(&nodes, show_urls) {
            if line.section {
                output.highlight(&line.label);
            } else {
                output.detail(&line.label, &line.detail);
            }
        }

        let stats = TreeStats::collect(&nodes);
        output.info(&format!(
            "{} documents in {} sections (depth {})",
            stats.documents, stats.sections, stats.depth
        ));
        Ok(())
    }
}

/// One printable outline row.
#[derive(Debug, PartialEq, Eq)]
struct OutlineLine {
    label: String,
    detail: String,
    section: bool,
}

/// Flatten the tree into indented rows in compiled order.
fn outline_lines(nodes: &[Node], show_urls: bool) -> Vec<OutlineLine> {
    let mut lines = Vec::new();
    push_lines(nodes, 0, show_urls, &mut lines);
    lines
}

fn push_lines(nodes: &[Node], depth: usize, show_urls: bool, lines: &mut Vec<OutlineLine>) {
    let indent = "  ".repeat(depth);
    for node in nodes {
        let detail = if show_urls {
            node.url.clone()
        } else {
            node.name.clone()
        };
        if node.is_section() {
            lines.push(OutlineLine {
                label: format!("{indent}{}/", node.title),
                detail,
                section: true,
            });
            push_lines(node.children(), depth + 1, show_urls, lines);
        } else {
            lines.push(OutlineLine {
                label: format!("{indent}{}", node.title),
                detail,
                section: false,
            });
        }
    }
}
