//! `docbundle build` command implementation.

use std::path::PathBuf;

use clap::Args;
use docbundle_config::CliSettings;
use docbundle_tree::{TreeStats, render, write_bundle};

use super::input::InputArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Bundle path (default: bundle.json on the primary branch, bundleDev.json otherwise).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let prepared = self.input.prepare(CliSettings {
            output_file: self.output,
            pretty: self.pretty.then_some(true),
            ..CliSettings::default()
        })?;

        output.info(&format!("Source: {}", prepared.source_dir().display()));
        output.info(&format!("Branch: {}", prepared.branch));

        let nodes = prepared.compiler.compile(prepared.source_dir())?;
        let bundle = &prepared.config.bundle_resolved;
        let json = render(&nodes, bundle.pretty)?;
        let path = bundle.output_path(&prepared.branch);
        write_bundle(&path, &json)?;

        let stats = TreeStats::collect(&nodes);
        tracing::info!(
            path = %path.display(),
            documents = stats.documents,
            sections = stats.sections,
            bytes = json.len(),
            "Bundle written"
        );

        output.success(&format!("{} successfully written.", path.display()));
        Ok(())
    }
}
