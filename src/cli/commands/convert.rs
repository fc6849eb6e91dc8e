//! Convert command implementation
//!
//! Normalizes a captured REST payload the same way the sync module does
//! before pushing it to a peer server. Useful for inspecting what a record
//! will look like on the wire.

use crate::config::load_config_or_default;
use crate::core::normalize::{BatchSummary, Normalizer};
use anyhow::Context;
use clap::{ArgGroup, Args};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Arguments for the convert command
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["resource", "path"])))]
pub struct ConvertArgs {
    /// Resource type key (e.g. obs, person, visit, encounter)
    #[arg(short, long)]
    pub resource: Option<String>,

    /// REST request path to derive the resource type from (e.g. /ws/rest/v1/obs)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Input JSON file (reads stdin when omitted or "-")
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output file (writes stdout when omitted or "-")
    #[arg(short, long)]
    pub output: Option<String>,

    /// Pretty-print the converted JSON
    #[arg(long)]
    pub pretty: bool,
}

impl ConvertArgs {
    /// Execute the convert command
    ///
    /// Exit codes: 0 on success, 1 if some records in an array were
    /// rejected, 2 on configuration errors.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("Error: {e}");
                return Ok(2);
            }
        };
        let normalizer = Normalizer::from_config(&config);

        let resource_type = match (&self.resource, &self.path) {
            (Some(resource), _) => resource.clone(),
            (None, Some(path)) => normalizer
                .resource_type_for_path(path)
                .with_context(|| format!("Cannot derive a resource type from {path}"))?
                .into_inner(),
            (None, None) => anyhow::bail!("Either --resource or --path is required"),
        };

        let raw = self.read_input().await?;
        let document: Value =
            serde_json::from_str(&raw).context("Input is not valid JSON")?;

        let (converted, summary) = convert_document(&normalizer, &resource_type, document)?;

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&converted)?
        } else {
            serde_json::to_string(&converted)?
        };
        self.write_output(&rendered).await?;

        tracing::info!(
            resource_type = %summary.resource_type,
            total = summary.total,
            converted = summary.converted,
            failed = summary.failures.len(),
            fields_collapsed = summary.fields_collapsed,
            fields_removed = summary.fields_removed,
            unresolved_attributes = summary.unresolved_attributes,
            "Conversion finished"
        );

        Ok(if summary.is_complete() { 0 } else { 1 })
    }

    async fn read_input(&self) -> anyhow::Result<String> {
        match self.input.as_deref() {
            Some(path) if path != "-" => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read input file {path}")),
            _ => {
                let mut buffer = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buffer)
                    .await
                    .context("Failed to read stdin")?;
                Ok(buffer)
            }
        }
    }

    async fn write_output(&self, rendered: &str) -> anyhow::Result<()> {
        match self.output.as_deref() {
            Some(path) if path != "-" => tokio::fs::write(path, format!("{rendered}\n"))
                .await
                .with_context(|| format!("Failed to write output file {path}")),
            _ => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(rendered.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
                Ok(())
            }
        }
    }
}

/// Converts a parsed JSON document
///
/// An array is converted as a batch; anything else as a single record.
///
/// # Errors
///
/// Returns an error if a single (non-array) document is not a JSON object.
pub fn convert_document(
    normalizer: &Normalizer,
    resource_type: &str,
    document: Value,
) -> anyhow::Result<(Value, BatchSummary)> {
    match document {
        Value::Array(mut records) => {
            let summary = normalizer.convert_batch(resource_type, &mut records);
            Ok((Value::Array(records), summary))
        }
        mut record => {
            let outcome = normalizer
                .convert(resource_type, &mut record)
                .context("Cannot convert input document")?;
            let mut summary = BatchSummary::new(outcome.resource_type.clone(), 1);
            summary.add_outcome(&outcome);
            Ok((record, summary))
        }
    }
}
