use crate::cli::{OutputFormat, ParseArgs};
use anyhow::Context;
use diagnorm::issue::Report;
use diagnorm::output::{render_markdown, render_text};
use diagnorm::parser::{registry, ParseOptions};
use diagnorm::runner::with_fingerprints;
use std::fs;
use tracing::{debug, info};

pub fn execute(args: ParseArgs) -> anyhow::Result<()> {
    let descriptor = registry::find(&args.tool)?;
    let mut options = ParseOptions::default();
    if let Some(limit) = args.max_continuation_lines {
        options.max_continuation_lines = limit;
    }

    let mut reports = Vec::with_capacity(args.files.len());
    for file in &args.files {
        let content =
            fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;

        // Fresh parser per file, nothing is shared between reports
        let mut parser = descriptor.create(options)?;
        let report = parser
            .parse(&content)
            .with_context(|| format!("Failed to parse {:?} as {}", file, descriptor.name))?;
        info!(
            "{:?}: {} issues, {} errors",
            file,
            report.len(),
            report.errors().len()
        );

        reports.push(if args.fingerprint {
            with_fingerprints(report)
        } else {
            report
        });
    }

    let rendered = render(&reports, args.format)?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("Failed to write {:?}", path))?;
            debug!("Wrote {:?}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn render(reports: &[Report], format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json if reports.len() == 1 => serde_json::to_string_pretty(&reports[0])? + "\n",
        OutputFormat::Json => serde_json::to_string_pretty(reports)? + "\n",
        OutputFormat::Text => reports.iter().map(render_text).collect(),
        OutputFormat::Markdown => reports.iter().map(render_markdown).collect(),
    })
}
