use crate::OutputFormat;
use crate::util::{CliResult, find_target, load_document};
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use shadowpath_core::DomTree;
use shadowpath_dom_mock::{MockDocument, NodeId};
use shadowpath_runtime::{EntryRole, QueryStep, ShadowPath, find_path, resolve_path};
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    #[arg(long = "target")]
    pub target: String,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize, Debug, PartialEq)]
struct EntrySummary {
    node: String,
    id: Option<String>,
    selector: String,
    role: EntryRole,
}

#[derive(Serialize, Debug, PartialEq)]
struct PathSummary {
    target: String,
    boundaries: usize,
    entries: Vec<EntrySummary>,
    steps: Vec<QueryStep>,
}

pub fn run(args: &PathArgs) -> CliResult<String> {
    let document = load_document(&args.file)?;
    let target = find_target(&document, &args.target)?;
    let path = find_path(&document, Some(target)).ok_or("target has no path")?;
    let chain = resolve_path(&document, &path)?;
    let summary = PathSummary {
        target: args.target.clone(),
        boundaries: path.boundary_count(),
        entries: summarize_entries(&document, &path),
        steps: chain.steps().to_vec(),
    };

    let output = match args.format {
        OutputFormat::Text => render_path_text(&summary),
        OutputFormat::Json => render_path_json(&summary)?,
    };
    Ok(output)
}

fn summarize_entries(document: &MockDocument, path: &ShadowPath<NodeId>) -> Vec<EntrySummary> {
    path.outer_to_inner()
        .map(|entry| EntrySummary {
            node: document.node_name(entry.node()).into_owned(),
            id: document.id_of(entry.node()).map(str::to_owned),
            selector: entry.selector().to_string(),
            role: entry.role(),
        })
        .collect()
}

fn format_step(step: &QueryStep) -> String {
    match step {
        QueryStep::DescendUnique { selector } => format!("descend {selector}"),
        QueryStep::DescendIndexed { selector, index } => format!("descend {selector} [{index}]"),
        QueryStep::EnterNestedScope => "enter shadow root".to_owned(),
    }
}

fn colorize_selector(selector: &str) -> String {
    selector
        .if_supports_color(Stream::Stdout, |text| text.bold().fg_rgb::<79, 166, 255>().to_string())
        .to_string()
}

fn colorize_role(role: &str) -> String {
    role.if_supports_color(Stream::Stdout, |text| text.dimmed().to_string()).to_string()
}

fn render_path_text(summary: &PathSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(&mut output, "Target: {} (shadow boundaries: {})", summary.target, summary.boundaries);
    let _ = writeln!(&mut output, "Path:");
    for (depth, entry) in summary.entries.iter().enumerate() {
        let role = match entry.role {
            EntryRole::Target => "target",
            EntryRole::ShadowHost => "shadow host",
        };
        let id = entry.id.as_deref().map(|id| format!(" #{id}")).unwrap_or_default();
        let _ = writeln!(
            &mut output,
            "  {depth}. {}{id} ({})",
            colorize_selector(&entry.selector),
            colorize_role(role)
        );
    }
    let _ = writeln!(&mut output, "Steps:");
    for step in &summary.steps {
        let _ = writeln!(&mut output, "  - {}", format_step(step));
    }
    output.trim_end().to_owned()
}

fn render_path_json(summary: &PathSummary) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}
