use crate::OutputFormat;
use crate::util::{CliResult, find_target, load_document};
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use shadowpath_runtime::{Locator, QueryStep, locate};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct LocateArgs {
    /// XML description of the document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    /// Id of the element to locate.
    #[arg(long = "target")]
    pub target: String,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize, Debug, PartialEq)]
struct LocateSummary<'a> {
    target: &'a str,
    expression: &'a str,
    locator: String,
    steps: &'a [QueryStep],
}

impl<'a> LocateSummary<'a> {
    fn new(target: &'a str, locator: &'a Locator) -> Self {
        Self {
            target,
            expression: locator.expression(),
            locator: locator.find_by_js(),
            steps: locator.chain().steps(),
        }
    }
}

pub fn run(args: &LocateArgs) -> CliResult<String> {
    let document = load_document(&args.file)?;
    let target = find_target(&document, &args.target)?;
    let locator = locate(&document, Some(target))?;
    let summary = LocateSummary::new(&args.target, &locator);

    let output = match args.format {
        OutputFormat::Text => render_locate_text(&summary),
        OutputFormat::Json => render_locate_json(&summary)?,
    };
    Ok(output)
}

fn render_locate_text(summary: &LocateSummary<'_>) -> String {
    summary
        .locator
        .if_supports_color(Stream::Stdout, |text| text.fg_rgb::<136, 192, 74>().to_string())
        .to_string()
}

fn render_locate_json(summary: &LocateSummary<'_>) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_support::{page_file, strip_ansi};
    use rstest::rstest;

    fn args(file: &tempfile::NamedTempFile, target: &str, format: OutputFormat) -> LocateArgs {
        LocateArgs { file: file.path().to_path_buf(), target: target.into(), format }
    }

    #[rstest]
    fn text_prints_find_by_js() {
        let file = page_file();
        let output = run(&args(&file, "second", OutputFormat::Text)).expect("locate");
        assert_eq!(
            strip_ansi(&output),
            "@FindByJS(script = return document.querySelector('c-app').shadowRoot\
             .querySelectorAll('li.row')[1])"
        );
    }

    #[rstest]
    fn json_carries_expression_and_steps() {
        let file = page_file();
        let output = run(&args(&file, "note", OutputFormat::Json)).expect("locate");
        let json: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(json["target"], "note");
        assert_eq!(json["expression"], "document.querySelector('p.note')");
        assert_eq!(json["locator"], "@FindByJS(script = return document.querySelector('p.note'))");
        assert_eq!(json["steps"][0]["step"], "descend-unique");
        assert_eq!(json["steps"][0]["selector"], "p.note");
    }

    #[rstest]
    fn unknown_target_fails() {
        let file = page_file();
        assert!(run(&args(&file, "nope", OutputFormat::Text)).is_err());
    }
}
