use crate::util::{CliResult, find_target, load_document};
use clap::Args;
use shadowpath_runtime::{LocatorDictionary, RecorderConfig};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    /// Ids of the elements to record; repeat for several.
    #[arg(long = "target", required = true)]
    pub targets: Vec<String>,
    /// Name the report file is derived from.
    #[arg(long = "test-name")]
    pub test_name: String,
    /// Overrides `SHADOWPATH_OUTPUT_DIR`.
    #[arg(long = "output-dir")]
    pub output_dir: Option<PathBuf>,
}

pub fn run(args: &RecordArgs) -> CliResult<String> {
    let document = load_document(&args.file)?;

    let mut config = RecorderConfig::from_env(args.test_name.as_str()).with_enabled(true);
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }

    let mut dictionary = LocatorDictionary::new(config);
    for id in &args.targets {
        let target = find_target(&document, id)?;
        dictionary.record(format!("By.id: {id}"), &document, target);
    }

    let path = dictionary.write()?.ok_or("locator dictionary is disabled")?;
    Ok(path.display().to_string())
}
