//! Per-test collection of locators that only work through shadow roots.
//!
//! A test run records every element it looked up; entries whose lookup has
//! to enter at least one shadow tree end up in a plain text report next to
//! the locator that originally found the element.

use crate::locate::locate;
use shadowpath_core::DomTree;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Set to `yes` to enable recording.
pub const RECORD_ENV: &str = "SHADOWPATH_RECORD";
/// Directory the report is written to.
pub const OUTPUT_DIR_ENV: &str = "SHADOWPATH_OUTPUT_DIR";
pub const DEFAULT_OUTPUT_DIR: &str = "target";

const REPORT_SUFFIX: &str = "-lwc-dict.txt";

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("could not write locator dictionary to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecorderConfig {
    enabled: bool,
    output_dir: PathBuf,
    test_name: String,
}

impl RecorderConfig {
    /// Enabled configuration writing to [`DEFAULT_OUTPUT_DIR`].
    pub fn new(test_name: impl Into<String>) -> Self {
        Self { enabled: true, output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR), test_name: test_name.into() }
    }

    /// Reads [`RECORD_ENV`] and [`OUTPUT_DIR_ENV`] from the process environment.
    pub fn from_env(test_name: impl Into<String>) -> Self {
        Self::from_lookup(test_name, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(test_name: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = lookup(RECORD_ENV).is_some_and(|value| value.trim().eq_ignore_ascii_case("yes"));
        let output_dir = lookup(OUTPUT_DIR_ENV)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);
        Self { enabled, output_dir, test_name: test_name.into() }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    /// `<output_dir>/<sanitized test name>-lwc-dict.txt`
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}{REPORT_SUFFIX}", sanitize_file_name(&self.test_name)))
    }
}

/// Replaces every character outside `[A-Za-z0-9-_.]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') { ch } else { '_' })
        .collect()
}

#[derive(Debug)]
pub struct LocatorDictionary {
    config: RecorderConfig,
    entries: BTreeMap<String, String>,
}

impl LocatorDictionary {
    pub fn new(config: RecorderConfig) -> Self {
        Self { config, entries: BTreeMap::new() }
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Locates `target` and keeps the result when it crosses a shadow
    /// boundary. Returns whether an entry was stored.
    ///
    /// Lookups that cannot be resolved are logged and skipped; recording
    /// never fails the surrounding test.
    pub fn record<T>(&mut self, locator: impl Into<String>, tree: &T, target: T::Node) -> bool
    where
        T: DomTree + ?Sized,
    {
        if !self.config.enabled {
            return false;
        }
        let locator = locator.into();
        match locate(tree, Some(target)) {
            Ok(resolved) if resolved.crosses_shadow_boundary() => {
                tracing::debug!(%locator, expression = resolved.expression(), "shadow locator recorded");
                self.entries.insert(locator, resolved.find_by_js());
                true
            }
            Ok(_) => false,
            Err(err) => {
                tracing::warn!(%locator, %err, "skipping locator without shadow path");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, locator: &str) -> Option<&str> {
        self.entries.get(locator).map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(locator, path)| (locator.as_str(), path.as_str()))
    }

    pub fn render(&self) -> String {
        let mut report = String::new();
        let _ = writeln!(report, "Number of locators inside shadowRoot found: {}", self.entries.len());
        report.push('\n');
        for (locator, path) in &self.entries {
            let _ = writeln!(report, "{locator} >>> {path}");
        }
        report
    }

    /// Writes the report and returns its location, or `None` when recording
    /// is disabled.
    pub fn write(&self) -> Result<Option<PathBuf>, DictionaryError> {
        if !self.config.enabled {
            return Ok(None);
        }
        let path = self.config.report_path();
        let io_error = |source| DictionaryError::Io { path: path.clone(), source };
        std::fs::create_dir_all(self.config.output_dir()).map_err(io_error)?;
        std::fs::write(&path, self.render()).map_err(io_error)?;
        tracing::info!(path = %path.display(), entries = self.entries.len(), "locator dictionary written");
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use shadowpath_dom_mock::MockDocument;
    use std::collections::HashMap;

    #[fixture]
    fn document() -> MockDocument {
        MockDocument::default()
    }

    fn lookup(values: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> =
            values.iter().map(|(key, value)| ((*key).to_owned(), (*value).to_owned())).collect();
        move |key| values.get(key).cloned()
    }

    #[rstest]
    #[case::yes("yes", true)]
    #[case::upper("YES", true)]
    #[case::other("true", false)]
    #[case::empty("", false)]
    fn record_switch_requires_yes(#[case] value: &str, #[case] enabled: bool) {
        let config = RecorderConfig::from_lookup("t", lookup(&[(RECORD_ENV, value)]));
        assert_eq!(config.enabled(), enabled);
    }

    #[rstest]
    fn unset_environment_disables_recording() {
        let config = RecorderConfig::from_lookup("t", lookup(&[]));
        assert!(!config.enabled());
        assert_eq!(config.output_dir(), Path::new(DEFAULT_OUTPUT_DIR));
    }

    #[rstest]
    fn output_dir_comes_from_environment() {
        let config = RecorderConfig::from_lookup("t", lookup(&[(OUTPUT_DIR_ENV, "/tmp/reports")]));
        assert_eq!(config.output_dir(), Path::new("/tmp/reports"));
    }

    #[rstest]
    #[case("LoginTest.testSave", "LoginTest.testSave")]
    #[case("suite/case #1", "suite_case__1")]
    #[case("äöü-ok_1", "___-ok_1")]
    fn test_names_are_sanitized(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(sanitize_file_name(name), expected);
    }

    #[rstest]
    fn report_path_uses_dictionary_suffix() {
        let config = RecorderConfig::new("My Test").with_output_dir("out");
        assert_eq!(config.report_path(), Path::new("out").join("My_Test-lwc-dict.txt"));
    }

    #[rstest]
    fn only_shadow_locators_are_kept(document: MockDocument) {
        let mut dictionary = LocatorDictionary::new(RecorderConfig::new("t"));
        let save = document.element_by_id("save-button").expect("save");
        let link = document.element_by_id("help-link").expect("link");

        assert!(dictionary.record("By.id: save-button", &document, save));
        assert!(!dictionary.record("By.id: help-link", &document, link));

        assert_eq!(dictionary.len(), 1);
        let entry = dictionary.get("By.id: save-button").expect("entry");
        assert!(entry.starts_with("@FindByJS(script = return document.querySelector('one-app')"));
    }

    #[rstest]
    fn unresolvable_targets_are_skipped(mut document: MockDocument) {
        let save = document.element_by_id("save-button").expect("save");
        let host = document.element_by_id("save").expect("host");
        document.detach(host);

        let mut dictionary = LocatorDictionary::new(RecorderConfig::new("t"));
        assert!(!dictionary.record("By.id: save-button", &document, save));
        assert!(dictionary.is_empty());
    }

    #[rstest]
    fn disabled_dictionary_records_and_writes_nothing(document: MockDocument) {
        let mut dictionary = LocatorDictionary::new(RecorderConfig::new("t").with_enabled(false));
        let save = document.element_by_id("save-button").expect("save");
        assert!(!dictionary.record("By.id: save-button", &document, save));
        assert!(dictionary.write().expect("write").is_none());
    }

    #[rstest]
    fn report_lists_count_and_entries(document: MockDocument) {
        let mut dictionary = LocatorDictionary::new(RecorderConfig::new("t"));
        for id in ["save-button", "edit-button"] {
            let node = document.element_by_id(id).expect("node");
            dictionary.record(format!("By.id: {id}"), &document, node);
        }
        let report = dictionary.render();
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines[0], "Number of locators inside shadowRoot found: 2");
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with("By.id: edit-button >>> @FindByJS("));
        assert!(lines[3].starts_with("By.id: save-button >>> @FindByJS("));
    }

    #[rstest]
    fn write_creates_the_report_file(document: MockDocument) {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = RecorderConfig::new("Case 1").with_output_dir(dir.path().join("nested"));
        let mut dictionary = LocatorDictionary::new(config);
        let node = document.element_by_id("cancel-button").expect("cancel");
        dictionary.record("By.id: cancel-button", &document, node);

        let path = dictionary.write().expect("write").expect("path");

        assert_eq!(path, dir.path().join("nested").join("Case_1-lwc-dict.txt"));
        let written = std::fs::read_to_string(path).expect("read");
        assert_eq!(written, dictionary.render());
    }
}
