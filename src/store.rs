//! Flat-file log store shared by the pipeline writer and the browser.
//!
//! One pipeline run becomes one write-once `prs_<timestamp>.prompt.md`
//! file. Filenames embed local time at second resolution, so lexicographic
//! order equals chronological order; same-second runs get a numeric suffix
//! instead of overwriting the earlier entry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::Error;
use crate::pipeline::PipelineRun;

pub const LOG_PREFIX: &str = "prs_";
pub const LOG_SUFFIX: &str = ".prompt.md";

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TRAILING_MARKER: &str = "--- end of prs log ---";

/// Default log directory under the platform data dir.
pub fn default_logs_dir() -> Result<PathBuf, Error> {
    let data = dirs::data_dir()
        .ok_or_else(|| Error::Input("could not resolve a data directory for logs".to_string()))?;
    Ok(data.join("prs").join("logs"))
}

/// Write one run to a fresh log file in `dir` and return its path.
pub fn save_log(dir: &Path, run: &PipelineRun) -> Result<PathBuf, Error> {
    fs::create_dir_all(dir)?;
    let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
    let path = unique_log_path(dir, &stamp);
    fs::write(&path, render_log(run))?;
    tracing::info!(path = %path.display(), "log entry written");
    Ok(path)
}

fn unique_log_path(dir: &Path, stamp: &str) -> PathBuf {
    let base = dir.join(format!("{LOG_PREFIX}{stamp}{LOG_SUFFIX}"));
    if !base.exists() {
        return base;
    }
    // The suffixed names still sort after the base name, so listing order
    // stays chronological.
    let mut counter = 1u32;
    loop {
        let candidate = dir.join(format!("{LOG_PREFIX}{stamp}_{counter}{LOG_SUFFIX}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

fn render_log(run: &PipelineRun) -> String {
    // Section bodies are reproduced verbatim, task heading included.
    format!(
        "# PRS Log - {}\n\n\
         ## Task\n{}\n\n\
         ## Reasoning\n{}\n\n\
         ## Evaluation\n{}\n\n\
         ## Adaptation\n{}\n\n\
         ## Final Output Summary\n{}\n\n\
         {TRAILING_MARKER}\n",
        run.task, run.task, run.reasoning, run.evaluation, run.adaptation, run.result
    )
}

/// All log files in `dir`, lexicographically sorted (chronological).
///
/// A missing directory is an empty store, not an error.
pub fn list_logs(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut logs = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if entry.file_type()?.is_file()
            && name.starts_with(LOG_PREFIX)
            && name.ends_with(LOG_SUFFIX)
        {
            logs.push(entry.path());
        }
    }
    logs.sort();
    Ok(logs)
}

/// Whole file content of one log entry.
pub fn read_log(path: &Path) -> Result<String, Error> {
    Ok(fs::read_to_string(path)?)
}

/// Logs in `dir` whose content contains `keyword`, case-insensitively.
/// Results keep the [`list_logs`] ordering.
pub fn search_logs(dir: &Path, keyword: &str) -> Result<Vec<PathBuf>, Error> {
    let needle = keyword.to_lowercase();
    let mut matches = Vec::new();
    for path in list_logs(dir)? {
        let content = fs::read_to_string(&path)?;
        if content.to_lowercase().contains(&needle) {
            matches.push(path);
        }
    }
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_run() -> PipelineRun {
        PipelineRun {
            task: "Deploy the service".to_string(),
            reasoning: "step by step".to_string(),
            evaluation: "looks sound".to_string(),
            adaptation: "tighten rollout".to_string(),
            result: "final plan".to_string(),
        }
    }

    #[test]
    fn saved_log_contains_every_section_verbatim() {
        let dir = TempDir::new().expect("tempdir");
        let run = sample_run();

        let path = save_log(dir.path(), &run).expect("save");
        let name = path.file_name().and_then(|name| name.to_str()).expect("name");
        assert!(name.starts_with(LOG_PREFIX));
        assert!(name.ends_with(LOG_SUFFIX));

        let content = read_log(&path).expect("read");
        assert!(content.starts_with("# PRS Log - Deploy the service\n"));
        for (heading, body) in [
            ("## Task", run.task.as_str()),
            ("## Reasoning", run.reasoning.as_str()),
            ("## Evaluation", run.evaluation.as_str()),
            ("## Adaptation", run.adaptation.as_str()),
            ("## Final Output Summary", run.result.as_str()),
        ] {
            let section = format!("{heading}\n{body}\n");
            assert!(content.contains(&section), "missing section {heading}");
        }
        assert!(content.trim_end().ends_with(TRAILING_MARKER));
    }

    #[test]
    fn task_heading_text_is_not_escaped() {
        let dir = TempDir::new().expect("tempdir");
        let mut run = sample_run();
        run.task = "# already a heading".to_string();

        let path = save_log(dir.path(), &run).expect("save");
        let content = read_log(&path).expect("read");
        assert!(content.starts_with("# PRS Log - # already a heading\n"));
    }

    #[test]
    fn listing_is_chronological() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("prs_20240102_000000.prompt.md"), "b").expect("write");
        fs::write(dir.path().join("prs_20240101_000000.prompt.md"), "a").expect("write");
        fs::write(dir.path().join("notes.txt"), "ignored").expect("write");

        let logs = list_logs(dir.path()).expect("list");
        let names: Vec<_> = logs
            .iter()
            .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
            .collect();
        assert_eq!(
            names,
            vec!["prs_20240101_000000.prompt.md", "prs_20240102_000000.prompt.md"]
        );
    }

    #[test]
    fn missing_directory_lists_empty() {
        let dir = TempDir::new().expect("tempdir");
        let logs = list_logs(&dir.path().join("nope")).expect("list");
        assert!(logs.is_empty());
    }

    #[test]
    fn same_second_names_get_a_counter_suffix() {
        let dir = TempDir::new().expect("tempdir");
        let stamp = "20240101_000000";
        fs::write(dir.path().join(format!("{LOG_PREFIX}{stamp}{LOG_SUFFIX}")), "first")
            .expect("write");

        let next = unique_log_path(dir.path(), stamp);
        let name = next.file_name().and_then(|name| name.to_str()).expect("name");
        assert_eq!(name, "prs_20240101_000000_1.prompt.md");

        fs::write(&next, "second").expect("write");
        let third = unique_log_path(dir.path(), stamp);
        let name = third.file_name().and_then(|name| name.to_str()).expect("name");
        assert_eq!(name, "prs_20240101_000000_2.prompt.md");

        // Suffixed entries sort after the base entry.
        let logs = list_logs(dir.path()).expect("list");
        assert_eq!(logs.len(), 2);
        assert!(logs[0].to_string_lossy() < logs[1].to_string_lossy());
    }

    #[test]
    fn search_is_case_insensitive_and_sorted() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(
            dir.path().join("prs_20240103_000000.prompt.md"),
            "rollback notes",
        )
        .expect("write");
        fs::write(
            dir.path().join("prs_20240101_000000.prompt.md"),
            "Deploy the api",
        )
        .expect("write");
        fs::write(
            dir.path().join("prs_20240102_000000.prompt.md"),
            "we will DEPLOY tomorrow",
        )
        .expect("write");

        let matches = search_logs(dir.path(), "deploy").expect("search");
        let names: Vec<_> = matches
            .iter()
            .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
            .collect();
        assert_eq!(
            names,
            vec!["prs_20240101_000000.prompt.md", "prs_20240102_000000.prompt.md"]
        );
    }
}
