//! Project manifest detection for prompt context.
//!
//! Scans a directory for known dependency manifests and renders a short
//! human-readable summary that the pipeline prepends to its first prompt.
//! Detection is read-only; a malformed manifest fails the whole call rather
//! than being skipped, so a broken manifest surfaces before any assistant
//! call is made.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

/// Returned verbatim when none of the known manifests are present.
pub const NO_PROJECT_SENTENCE: &str =
    "No known project structure detected in the current directory.";

struct ProjectInfo {
    ecosystem: &'static str,
    manifest: &'static str,
    name: Option<String>,
    dependencies: Vec<String>,
}

#[derive(Deserialize)]
struct PackageJson {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    dependencies: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "devDependencies", default)]
    dev_dependencies: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct Pubspec {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    dependencies: serde_yaml::Mapping,
    #[serde(rename = "dev_dependencies", default)]
    dev_dependencies: serde_yaml::Mapping,
}

/// Summarize the project manifests found in `dir`.
///
/// Checks, in order: `package.json` (Node.js), `pubspec.yaml`
/// (Flutter/Dart), `requirements.txt` (Python). Every manifest present
/// contributes one labeled block; dependency names keep their declared
/// order.
pub fn detect_project_context(dir: &Path) -> Result<String, Error> {
    let mut projects = Vec::new();

    let package_json = dir.join("package.json");
    if package_json.is_file() {
        projects.push(parse_package_json(&package_json)?);
    }

    let pubspec = dir.join("pubspec.yaml");
    if pubspec.is_file() {
        projects.push(parse_pubspec(&pubspec)?);
    }

    let requirements = dir.join("requirements.txt");
    if requirements.is_file() {
        projects.push(parse_requirements(&requirements, dir)?);
    }

    if projects.is_empty() {
        return Ok(NO_PROJECT_SENTENCE.to_string());
    }

    let blocks: Vec<String> = projects.iter().map(render_block).collect();
    Ok(blocks.join("\n\n"))
}

fn render_block(project: &ProjectInfo) -> String {
    let mut block = format!(
        "Detected {} project ({}):\n  Name: {}",
        project.ecosystem,
        project.manifest,
        project.name.as_deref().unwrap_or("(unnamed)")
    );
    if !project.dependencies.is_empty() {
        block.push_str("\n  Dependencies: ");
        block.push_str(&project.dependencies.join(", "));
    }
    block
}

fn parse_package_json(path: &Path) -> Result<ProjectInfo, Error> {
    let raw = fs::read_to_string(path)?;
    let parsed: PackageJson =
        serde_json::from_str(&raw).map_err(|err| Error::parse(path, err))?;

    let mut dependencies: Vec<String> = parsed.dependencies.keys().cloned().collect();
    dependencies.extend(parsed.dev_dependencies.keys().cloned());

    Ok(ProjectInfo {
        ecosystem: "Node.js",
        manifest: "package.json",
        name: parsed.name,
        dependencies,
    })
}

fn parse_pubspec(path: &Path) -> Result<ProjectInfo, Error> {
    let raw = fs::read_to_string(path)?;
    let parsed: Pubspec =
        serde_yaml::from_str(&raw).map_err(|err| Error::parse(path, err))?;

    let mut dependencies: Vec<String> = mapping_keys(&parsed.dependencies);
    dependencies.extend(mapping_keys(&parsed.dev_dependencies));

    Ok(ProjectInfo {
        ecosystem: "Flutter/Dart",
        manifest: "pubspec.yaml",
        name: parsed.name,
        dependencies,
    })
}

fn mapping_keys(mapping: &serde_yaml::Mapping) -> Vec<String> {
    mapping
        .keys()
        .filter_map(|key| key.as_str())
        .map(str::to_string)
        .collect()
}

fn parse_requirements(path: &Path, dir: &Path) -> Result<ProjectInfo, Error> {
    let raw = fs::read_to_string(path)?;

    let dependencies: Vec<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    // requirements.txt carries no project name; fall back to the directory.
    let name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Python Project".to_string());

    Ok(ProjectInfo {
        ecosystem: "Python",
        manifest: "requirements.txt",
        name: Some(name),
        dependencies,
    })
}
