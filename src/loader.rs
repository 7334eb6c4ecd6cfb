use crate::error::RegistryError;
use crate::registry::{MacroDef, Registry};
use log::warn;
use miette::NamedSource;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name suffixes recognized as macro registry sources, matching the
/// `**/*.twee-config.{json,yaml,yml}` pattern the editor tooling watches.
const CONFIG_SUFFIXES: [&str; 3] = [".twee-config.json", ".twee-config.yaml", ".twee-config.yml"];

/// On-disk shape of a registry source. Only the `sugarcube-2` section is
/// ours; other dialect sections may coexist in the same file and are
/// ignored here.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(rename = "sugarcube-2")]
    sugarcube_2: Option<ConfigSection>,
}

#[derive(Debug, Deserialize)]
struct ConfigSection {
    #[serde(default)]
    macros: Option<HashMap<String, MacroDef>>,
}

/// Discovers every macro config source under `root` and merges them, in
/// sorted path order, over the built-in macro set. Later sources overwrite
/// colliding names entirely.
///
/// A source that cannot be read or parsed is skipped: the failure is logged,
/// returned in the error list, and the entries merged so far are retained.
/// The (possibly partial) registry is always returned.
pub fn load_workspace(root: &Path) -> (Registry, Vec<RegistryError>) {
    let mut registry = Registry::builtin();
    let mut errors = Vec::new();

    let mut sources = Vec::new();
    discover(root, &mut sources);
    sources.sort();

    for path in sources {
        match load_file(&path) {
            Ok(macros) => registry.extend(macros),
            Err(error) => {
                warn!("skipping macro config {}: {error}", path.display());
                errors.push(error);
            }
        }
    }

    (registry, errors)
}

fn discover(dir: &Path, sources: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            discover(&path, sources);
        } else if is_config_file(&path) {
            sources.push(path);
        }
    }
}

fn is_config_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| {
            CONFIG_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
        })
}

/// Reads and parses a single registry source. Returns the macros from its
/// `sugarcube-2` section; a file without that section contributes nothing.
pub fn load_file(path: &Path) -> Result<HashMap<String, MacroDef>, RegistryError> {
    let display = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|error| RegistryError::Unreadable {
        path: display.clone(),
        reason: error.to_string(),
    })?;
    parse_source(&text, &display)
}

/// Parses a registry source from text. JSON sources go through the same
/// parser; JSON is a YAML subset.
pub fn parse_source(
    text: &str,
    name: &str,
) -> Result<HashMap<String, MacroDef>, RegistryError> {
    let config: ConfigFile =
        serde_yaml::from_str(text).map_err(|error| RegistryError::Malformed {
            path: name.to_string(),
            src: NamedSource::new(name, text.to_string()),
            span: (
                error
                    .location()
                    .map_or(0, |location| location.index())
                    .min(text.len()),
                0,
            )
                .into(),
            reason: error.to_string(),
        })?;
    Ok(config
        .sugarcube_2
        .and_then(|section| section.macros)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_parse_yaml_source() {
        let macros = parse_source(
            "sugarcube-2:\n  macros:\n    note:\n      container: true\n      deprecated: true\n      deprecatedSuggestions:\n        - aside\n",
            "test.twee-config.yaml",
        )
        .unwrap();
        let note = &macros["note"];
        assert!(note.container && note.deprecated);
        assert_eq!(note.deprecated_suggestions, vec!["aside"]);
    }

    #[test]
    fn test_parse_json_source() {
        let macros = parse_source(
            r#"{"sugarcube-2": {"macros": {"note": {"container": true}}}}"#,
            "test.twee-config.json",
        )
        .unwrap();
        assert!(macros["note"].container);
    }

    #[test]
    fn test_missing_section_contributes_nothing() {
        let macros = parse_source("harlowe-3:\n  macros: {}\n", "other.twee-config.yaml").unwrap();
        assert!(macros.is_empty());
    }

    #[test]
    fn test_malformed_source_reports_location() {
        let error = parse_source("sugarcube-2: [broken\n", "bad.twee-config.yaml").unwrap_err();
        match error {
            RegistryError::Malformed { path, .. } => assert_eq!(path, "bad.twee-config.yaml"),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn test_load_workspace_merges_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "a.twee-config.yaml",
            "sugarcube-2:\n  macros:\n    note:\n      container: true\n",
        );
        write(
            dir.path(),
            "b.twee-config.yaml",
            "sugarcube-2:\n  macros:\n    note:\n      container: false\n",
        );

        let (registry, errors) = load_workspace(dir.path());
        assert!(errors.is_empty());
        // b sorts after a, so its whole definition wins.
        assert!(!registry.get("note").unwrap().container);
    }

    #[test]
    fn test_load_workspace_recurses_and_overrides_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("story").join("config");
        fs::create_dir_all(&nested).unwrap();
        write(
            &nested,
            "project.twee-config.yml",
            "sugarcube-2:\n  macros:\n    if:\n      container: false\n",
        );

        let (registry, errors) = load_workspace(dir.path());
        assert!(errors.is_empty());
        assert!(!registry.get("if").unwrap().container);
        // Untouched builtins survive.
        assert!(registry.get("widget").unwrap().container);
    }

    #[test]
    fn test_failing_source_is_skipped_and_others_retained() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.twee-config.yaml", "sugarcube-2: [broken\n");
        write(
            dir.path(),
            "b.twee-config.yaml",
            "sugarcube-2:\n  macros:\n    note: {}\n",
        );

        let (registry, errors) = load_workspace(dir.path());
        assert_eq!(errors.len(), 1);
        assert!(registry.contains("note"));
        assert!(registry.contains("if"));
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "story.twee", "<<if $a>><</if>>");
        write(dir.path(), "notes.yaml", "sugarcube-2:\n  macros:\n    x: {}\n");

        let (registry, errors) = load_workspace(dir.path());
        assert!(errors.is_empty());
        assert!(!registry.contains("x"));
    }
}
