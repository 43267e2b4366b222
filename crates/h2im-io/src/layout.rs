//! Discovery of the `Sensitivity_<id>/Run_<id>` result tree.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use h2im_core::{H2imError, H2imResult, ResultFile, SensitivitySettings};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const SENSITIVITY_DIR_PREFIX: &str = "Sensitivity_";
pub const RUN_DIR_PREFIX: &str = "Run_";

/// One (configuration, run) result directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDir {
    pub configuration: u32,
    pub run: u32,
    pub path: PathBuf,
}

impl RunDir {
    pub fn file_path(&self, file: ResultFile) -> PathBuf {
        self.path.join(file.file_name())
    }
}

#[derive(Debug, Clone)]
pub struct ResultLayout {
    root: PathBuf,
    configurations: BTreeMap<u32, BTreeMap<u32, PathBuf>>,
}

impl ResultLayout {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn configuration_ids(&self) -> Vec<u32> {
        self.configurations.keys().copied().collect()
    }

    pub fn run_ids(&self, configuration: u32) -> Vec<u32> {
        self.configurations
            .get(&configuration)
            .map(|runs| runs.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Run ids present under any configuration.
    pub fn all_run_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .configurations
            .values()
            .flat_map(|runs| runs.keys().copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Directories ordered by configuration, then run.
    pub fn run_dirs(&self) -> Vec<RunDir> {
        self.configurations
            .iter()
            .flat_map(|(configuration, runs)| {
                runs.iter().map(move |(run, path)| RunDir {
                    configuration: *configuration,
                    run: *run,
                    path: path.clone(),
                })
            })
            .collect()
    }

    /// Directories in load order: outer loop over runs, inner over configurations.
    pub fn load_order(&self) -> Vec<RunDir> {
        self.all_run_ids()
            .into_iter()
            .flat_map(move |run| {
                self.configurations
                    .iter()
                    .filter_map(move |(configuration, runs)| {
                        runs.get(&run).map(|path| RunDir {
                            configuration: *configuration,
                            run,
                            path: path.clone(),
                        })
                    })
            })
            .collect()
    }

    /// Fails on the first (configuration, run) pair lacking one of `files`.
    pub fn validate(&self, files: &[ResultFile]) -> H2imResult<()> {
        for dir in self.run_dirs() {
            for file in files {
                let path = dir.file_path(*file);
                if !path.is_file() {
                    return Err(H2imError::MissingResultFile(path));
                }
            }
        }
        Ok(())
    }
}

/// Scan `root` for sensitivity and run directories.
pub fn discover_layout(root: &Path) -> Result<ResultLayout> {
    if !root.is_dir() {
        return Err(H2imError::MissingResultTree(root.to_path_buf()).into());
    }

    let mut configurations = BTreeMap::new();
    for (configuration, config_dir) in numbered_subdirs(root, SENSITIVITY_DIR_PREFIX)? {
        let runs: BTreeMap<u32, PathBuf> = numbered_subdirs(&config_dir, RUN_DIR_PREFIX)?
            .into_iter()
            .collect();
        if runs.is_empty() {
            return Err(H2imError::MissingResultTree(config_dir))
                .context("sensitivity directory contains no run directories");
        }
        debug!(configuration, runs = runs.len(), "discovered sensitivity directory");
        configurations.insert(configuration, runs);
    }

    if configurations.is_empty() {
        return Err(H2imError::MissingResultTree(root.to_path_buf()).into());
    }

    Ok(ResultLayout {
        root: root.to_path_buf(),
        configurations,
    })
}

fn numbered_subdirs(dir: &Path, prefix: &str) -> Result<Vec<(u32, PathBuf)>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if let Some(id) = parse_prefixed_id(&name, prefix) {
            found.push((id, entry.path().to_path_buf()));
        }
    }
    Ok(found)
}

/// `Sensitivity_12` with prefix `Sensitivity_` → `Some(12)`.
pub fn parse_prefixed_id(name: &str, prefix: &str) -> Option<u32> {
    name.strip_prefix(prefix)?.parse().ok()
}

/// Cross-check the discovered tree against the configuration file and
/// return a description of every mismatch (each is also logged).
pub fn check_against_settings(layout: &ResultLayout, settings: &SensitivitySettings) -> Vec<String> {
    let mut issues = Vec::new();
    let declared = settings.configuration_ids();
    for id in layout.configuration_ids() {
        if !declared.contains(&id) {
            issues.push(format!(
                "{SENSITIVITY_DIR_PREFIX}{id} has no entry in the sensitivity configuration"
            ));
        }
        let runs = layout.run_ids(id).len();
        if runs != settings.run_count() as usize {
            issues.push(format!(
                "{SENSITIVITY_DIR_PREFIX}{id} holds {runs} run(s), configuration declares {}",
                settings.run_count()
            ));
        }
    }
    let present = layout.configuration_ids();
    for id in declared {
        if !present.contains(&id) {
            issues.push(format!("configuration {id} has no {SENSITIVITY_DIR_PREFIX}{id} directory"));
        }
    }
    for issue in &issues {
        warn!("{issue}");
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn make_tree(root: &Path, pairs: &[(u32, u32)]) {
        for (configuration, run) in pairs {
            fs::create_dir_all(
                root.join(format!("Sensitivity_{configuration}"))
                    .join(format!("Run_{run}")),
            )
            .unwrap();
        }
    }

    #[test]
    fn parses_prefixed_ids() {
        assert_eq!(parse_prefixed_id("Sensitivity_3", SENSITIVITY_DIR_PREFIX), Some(3));
        assert_eq!(parse_prefixed_id("Run_10", RUN_DIR_PREFIX), Some(10));
        assert_eq!(parse_prefixed_id("Run_x", RUN_DIR_PREFIX), None);
        assert_eq!(parse_prefixed_id("plots", RUN_DIR_PREFIX), None);
    }

    #[test]
    fn discovers_configurations_and_runs() {
        let dir = tempdir().unwrap();
        make_tree(dir.path(), &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        fs::create_dir_all(dir.path().join("plots")).unwrap();
        fs::write(dir.path().join("Sensitivity_9"), "not a directory").unwrap();

        let layout = discover_layout(dir.path()).unwrap();
        assert_eq!(layout.configuration_ids(), vec![1, 2]);
        assert_eq!(layout.run_ids(2), vec![1, 2]);
        assert_eq!(layout.run_dirs().len(), 4);
    }

    #[test]
    fn load_order_is_run_major() {
        let dir = tempdir().unwrap();
        make_tree(dir.path(), &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let layout = discover_layout(dir.path()).unwrap();
        let order: Vec<(u32, u32)> = layout
            .load_order()
            .iter()
            .map(|d| (d.run, d.configuration))
            .collect();
        assert_eq!(order, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn empty_root_is_missing_tree() {
        let dir = tempdir().unwrap();
        let err = discover_layout(dir.path()).unwrap_err();
        assert_eq!(h2im_core::exit_code_for(&err), 13);
        let err = discover_layout(&dir.path().join("absent")).unwrap_err();
        assert_eq!(h2im_core::exit_code_for(&err), 13);
    }

    #[test]
    fn configuration_without_runs_is_missing_tree() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Sensitivity_1")).unwrap();
        let err = discover_layout(dir.path()).unwrap_err();
        assert_eq!(h2im_core::exit_code_for(&err), 13);
    }

    #[test]
    fn validate_reports_first_missing_file() {
        let dir = tempdir().unwrap();
        make_tree(dir.path(), &[(1, 1)]);
        let layout = discover_layout(dir.path()).unwrap();
        let run_dir = dir.path().join("Sensitivity_1").join("Run_1");
        for file in &ResultFile::ALL[..3] {
            fs::write(run_dir.join(file.file_name()), "Year\n").unwrap();
        }
        let err = layout.validate(&ResultFile::ALL).unwrap_err();
        match err {
            H2imError::MissingResultFile(path) => {
                assert_eq!(path, run_dir.join(ResultFile::ALL[3].file_name()));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(layout.validate(&ResultFile::ALL[..3]).is_ok());
    }

    #[test]
    fn mismatches_with_settings_are_reported() {
        let dir = tempdir().unwrap();
        make_tree(dir.path(), &[(1, 1), (1, 2), (3, 1)]);
        let layout = discover_layout(dir.path()).unwrap();
        let settings = SensitivitySettings::parse(
            "type: grid\nparameters: [a]\nsensitivity_runs: 2\nsensitivity_1: [1]\nsensitivity_2: [2]\n",
        )
        .unwrap();
        let issues = check_against_settings(&layout, &settings);
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().any(|i| i.contains("Sensitivity_3 has no entry")));
        assert!(issues.iter().any(|i| i.contains("holds 1 run(s)")));
        assert!(issues.iter().any(|i| i.contains("configuration 2 has no")));
    }
}
