// pursuit_sim/src/simulation/config/catalog.rs

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// Walks `root` and returns every `.toml` file below it, sorted so that runs
/// are reproducible.
pub fn discover_scenarios(root: &Path) -> Vec<PathBuf> {
    if !root.exists() {
        warn!(
            "Scenario directory not found at {:?}, nothing to run.",
            root
        );
        return Vec::new();
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| {
            !e.file_type().is_dir() && e.path().extension().map_or(false, |ext| ext == "toml")
        })
        .map(|e| e.into_path())
        .collect();
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn finds_nested_toml_files_in_order() {
        Jail::expect_with(|jail| {
            jail.create_dir("scenarios/extra")?;
            jail.create_file("scenarios/b.toml", "")?;
            jail.create_file("scenarios/a.toml", "")?;
            jail.create_file("scenarios/extra/c.toml", "")?;
            jail.create_file("scenarios/notes.md", "")?;

            let found = discover_scenarios(Path::new("scenarios"));
            let names: Vec<_> = found
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                .collect();
            assert_eq!(names, ["a.toml", "b.toml", "c.toml"]);
            Ok(())
        });
    }

    #[test]
    fn missing_directory_yields_nothing() {
        assert!(discover_scenarios(Path::new("definitely/not/here")).is_empty());
    }
}
