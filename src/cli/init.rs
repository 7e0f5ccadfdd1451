//! The `init` command: scaffold a new project.
//!
//! Creates the conventional source layout with starter files, including
//! the mobile menu script and a base stylesheet. Existing files are never
//! overwritten.

use anyhow::{Context, Result};
use std::{fs, path::Path, path::PathBuf};

use crate::embed::{SCAFFOLD_FILES, ScaffoldVars};
use crate::log;

/// Standard project directory structure.
const PROJECT_DIRS: &[&str] = &[
    "src/assets/html",
    "src/assets/scss",
    "src/assets/js",
    "src/assets/img/svg",
    "src/assets/fonts",
    "src/assets/vendors",
    "src/assets/video",
];

pub fn run(name: Option<&Path>) -> Result<()> {
    let root = match name {
        Some(name) => name.to_path_buf(),
        None => PathBuf::from("."),
    };

    let project_name = project_name(&root);
    create_structure(&root)?;

    let vars = ScaffoldVars {
        project_name: project_name.clone(),
    };

    let mut written = 0;
    for (rel, template) in SCAFFOLD_FILES {
        let dest = root.join(rel);
        if dest.exists() {
            log!("init"; "kept existing {}", rel);
            continue;
        }
        fs::write(&dest, template.render(&vars))
            .with_context(|| format!("Failed to write {}", dest.display()))?;
        written += 1;
    }

    log!("init"; "scaffolded `{}` ({} files)", project_name, written);
    log!("init"; "next: cd into the project and run `rill dev`");
    Ok(())
}

/// Create the project directory layout.
fn create_structure(root: &Path) -> Result<()> {
    if !root.exists() {
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create root directory '{}'", root.display()))?;
    }

    for dir in PROJECT_DIRS {
        let path = root.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory '{}'", path.display()))?;
    }

    Ok(())
}

/// Project name from the target directory (falling back past `.`).
fn project_name(root: &Path) -> String {
    let canonical = crate::utils::path::normalize_path(root);
    canonical
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "site".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scaffolds_layout_and_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my-site");

        run(Some(&root)).unwrap();

        assert!(root.join("src/assets/scss").is_dir());
        assert!(root.join("src/assets/img/svg").is_dir());
        assert!(root.join("rill.toml").is_file());
        assert!(root.join("src/index.html").is_file());

        let js = fs::read_to_string(root.join("src/assets/js/main.js")).unwrap();
        assert!(js.contains("991.98"));

        let html = fs::read_to_string(root.join("src/index.html")).unwrap();
        assert!(html.contains("my-site"));
    }

    #[test]
    fn test_rerun_keeps_existing_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("site");

        run(Some(&root)).unwrap();
        fs::write(root.join("src/index.html"), "customized").unwrap();

        run(Some(&root)).unwrap();
        assert_eq!(
            fs::read_to_string(root.join("src/index.html")).unwrap(),
            "customized"
        );
    }
}
