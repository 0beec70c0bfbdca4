//! The `specwright/` change/spec tree inside a project.

use crate::error::Result;
use crate::io;
use crate::paths;
use std::path::{Path, PathBuf};

const PROJECT_MD_TEMPLATE: &str = r#"# Project Context

## Purpose
Describe what this project does and who it is for.

## Tech Stack
- List the languages, frameworks and services in use.

## Conventions
- Code style, testing approach and review rules the assistant should follow.

## Constraints
- Anything the assistant must not change or must always check.
"#;

/// Create the project tree. Existing directories and a hand-written
/// `project.md` are left untouched.
///
/// Returns the project-relative paths that did not exist before.
pub fn scaffold(root: &Path) -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    for dir in [
        paths::SPECWRIGHT_DIR,
        paths::SPECS_DIR,
        paths::CHANGES_DIR,
        paths::ARCHIVE_DIR,
    ] {
        let p = root.join(dir);
        if !p.is_dir() {
            io::ensure_dir(&p)?;
            created.push(PathBuf::from(dir));
        }
    }

    if io::write_if_missing(&paths::project_md_path(root), PROJECT_MD_TEMPLATE.as_bytes())? {
        created.push(PathBuf::from(paths::PROJECT_MD));
    }

    if !created.is_empty() {
        tracing::debug!(root = %root.display(), created = created.len(), "scaffolded project");
    }
    Ok(created)
}
