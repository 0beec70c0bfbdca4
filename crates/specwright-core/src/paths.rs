use crate::error::{Result, SpecwrightError};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const SPECWRIGHT_DIR: &str = "specwright";
pub const SPECS_DIR: &str = "specwright/specs";
pub const CHANGES_DIR: &str = "specwright/changes";
pub const ARCHIVE_DIR: &str = "specwright/changes/archive";
pub const PROJECT_MD: &str = "specwright/project.md";

pub const SKILLS_SUBDIR: &str = "skills";
pub const SKILL_FILE: &str = "SKILL.md";
/// Prefix shared by every managed skill directory and flat command file.
pub const MANAGED_PREFIX: &str = "specwright-";

pub const CONFIG_DIR_ENV: &str = "SPECWRIGHT_CONFIG_DIR";
pub const GLOBAL_CONFIG_FILE: &str = "config.yaml";

// ---------------------------------------------------------------------------
// Project paths
// ---------------------------------------------------------------------------

pub fn specwright_dir(root: &Path) -> PathBuf {
    root.join(SPECWRIGHT_DIR)
}

pub fn project_md_path(root: &Path) -> PathBuf {
    root.join(PROJECT_MD)
}

/// `update` may only run once this directory exists.
pub fn is_initialized(root: &Path) -> bool {
    specwright_dir(root).is_dir()
}

// ---------------------------------------------------------------------------
// Global config location
// ---------------------------------------------------------------------------

/// Resolve the global config directory.
///
/// Priority:
/// 1. `explicit` (the `--config-dir` flag / `SPECWRIGHT_CONFIG_DIR`)
/// 2. `$XDG_CONFIG_HOME/specwright`
/// 3. `~/.config/specwright`
pub fn global_config_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(xdg).join("specwright"));
    }
    let home = home::home_dir().ok_or(SpecwrightError::HomeNotFound)?;
    Ok(home.join(".config").join("specwright"))
}

pub fn global_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    Ok(global_config_dir(explicit)?.join(GLOBAL_CONFIG_FILE))
}

/// Render `path` relative to `root` for display; falls back to the full path.
pub fn display_relative(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
