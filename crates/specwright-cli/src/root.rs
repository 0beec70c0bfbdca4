use std::path::{Path, PathBuf};

/// Project directory for `init`: the explicit path, else the current directory.
pub fn init_root(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => current_dir(),
    }
}

/// Resolve the project root for commands that operate on an existing project.
///
/// Priority:
/// 1. Positional path argument (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `specwright/`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    resolve_from(&current_dir())
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn resolve_from(cwd: &Path) -> PathBuf {
    find_upward(cwd, "specwright")
        .or_else(|| find_upward(cwd, ".git"))
        .unwrap_or_else(|| cwd.to_path_buf())
}

fn find_upward(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_root(Some(dir.path())), dir.path());
        assert_eq!(init_root(Some(dir.path())), dir.path());
    }

    #[test]
    fn finds_specwright_dir_above_cwd() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("specwright")).unwrap();
        let subdir = dir.path().join("src/deep");
        std::fs::create_dir_all(&subdir).unwrap();
        assert_eq!(resolve_from(&subdir), dir.path());
    }

    #[test]
    fn specwright_dir_beats_git_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let nested = dir.path().join("packages/app");
        std::fs::create_dir_all(nested.join("specwright")).unwrap();
        assert_eq!(resolve_from(&nested.join("src")), nested);
    }

    #[test]
    fn falls_back_to_git_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let subdir = dir.path().join("lib");
        std::fs::create_dir_all(&subdir).unwrap();
        assert_eq!(resolve_from(&subdir), dir.path());
    }
}
