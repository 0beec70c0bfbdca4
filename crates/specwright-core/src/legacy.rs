//! Detection and cleanup of artifacts written by the pre-skills layout.
//!
//! Two shapes are recognised:
//! - a marker block injected into a shared instruction file (`CLAUDE.md`,
//!   `AGENTS.md`, ...). The host file is user-owned; only the block goes.
//! - a flat command directory per tool (`.claude/specwright/`, ...). It holds
//!   nothing but generated files and is removed wholesale.

use crate::io;
use crate::paths;
use crate::tools::{ToolId, TOOLS};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const LEGACY_BLOCK_START: &str = "<!-- SPECWRIGHT:START -->";
pub const LEGACY_BLOCK_END: &str = "<!-- SPECWRIGHT:END -->";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LegacyArtifact {
    /// Marker-delimited block inside a shared instruction file.
    MarkerBlock { tool: ToolId, path: PathBuf },
    /// Flat pre-schema command directory.
    CommandDir { tool: ToolId, path: PathBuf },
}

impl LegacyArtifact {
    pub fn tool(&self) -> ToolId {
        match self {
            LegacyArtifact::MarkerBlock { tool, .. } | LegacyArtifact::CommandDir { tool, .. } => {
                *tool
            }
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            LegacyArtifact::MarkerBlock { path, .. } | LegacyArtifact::CommandDir { path, .. } => {
                path
            }
        }
    }

    pub fn describe(&self, root: &Path) -> String {
        let rel = paths::display_relative(root, self.path());
        match self {
            LegacyArtifact::MarkerBlock { .. } => {
                format!("{} (specwright marker block)", rel.display())
            }
            LegacyArtifact::CommandDir { .. } => {
                format!("{}/ (legacy command directory)", rel.display())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LegacyDetectionResult {
    pub artifacts: Vec<LegacyArtifact>,
}

impl LegacyDetectionResult {
    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CleanupSummary {
    /// Host files whose marker block was removed.
    pub cleaned_files: Vec<PathBuf>,
    pub removed_dirs: Vec<PathBuf>,
    pub failures: Vec<(PathBuf, String)>,
}

impl CleanupSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Byte span of the first complete marker block: from the start of the
/// start-sentinel line through the end of the end-sentinel line, including
/// its line terminator.
fn marker_block_span(text: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    let mut start = None;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim();
        match start {
            None if trimmed == LEGACY_BLOCK_START => start = Some(offset),
            Some(s) if trimmed == LEGACY_BLOCK_END => return Some((s, offset + line.len())),
            _ => {}
        }
        offset += line.len();
    }
    None
}

pub fn has_marker_block(text: &str) -> bool {
    marker_block_span(text).is_some()
}

/// Remove the first marker block, keeping everything before and after it
/// byte for byte. `None` when no complete block exists.
pub fn strip_marker_block(text: &str) -> Option<String> {
    let (start, end) = marker_block_span(text)?;
    let mut out = String::with_capacity(text.len() - (end - start));
    out.push_str(&text[..start]);
    out.push_str(&text[end..]);
    Some(out)
}

/// Scan `root` for legacy artifacts. Unreadable files are skipped.
pub fn detect(root: &Path) -> LegacyDetectionResult {
    let mut artifacts = Vec::new();
    for tool in TOOLS {
        if let Some(file) = tool.instruction_file {
            let path = root.join(file);
            if let Ok(text) = std::fs::read_to_string(&path) {
                if has_marker_block(&text) {
                    artifacts.push(LegacyArtifact::MarkerBlock {
                        tool: tool.id,
                        path,
                    });
                }
            }
        }
        if let Some(dir) = tool.legacy_command_dir {
            let path = root.join(dir);
            if path.is_dir() {
                artifacts.push(LegacyArtifact::CommandDir {
                    tool: tool.id,
                    path,
                });
            }
        }
    }
    tracing::debug!(count = artifacts.len(), "legacy detection finished");
    LegacyDetectionResult { artifacts }
}

fn strip_file(path: &Path) -> crate::Result<bool> {
    let text = std::fs::read_to_string(path)?;
    // Every block goes, not just the first.
    let mut current = text;
    let mut changed = false;
    while let Some(next) = strip_marker_block(&current) {
        current = next;
        changed = true;
    }
    if changed {
        io::atomic_write(path, current.as_bytes())?;
    }
    Ok(changed)
}

/// Remove everything `detect` found. Failures are collected, never raised.
pub fn cleanup(root: &Path, result: &LegacyDetectionResult) -> CleanupSummary {
    let mut summary = CleanupSummary::default();
    for artifact in &result.artifacts {
        let rel = paths::display_relative(root, artifact.path());
        let outcome = match artifact {
            LegacyArtifact::MarkerBlock { path, .. } => strip_file(path).map(|changed| {
                if changed {
                    summary.cleaned_files.push(rel.clone());
                }
            }),
            LegacyArtifact::CommandDir { path, .. } => {
                io::remove_dir_if_exists(path).map(|removed| {
                    if removed {
                        summary.removed_dirs.push(rel.clone());
                    }
                })
            }
        };
        if let Err(e) = outcome {
            tracing::warn!(path = %rel.display(), error = %e, "legacy cleanup failed");
            summary.failures.push((rel, e.to_string()));
        }
    }
    summary
}

/// Generation-capable tools implied by legacy artifacts, in registry order.
pub fn tools_implied(result: &LegacyDetectionResult) -> Vec<ToolId> {
    TOOLS
        .iter()
        .filter(|t| t.supports_generation())
        .map(|t| t.id)
        .filter(|id| result.artifacts.iter().any(|a| a.tool() == *id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BLOCK: &str = "<!-- SPECWRIGHT:START -->\n# Specwright\nUse /specwright:apply.\n<!-- SPECWRIGHT:END -->\n";

    #[test]
    fn strip_preserves_surrounding_bytes() {
        let before = "# My notes\r\n\nkeep this   \n";
        let after = "\n## Later\ntrailing text without newline";
        let text = format!("{before}{BLOCK}{after}");
        assert_eq!(strip_marker_block(&text).unwrap(), format!("{before}{after}"));
    }

    #[test]
    fn strip_block_at_end_without_trailing_newline() {
        let text = "intro\n<!-- SPECWRIGHT:START -->\nx\n<!-- SPECWRIGHT:END -->";
        assert_eq!(strip_marker_block(text).unwrap(), "intro\n");
    }

    #[test]
    fn incomplete_or_inline_markers_are_not_blocks() {
        assert!(strip_marker_block("<!-- SPECWRIGHT:START -->\nno end\n").is_none());
        assert!(strip_marker_block("<!-- SPECWRIGHT:END -->\n<!-- SPECWRIGHT:START -->\n").is_none());
        assert!(!has_marker_block("see <!-- SPECWRIGHT:START --> inline\n<!-- SPECWRIGHT:END -->\n"));
    }

    #[test]
    fn detect_finds_both_shapes() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("CLAUDE.md"), format!("hi\n{BLOCK}")).unwrap();
        std::fs::write(dir.path().join("AGENTS.md"), "no markers here\n").unwrap();
        std::fs::create_dir_all(dir.path().join(".cursor/specwright")).unwrap();
        std::fs::write(dir.path().join(".cursor/specwright/apply.md"), "old").unwrap();

        let result = detect(dir.path());
        assert_eq!(result.artifacts.len(), 2);
        assert!(matches!(
            &result.artifacts[0],
            LegacyArtifact::MarkerBlock { tool: ToolId::Claude, .. }
        ));
        assert!(matches!(
            &result.artifacts[1],
            LegacyArtifact::CommandDir { tool: ToolId::Cursor, .. }
        ));
        assert_eq!(tools_implied(&result), vec![ToolId::Claude, ToolId::Cursor]);
    }

    #[test]
    fn agents_md_is_detected_but_implies_no_tool() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("AGENTS.md"), BLOCK).unwrap();
        let result = detect(dir.path());
        assert_eq!(result.artifacts.len(), 1);
        assert!(tools_implied(&result).is_empty());
    }

    #[test]
    fn cleanup_keeps_host_file_even_when_emptied() {
        let dir = TempDir::new().unwrap();
        let agents = dir.path().join("AGENTS.md");
        std::fs::write(&agents, BLOCK).unwrap();
        let claude = dir.path().join("CLAUDE.md");
        std::fs::write(&claude, format!("before\n{BLOCK}after\n")).unwrap();
        std::fs::create_dir_all(dir.path().join(".claude/specwright")).unwrap();
        std::fs::write(dir.path().join(".claude/specwright/proposal.md"), "old").unwrap();

        let summary = cleanup(dir.path(), &detect(dir.path()));
        assert!(summary.is_clean());
        assert_eq!(summary.cleaned_files.len(), 2);
        assert_eq!(summary.removed_dirs, vec![PathBuf::from(".claude/specwright")]);

        assert!(agents.exists());
        assert_eq!(std::fs::read_to_string(&agents).unwrap(), "");
        assert_eq!(std::fs::read_to_string(&claude).unwrap(), "before\nafter\n");
        assert!(!dir.path().join(".claude/specwright").exists());
        assert!(detect(dir.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn cleanup_writes_through_symlinked_host_file() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let shared = dir.path().join("shared-notes.md");
        std::fs::write(&shared, format!("before\n{BLOCK}after\n")).unwrap();
        std::fs::set_permissions(&shared, std::fs::Permissions::from_mode(0o644)).unwrap();
        let claude = dir.path().join("CLAUDE.md");
        std::os::unix::fs::symlink(&shared, &claude).unwrap();

        let summary = cleanup(dir.path(), &detect(dir.path()));
        assert_eq!(summary.cleaned_files, vec![PathBuf::from("CLAUDE.md")]);

        assert!(std::fs::symlink_metadata(&claude).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&shared).unwrap(), "before\nafter\n");
        let mode = std::fs::metadata(&shared).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn cleanup_keeps_host_file_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let claude = dir.path().join("CLAUDE.md");
        std::fs::write(&claude, format!("notes\n{BLOCK}")).unwrap();
        std::fs::set_permissions(&claude, std::fs::Permissions::from_mode(0o664)).unwrap();

        cleanup(dir.path(), &detect(dir.path()));
        let mode = std::fs::metadata(&claude).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o664);
        assert_eq!(std::fs::read_to_string(&claude).unwrap(), "notes\n");
    }

    #[test]
    fn cleanup_records_failures_and_continues() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("CLAUDE.md"), BLOCK).unwrap();
        let result = LegacyDetectionResult {
            artifacts: vec![
                LegacyArtifact::MarkerBlock {
                    tool: ToolId::Gemini,
                    path: dir.path().join("GEMINI.md"),
                },
                LegacyArtifact::MarkerBlock {
                    tool: ToolId::Claude,
                    path: dir.path().join("CLAUDE.md"),
                },
            ],
        };
        let summary = cleanup(dir.path(), &result);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].0, PathBuf::from("GEMINI.md"));
        assert_eq!(summary.cleaned_files, vec![PathBuf::from("CLAUDE.md")]);
    }
}
