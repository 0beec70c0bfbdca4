use serde::Serialize;
use specwright_core::legacy::CleanupSummary;
use specwright_core::reconcile::RunSummary;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    // Calculate column widths
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let render = |cells: Vec<String>| {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let w = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = w)
            })
            .collect();
        println!("{}", padded.join("  ").trim_end());
    };

    render(headers.iter().map(|h| h.to_string()).collect());
    render(widths.iter().map(|&w| "-".repeat(w)).collect());
    for row in rows {
        render(row);
    }
}

/// Render the per-tool outcome of a reconciliation run.
pub fn lines_for_summary(summary: &RunSummary) -> Vec<String> {
    let mut lines = Vec::new();
    if summary.results.is_empty() {
        lines.push("No tools configured.".to_string());
        return lines;
    }

    for r in summary.updated() {
        lines.push(format!(
            "Updated: {} ({} written, {} removed)",
            r.tool.name(),
            r.writes.len(),
            r.deletes.len()
        ));
    }
    let current: Vec<&str> = summary.up_to_date().map(|r| r.tool.name()).collect();
    if !current.is_empty() {
        lines.push(format!("Up to date: {}", current.join(", ")));
    }
    for r in summary.failed() {
        lines.push(format!(
            "Failed: {} ({})",
            r.tool.name(),
            r.error.as_deref().unwrap_or("unknown error")
        ));
    }
    for r in &summary.results {
        for note in &r.notes {
            lines.push(format!("  note: {}: {note}", r.tool.name()));
        }
    }
    lines
}

pub fn print_summary(summary: &RunSummary) {
    println!();
    for line in lines_for_summary(summary) {
        println!("{line}");
    }
}

/// Warnings for a cleanup pass that left legacy artifacts behind.
pub fn cleanup_warnings(cleanup: &CleanupSummary) -> Vec<String> {
    if cleanup.is_clean() {
        return Vec::new();
    }
    let mut lines: Vec<String> = cleanup
        .failures
        .iter()
        .map(|(path, reason)| format!("warning: could not clean up {}: {reason}", path.display()))
        .collect();
    lines.push("warning: legacy cleanup incomplete; continuing without it".to_string());
    lines
}

pub fn print_cleanup(cleanup: &CleanupSummary) {
    for path in &cleanup.cleaned_files {
        println!("  cleaned: {}", path.display());
    }
    for path in &cleanup.removed_dirs {
        println!("  removed: {}/", path.display());
    }
    for line in cleanup_warnings(cleanup) {
        eprintln!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specwright_core::profile::DesiredState;
    use specwright_core::reconcile::reconcile_all;
    use specwright_core::tools::ToolId;
    use specwright_core::types::{Profile, WorkflowId};
    use tempfile::TempDir;

    #[test]
    fn summary_groups_outcomes() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".cursor"), "blocked").unwrap();
        let desired = DesiredState {
            profile: Profile::Custom,
            workflows: vec![WorkflowId::Apply],
            generate_skills: true,
            generate_commands: false,
        };
        reconcile_all(dir.path(), &[ToolId::Codex], &desired, "1.0.0", false);

        let summary = reconcile_all(
            dir.path(),
            &[ToolId::Claude, ToolId::Codex, ToolId::Cursor],
            &desired,
            "1.0.0",
            false,
        );
        let lines = lines_for_summary(&summary);
        assert_eq!(lines[0], "Updated: Claude Code (1 written, 0 removed)");
        assert_eq!(lines[1], "Up to date: Codex");
        assert!(lines[2].starts_with("Failed: Cursor ("), "{}", lines[2]);
    }

    #[test]
    fn empty_run_says_so() {
        assert_eq!(
            lines_for_summary(&RunSummary::default()),
            vec!["No tools configured.".to_string()]
        );
    }

    #[test]
    fn cleanup_warnings_only_when_something_failed() {
        let mut cleanup = CleanupSummary {
            cleaned_files: vec!["CLAUDE.md".into()],
            ..Default::default()
        };
        assert!(cleanup_warnings(&cleanup).is_empty());

        cleanup
            .failures
            .push(("GEMINI.md".into(), "permission denied".to_string()));
        let lines = cleanup_warnings(&cleanup);
        assert_eq!(lines[0], "warning: could not clean up GEMINI.md: permission denied");
        assert_eq!(lines.len(), 2);
    }
}
