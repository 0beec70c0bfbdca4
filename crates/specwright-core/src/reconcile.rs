//! Per-tool convergence of on-disk skills and commands to a [`DesiredState`].
//!
//! A tool moves through `probed → {up to date | needs version update | needs
//! config sync} → {reconciled | failed}` once per run. Tools are handled one
//! at a time; nothing here prompts, retries or touches another tool's tree.

use crate::adapters;
use crate::catalog;
use crate::error::{Result, SpecwrightError};
use crate::io;
use crate::marker;
use crate::paths::display_relative;
use crate::probe::{self, ArtifactStatus};
use crate::profile::DesiredState;
use crate::tools::{ToolDescriptor, ToolId};
use crate::types::{ArtifactKind, WorkflowId};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// One reason a tool differs from the desired state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "drift", rename_all = "snake_case")]
pub enum Drift {
    /// A wanted artifact carries no marker or an older one.
    StaleVersion {
        path: PathBuf,
        found: Option<String>,
    },
    /// A wanted artifact does not exist.
    Missing {
        workflow: WorkflowId,
        kind: ArtifactKind,
    },
    /// An artifact exists for a workflow outside the desired set.
    Deselected {
        workflow: WorkflowId,
        kind: ArtifactKind,
    },
    /// An artifact exists for a kind delivery no longer generates.
    DisabledKind {
        workflow: WorkflowId,
        kind: ArtifactKind,
    },
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drift::StaleVersion { path, found } => write!(
                f,
                "{} generated by {}",
                path.display(),
                found.as_deref().unwrap_or("an unversioned release")
            ),
            Drift::Missing { workflow, kind } => write!(f, "missing {kind} '{workflow}'"),
            Drift::Deselected { workflow, kind } => {
                write!(f, "{kind} '{workflow}' is not in the active profile")
            }
            Drift::DisabledKind { workflow, kind } => {
                write!(f, "{kind} '{workflow}' is no longer delivered")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    UpToDate,
    NeedsVersionUpdate,
    NeedsConfigSync,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolAssessment {
    pub tool: ToolId,
    pub status: ArtifactStatus,
    pub state: Assessment,
    pub drift: Vec<Drift>,
    pub notes: Vec<String>,
}

/// Compare a tool's artifacts with `desired` without touching the disk.
pub fn assess(
    root: &Path,
    tool: ToolId,
    desired: &DesiredState,
    current_version: &str,
) -> ToolAssessment {
    let descriptor = tool.descriptor();
    let status = probe::probe(root, tool, current_version);
    let mut drift = Vec::new();

    for &kind in ArtifactKind::all() {
        let generating = desired.generates(kind);
        for &workflow in WorkflowId::all() {
            let Some(path) = probe::artifact_path(root, descriptor, workflow, kind) else {
                continue;
            };
            let wanted = generating && desired.wants(workflow);
            // An unwanted skill directory is removed whole, with or without SKILL.md.
            let present = match kind {
                ArtifactKind::Skill if !wanted => descriptor
                    .skill_dir(root, workflow)
                    .is_some_and(|d| d.exists()),
                _ => path.is_file(),
            };
            match (wanted, present) {
                (true, false) => drift.push(Drift::Missing { workflow, kind }),
                (true, true) => {
                    let found = marker::read_generated_by(&path);
                    if found.as_deref() != Some(current_version) {
                        drift.push(Drift::StaleVersion {
                            path: display_relative(root, &path),
                            found,
                        });
                    }
                }
                (false, true) if generating => drift.push(Drift::Deselected { workflow, kind }),
                (false, true) => drift.push(Drift::DisabledKind { workflow, kind }),
                (false, false) => {}
            }
        }
    }

    let state = if drift.is_empty() {
        Assessment::UpToDate
    } else if drift
        .iter()
        .all(|d| matches!(d, Drift::StaleVersion { .. }))
    {
        Assessment::NeedsVersionUpdate
    } else {
        Assessment::NeedsConfigSync
    };

    let notes = probe::scan_installed(root, descriptor)
        .stray_skills
        .into_iter()
        .map(|name| {
            format!("left unknown skill directory '{name}' in place (not a specwright workflow)")
        })
        .collect();

    ToolAssessment {
        tool,
        status,
        state,
        drift,
        notes,
    }
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Reconciled,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconcileResult {
    pub tool: ToolId,
    pub assessment: Assessment,
    pub forced: bool,
    pub drift: Vec<Drift>,
    /// Project-relative paths, in the order they were touched.
    pub writes: Vec<PathBuf>,
    pub deletes: Vec<PathBuf>,
    /// Regenerated files whose content was already current.
    pub skipped: Vec<PathBuf>,
    pub notes: Vec<String>,
    pub error: Option<String>,
}

impl ReconcileResult {
    fn new(assessment: ToolAssessment, forced: bool) -> Self {
        Self {
            tool: assessment.tool,
            assessment: assessment.state,
            forced,
            drift: assessment.drift,
            writes: Vec::new(),
            deletes: Vec::new(),
            skipped: Vec::new(),
            notes: assessment.notes,
            error: None,
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.error.is_some() {
            Outcome::Failed
        } else {
            Outcome::Reconciled
        }
    }

    pub fn changed(&self) -> bool {
        !self.writes.is_empty() || !self.deletes.is_empty()
    }
}

fn at(path: &Path) -> impl FnOnce(SpecwrightError) -> SpecwrightError + '_ {
    move |e| SpecwrightError::Artifact {
        path: path.to_path_buf(),
        source: Box::new(e),
    }
}

/// Applies filesystem changes for one tool and records them.
struct Applier<'a> {
    root: &'a Path,
    force: bool,
    result: &'a mut ReconcileResult,
}

impl Applier<'_> {
    fn write(&mut self, path: &Path, content: &str) -> Result<()> {
        let rel = display_relative(self.root, path);
        let attempt = if self.force {
            io::atomic_write(path, content.as_bytes()).map(|()| true)
        } else {
            io::write_if_changed(path, content.as_bytes())
        };
        let written = attempt.map_err(at(&rel))?;
        if written {
            self.result.writes.push(rel);
        } else {
            self.result.skipped.push(rel);
        }
        Ok(())
    }

    fn remove_dir(&mut self, path: &Path) -> Result<()> {
        let rel = display_relative(self.root, path);
        if io::remove_dir_if_exists(path).map_err(at(&rel))? {
            self.result.deletes.push(rel);
        }
        Ok(())
    }

    fn remove_file(&mut self, path: &Path) -> Result<()> {
        let rel = display_relative(self.root, path);
        if io::remove_file_if_exists(path).map_err(at(&rel))? {
            self.result.deletes.push(rel);
        }
        Ok(())
    }
}

fn sync_skills(
    applier: &mut Applier<'_>,
    tool: &ToolDescriptor,
    desired: &DesiredState,
    version: &str,
) -> Result<()> {
    let root = applier.root;
    if desired.generate_skills {
        for &workflow in &desired.workflows {
            let Some(path) = tool.skill_file(root, workflow) else {
                continue;
            };
            let text = catalog::render_skill(catalog::template(workflow), version);
            applier.write(&path, &text)?;
        }
    }
    // Sweep the whole catalog so a previously wider selection leaves no orphans.
    for &workflow in WorkflowId::all() {
        if desired.generate_skills && desired.wants(workflow) {
            continue;
        }
        if let Some(dir) = tool.skill_dir(root, workflow) {
            applier.remove_dir(&dir)?;
        }
    }
    Ok(())
}

fn sync_commands(
    applier: &mut Applier<'_>,
    tool: &ToolDescriptor,
    desired: &DesiredState,
    version: &str,
) -> Result<()> {
    let root = applier.root;
    let Some(adapter) = adapters::adapter_for(tool.id) else {
        return Ok(());
    };
    if desired.generate_commands {
        for &workflow in &desired.workflows {
            let template = catalog::template(workflow);
            let tags = ["specwright", template.command_id];
            let content = catalog::command_content(template, &tags, version);
            let path = root.join(adapter.file_path(template.command_id));
            applier.write(&path, &adapter.format_file(&content))?;
        }
    }
    for &workflow in WorkflowId::all() {
        if desired.generate_commands && desired.wants(workflow) {
            continue;
        }
        let template = catalog::template(workflow);
        applier.remove_file(&root.join(adapter.file_path(template.command_id)))?;
    }
    Ok(())
}

/// Converge one tool to `desired`.
///
/// Does nothing when the tool is already up to date unless `force` is set.
/// The first failing write or delete stops this tool and is recorded in
/// [`ReconcileResult::error`]; files written before it stay in place.
pub fn reconcile(
    root: &Path,
    tool: ToolId,
    desired: &DesiredState,
    current_version: &str,
    force: bool,
) -> ReconcileResult {
    let descriptor = tool.descriptor();
    let assessment = assess(root, tool, desired, current_version);
    let mut result = ReconcileResult::new(assessment, force);

    if !descriptor.supports_generation() {
        result
            .notes
            .push(format!("{} has no artifact directory; skipped", descriptor.name));
        return result;
    }
    if result.assessment == Assessment::UpToDate && !force {
        tracing::debug!(tool = %tool, "up to date");
        return result;
    }

    tracing::debug!(
        tool = %tool,
        state = ?result.assessment,
        drift = result.drift.len(),
        force,
        "reconciling"
    );
    let mut applier = Applier {
        root,
        force,
        result: &mut result,
    };
    let applied = sync_skills(&mut applier, descriptor, desired, current_version)
        .and_then(|()| sync_commands(&mut applier, descriptor, desired, current_version));

    if let Err(e) = applied {
        tracing::warn!(tool = %tool, error = %e, "reconciliation failed");
        result.error = Some(e.to_string());
    }
    result
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub results: Vec<ReconcileResult>,
}

impl RunSummary {
    pub fn updated(&self) -> impl Iterator<Item = &ReconcileResult> {
        self.results
            .iter()
            .filter(|r| r.outcome() == Outcome::Reconciled && r.changed())
    }

    pub fn up_to_date(&self) -> impl Iterator<Item = &ReconcileResult> {
        self.results
            .iter()
            .filter(|r| r.outcome() == Outcome::Reconciled && !r.changed())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ReconcileResult> {
        self.results
            .iter()
            .filter(|r| r.outcome() == Outcome::Failed)
    }

    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }
}

/// Reconcile each tool in turn. Always returns a summary; per-tool failures
/// are recorded in it rather than raised.
pub fn reconcile_all(
    root: &Path,
    tools: &[ToolId],
    desired: &DesiredState,
    current_version: &str,
    force: bool,
) -> RunSummary {
    let results = tools
        .iter()
        .map(|&tool| reconcile(root, tool, desired, current_version, force))
        .collect();
    RunSummary { results }
}
