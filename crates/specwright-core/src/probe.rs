//! Read-only inspection of a tool's managed artifacts.

use crate::catalog;
use crate::marker;
use crate::paths;
use crate::tools::{ToolDescriptor, ToolId};
use crate::types::{ArtifactKind, WorkflowId};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactStatus {
    pub tool: ToolId,
    /// At least one managed skill or command file exists.
    pub configured: bool,
    /// Marker from the first managed file found; skills are checked before commands.
    pub generated_by_version: Option<String>,
    /// Marker missing or not string-equal to the running version.
    pub needs_update: bool,
}

/// Which catalog workflows have artifacts on disk for one tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstalledArtifacts {
    pub skills: Vec<WorkflowId>,
    pub commands: Vec<WorkflowId>,
    /// `specwright-*` skill directories that match no catalog workflow.
    pub stray_skills: Vec<String>,
}

impl InstalledArtifacts {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.commands.is_empty()
    }

    /// Union of skill and command workflows, in catalog order.
    pub fn workflows(&self) -> Vec<WorkflowId> {
        WorkflowId::all()
            .iter()
            .copied()
            .filter(|w| self.skills.contains(w) || self.commands.contains(w))
            .collect()
    }
}

/// Path of the managed artifact of `kind` for `workflow`, if the tool has one.
pub fn artifact_path(
    root: &Path,
    tool: &ToolDescriptor,
    workflow: WorkflowId,
    kind: ArtifactKind,
) -> Option<PathBuf> {
    match kind {
        ArtifactKind::Skill => tool.skill_file(root, workflow),
        ArtifactKind::Command => tool.command_file(root, workflow),
    }
}

/// Inventory the managed artifacts a tool currently has under `root`.
pub fn scan_installed(root: &Path, tool: &ToolDescriptor) -> InstalledArtifacts {
    let mut installed = InstalledArtifacts::default();
    for &workflow in WorkflowId::all() {
        for &kind in ArtifactKind::all() {
            let exists = artifact_path(root, tool, workflow, kind).is_some_and(|p| p.is_file());
            if !exists {
                continue;
            }
            match kind {
                ArtifactKind::Skill => installed.skills.push(workflow),
                ArtifactKind::Command => installed.commands.push(workflow),
            }
        }
    }
    installed.stray_skills = stray_skill_dirs(root, tool);
    installed
}

fn stray_skill_dirs(root: &Path, tool: &ToolDescriptor) -> Vec<String> {
    let Some(skills_root) = tool.skills_root(root) else {
        return Vec::new();
    };
    let Ok(entries) = std::fs::read_dir(&skills_root) else {
        return Vec::new();
    };
    let mut stray: Vec<String> = entries
        .flatten()
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(paths::MANAGED_PREFIX))
        .filter(|name| catalog::by_skill_dir(name).is_none())
        .collect();
    stray.sort();
    stray
}

/// First managed file for `tool`, skills before commands, catalog order within each.
fn first_managed_file(root: &Path, tool: &ToolDescriptor) -> Option<PathBuf> {
    ArtifactKind::all().iter().find_map(|&kind| {
        WorkflowId::all()
            .iter()
            .filter_map(|&w| artifact_path(root, tool, w, kind))
            .find(|p| p.is_file())
    })
}

/// Probe a tool's on-disk state against `current_version`. Never fails.
pub fn probe(root: &Path, tool: ToolId, current_version: &str) -> ArtifactStatus {
    let descriptor = tool.descriptor();
    let first = first_managed_file(root, descriptor);
    let configured = first.is_some();
    let generated_by_version = first.as_deref().and_then(marker::read_generated_by);
    let needs_update = generated_by_version.as_deref() != Some(current_version);
    ArtifactStatus {
        tool,
        configured,
        generated_by_version,
        needs_update,
    }
}

/// Generation-capable tools that currently have managed artifacts, in registry order.
pub fn configured_tools(root: &Path, current_version: &str) -> Vec<ToolId> {
    crate::tools::generation_tools()
        .map(|t| probe(root, t.id, current_version))
        .filter(|s| s.configured)
        .map(|s| s.tool)
        .collect()
}
