use crate::config::{ConfigStore, GlobalConfig};
use crate::error::Result;
use crate::probe;
use crate::tools;
use crate::types::{Delivery, WorkflowId};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProfileMigration {
    /// `profile` was already present; nothing to do.
    AlreadySet,
    /// No current-schema artifacts anywhere; the `core` default applies.
    NothingInstalled,
    /// Persisted `custom` with the workflows found on disk.
    Migrated {
        workflows: Vec<WorkflowId>,
        delivery: Option<Delivery>,
    },
}

/// Workflows and artifact kinds installed across every generation-capable tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledSummary {
    pub workflows: Vec<WorkflowId>,
    pub has_skills: bool,
    pub has_commands: bool,
}

pub fn scan_all_tools(root: &Path) -> InstalledSummary {
    let mut summary = InstalledSummary::default();
    let mut found = Vec::new();
    for tool in tools::generation_tools() {
        let inv = probe::scan_installed(root, tool);
        summary.has_skills |= !inv.skills.is_empty();
        summary.has_commands |= !inv.commands.is_empty();
        found.extend(inv.workflows());
    }
    summary.workflows = WorkflowId::all()
        .iter()
        .copied()
        .filter(|w| found.contains(w))
        .collect();
    summary
}

fn infer_delivery(summary: &InstalledSummary) -> Option<Delivery> {
    match (summary.has_skills, summary.has_commands) {
        (true, false) => Some(Delivery::Skills),
        (false, true) => Some(Delivery::Commands),
        _ => None,
    }
}

/// Apply the migration to an in-memory config. `config` is only modified
/// when the outcome is [`ProfileMigration::Migrated`].
pub fn migrate_profile_in(config: &mut GlobalConfig, root: &Path) -> ProfileMigration {
    if config.has_profile() {
        return ProfileMigration::AlreadySet;
    }
    let summary = scan_all_tools(root);
    if summary.workflows.is_empty() {
        return ProfileMigration::NothingInstalled;
    }

    config.set_profile(crate::types::Profile::Custom);
    config.set_workflows(&summary.workflows);
    let delivery = if config.delivery.is_none() {
        infer_delivery(&summary)
    } else {
        None
    };
    if let Some(d) = delivery {
        config.set_delivery(d);
    }
    ProfileMigration::Migrated {
        workflows: summary.workflows,
        delivery,
    }
}

/// One-time migration for installs that predate profiles.
///
/// Fires only while the `profile` key has never been written, so existing
/// installs keep every workflow they already have instead of narrowing to
/// `core`. Reads the store once and writes at most once; the returned config
/// is what the rest of the run should resolve against.
pub fn migrate_profile(
    store: &dyn ConfigStore,
    root: &Path,
) -> Result<(GlobalConfig, ProfileMigration)> {
    let mut config = store.read()?;
    let outcome = migrate_profile_in(&mut config, root);
    if let ProfileMigration::Migrated { workflows, .. } = &outcome {
        store.write(&config)?;
        tracing::info!(
            workflows = ?workflows,
            "migrated existing install to custom profile"
        );
    }
    Ok((config, outcome))
}
