use crate::output::{print_json, print_table};
use serde::Serialize;
use specwright_core::{
    config::ConfigStore,
    migrations, paths,
    probe::ArtifactStatus,
    profile::{self, DesiredState},
    reconcile::{self, Assessment},
    tools, VERSION,
};
use std::path::Path;

#[derive(Serialize)]
struct ToolStatus {
    #[serde(flatten)]
    status: ArtifactStatus,
    assessment: Assessment,
    drift: Vec<String>,
}

#[derive(Serialize)]
struct StatusReport<'a> {
    root: &'a Path,
    initialized: bool,
    version: &'static str,
    desired: DesiredState,
    tools: Vec<ToolStatus>,
}

fn build_report<'a>(root: &'a Path, store: &dyn ConfigStore) -> anyhow::Result<StatusReport<'a>> {
    // Preview the one-time migration without persisting it.
    let mut config = store.read()?;
    migrations::migrate_profile_in(&mut config, root);
    let desired = profile::resolve(&config, None)?;

    let rows: Vec<ToolStatus> = tools::generation_tools()
        .map(|t| {
            let a = reconcile::assess(root, t.id, &desired, VERSION);
            ToolStatus {
                status: a.status,
                assessment: a.state,
                drift: a.drift.iter().map(ToString::to_string).collect(),
            }
        })
        .collect();

    Ok(StatusReport {
        root,
        initialized: paths::is_initialized(root),
        version: VERSION,
        desired,
        tools: rows,
    })
}

fn state_label(a: Assessment) -> &'static str {
    match a {
        Assessment::UpToDate => "up to date",
        Assessment::NeedsVersionUpdate => "needs version update",
        Assessment::NeedsConfigSync => "needs config sync",
    }
}

/// `specwright status`: read-only view of what `update` would act on.
pub fn run(root: &Path, json: bool, store: &dyn ConfigStore) -> anyhow::Result<()> {
    let report = build_report(root, store)?;

    if json {
        return print_json(&report);
    }

    if !report.initialized {
        println!("Not initialized: run 'specwright init' in {}", root.display());
    }
    println!("{}", super::init::describe_desired(&report.desired));
    println!();

    let table = report
        .tools
        .iter()
        .filter(|t| t.status.configured)
        .map(|t| {
            vec![
                t.status.tool.as_str().to_string(),
                t.status
                    .generated_by_version
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
                state_label(t.assessment).to_string(),
            ]
        })
        .collect::<Vec<_>>();

    if table.is_empty() {
        println!("No tools configured.");
    } else {
        print_table(&["TOOL", "GENERATED BY", "STATE"], table);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use specwright_core::config::FileConfigStore;
    use specwright_core::project;
    use specwright_core::reconcile::reconcile_all;
    use specwright_core::tools::ToolId;
    use specwright_core::types::{Profile, WorkflowId};
    use tempfile::TempDir;

    #[test]
    fn migration_is_previewed_but_not_persisted() {
        let project = TempDir::new().unwrap();
        let cfg = TempDir::new().unwrap();
        let store = FileConfigStore::new(cfg.path().join("config.yaml"));
        project::scaffold(project.path()).unwrap();
        let installed = DesiredState {
            profile: Profile::Custom,
            workflows: vec![WorkflowId::Explore, WorkflowId::Onboard],
            generate_skills: true,
            generate_commands: true,
        };
        reconcile_all(project.path(), &[ToolId::Claude], &installed, VERSION, false);

        let report = build_report(project.path(), &store).unwrap();
        assert_eq!(report.desired.profile, Profile::Custom);
        assert_eq!(
            report.desired.workflows,
            vec![WorkflowId::Explore, WorkflowId::Onboard]
        );
        let claude = report
            .tools
            .iter()
            .find(|t| t.status.tool == ToolId::Claude)
            .unwrap();
        assert_eq!(claude.assessment, Assessment::UpToDate);

        assert!(!store.path().exists());
        assert!(!store.read().unwrap().has_profile());
    }
}
