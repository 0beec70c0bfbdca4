use crate::output::{print_json, print_summary};
use crate::prompt::Prompter;
use anyhow::Context;
use specwright_core::{
    config::ConfigStore, legacy, migrations, paths, probe, profile, reconcile, SpecwrightError,
    VERSION,
};
use std::path::Path;

use super::init::{
    apply_legacy_cleanup, describe_desired, describe_migration, plan_legacy_cleanup, union_tools,
    LegacyFallback, RunReport,
};

/// `specwright update`: converge every configured tool to the current
/// profile, delivery mode and binary version.
///
/// Requires an already-initialized project (`specwright/` must exist).
/// Per-tool failures are reported in the summary and do not fail the command.
pub fn run(
    root: &Path,
    force: bool,
    json: bool,
    store: &dyn ConfigStore,
    prompter: &dyn Prompter,
) -> anyhow::Result<()> {
    if !paths::is_initialized(root) {
        return Err(SpecwrightError::NotInitialized(root.to_path_buf()).into());
    }

    let detected = legacy::detect(root);
    let clean = plan_legacy_cleanup(root, &detected, force, prompter, LegacyFallback::Warn)?;

    if !json {
        println!("Updating specwright artifacts in: {}", root.display());
    }
    let cleanup = apply_legacy_cleanup(root, &detected, clean, json);

    let (config, migration) =
        migrations::migrate_profile(store, root).context("failed to migrate global config")?;
    let desired = profile::resolve(&config, None)?;

    // Tools with only legacy files are upgrade candidates too.
    let tools = union_tools(
        &probe::configured_tools(root, VERSION),
        &legacy::tools_implied(&detected),
    );
    tracing::debug!(tools = ?tools, "update targets");
    let summary = reconcile::reconcile_all(root, &tools, &desired, VERSION, force);

    if json {
        return print_json(&RunReport {
            root,
            version: VERSION,
            legacy: &detected,
            cleanup: cleanup.as_ref(),
            migration: &migration,
            created: &[],
            desired: &desired,
            summary: &summary,
        });
    }

    if let Some(line) = describe_migration(&migration) {
        println!("{line}");
    }
    println!("{}", describe_desired(&desired));
    print_summary(&summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::testing::Scripted;
    use specwright_core::config::{FileConfigStore, GlobalConfig};
    use specwright_core::project;
    use specwright_core::reconcile::reconcile_all;
    use specwright_core::tools::ToolId;
    use specwright_core::types::{Profile, WorkflowId};
    use tempfile::TempDir;

    #[test]
    fn uninitialized_project_is_rejected() {
        let project = TempDir::new().unwrap();
        let cfg = TempDir::new().unwrap();
        let store = FileConfigStore::new(cfg.path().join("config.yaml"));
        let err = run(project.path(), false, true, &store, &Scripted::non_interactive())
            .unwrap_err();
        assert!(err.to_string().contains("not initialized"));
    }

    #[test]
    fn legacy_files_warn_and_continue_when_non_interactive() {
        let project = TempDir::new().unwrap();
        let cfg = TempDir::new().unwrap();
        let store = FileConfigStore::new(cfg.path().join("config.yaml"));
        project::scaffold(project.path()).unwrap();
        std::fs::create_dir_all(project.path().join(".windsurf/specwright")).unwrap();

        run(project.path(), false, true, &store, &Scripted::non_interactive()).unwrap();
        assert!(project.path().join(".windsurf/specwright").is_dir());
        assert!(project
            .path()
            .join(".windsurf/workflows/specwright-propose.md")
            .is_file());
    }

    fn interactive(confirm: bool) -> Scripted {
        Scripted {
            interactive: true,
            confirm,
            selection: None,
        }
    }

    #[test]
    fn legacy_files_are_removed_when_confirmed() {
        let project = TempDir::new().unwrap();
        let cfg = TempDir::new().unwrap();
        let store = FileConfigStore::new(cfg.path().join("config.yaml"));
        project::scaffold(project.path()).unwrap();
        std::fs::create_dir_all(project.path().join(".windsurf/specwright")).unwrap();

        run(project.path(), false, true, &store, &interactive(true)).unwrap();
        assert!(!project.path().join(".windsurf/specwright").exists());
        assert!(project
            .path()
            .join(".windsurf/workflows/specwright-propose.md")
            .is_file());
    }

    #[test]
    fn declined_legacy_cleanup_still_updates_tools() {
        let project = TempDir::new().unwrap();
        let cfg = TempDir::new().unwrap();
        let store = FileConfigStore::new(cfg.path().join("config.yaml"));
        project::scaffold(project.path()).unwrap();
        std::fs::create_dir_all(project.path().join(".windsurf/specwright")).unwrap();

        run(project.path(), false, true, &store, &interactive(false)).unwrap();
        assert!(project.path().join(".windsurf/specwright").is_dir());
        assert!(project
            .path()
            .join(".windsurf/workflows/specwright-propose.md")
            .is_file());
    }

    #[test]
    fn existing_install_is_migrated_not_narrowed() {
        let project = TempDir::new().unwrap();
        let cfg = TempDir::new().unwrap();
        let store = FileConfigStore::new(cfg.path().join("config.yaml"));
        project::scaffold(project.path()).unwrap();
        let installed = specwright_core::profile::DesiredState {
            profile: Profile::Custom,
            workflows: vec![WorkflowId::Explore, WorkflowId::Onboard],
            generate_skills: true,
            generate_commands: true,
        };
        reconcile_all(project.path(), &[ToolId::Claude], &installed, "0.1.0", false);

        run(project.path(), false, true, &store, &Scripted::non_interactive()).unwrap();

        let cfg = store.read().unwrap();
        assert_eq!(cfg.profile(), Profile::Custom);
        assert_eq!(
            cfg.custom_workflows(),
            vec![WorkflowId::Explore, WorkflowId::Onboard]
        );
        let onboard = project
            .path()
            .join(".claude/skills/specwright-onboard/SKILL.md");
        let text = std::fs::read_to_string(onboard).unwrap();
        assert!(text.contains(&format!("generatedBy: \"{VERSION}\"")));
    }

    #[test]
    fn persisted_profile_is_never_rewritten() {
        let project = TempDir::new().unwrap();
        let cfg = TempDir::new().unwrap();
        let store = FileConfigStore::new(cfg.path().join("config.yaml"));
        project::scaffold(project.path()).unwrap();
        let mut config = GlobalConfig::default();
        config.set_profile(Profile::Core);
        store.write(&config).unwrap();
        std::fs::create_dir_all(project.path().join(".codex/skills/specwright-sync")).unwrap();
        std::fs::write(
            project.path().join(".codex/skills/specwright-sync/SKILL.md"),
            "---\nmetadata:\n  generatedBy: \"0.1.0\"\n---\n",
        )
        .unwrap();

        run(project.path(), false, true, &store, &Scripted::non_interactive()).unwrap();
        assert_eq!(store.read().unwrap(), config);
        // `sync` is outside core, so the stale skill is pruned.
        assert!(!project.path().join(".codex/skills/specwright-sync").exists());
        assert!(project
            .path()
            .join(".codex/skills/specwright-apply/SKILL.md")
            .is_file());
    }
}
