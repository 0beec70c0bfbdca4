use crate::output::{print_cleanup, print_json, print_summary};
use crate::prompt::Prompter;
use anyhow::Context;
use serde::Serialize;
use specwright_core::{
    config::ConfigStore,
    legacy::{self, CleanupSummary, LegacyDetectionResult},
    migrations::{self, ProfileMigration},
    probe, profile,
    profile::DesiredState,
    project,
    reconcile::{self, RunSummary},
    tools::{self, ToolId},
    VERSION,
};
use std::path::{Path, PathBuf};

pub struct InitOptions<'a> {
    pub tools: Option<&'a str>,
    pub force: bool,
    pub profile: Option<&'a str>,
    pub json: bool,
}

/// Machine-readable record of an init or update run.
#[derive(Serialize)]
pub struct RunReport<'a> {
    pub root: &'a Path,
    pub version: &'static str,
    pub legacy: &'a LegacyDetectionResult,
    pub cleanup: Option<&'a CleanupSummary>,
    pub migration: &'a ProfileMigration,
    pub created: &'a [PathBuf],
    pub desired: &'a DesiredState,
    pub summary: &'a RunSummary,
}

/// What to do when no terminal is available to ask about legacy files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyFallback {
    /// First-time setup refuses to guess.
    Abort,
    /// Refresh runs keep going and leave the files alone.
    Warn,
}

/// Decide whether detected legacy artifacts should be cleaned up. Nothing is
/// touched here; the caller applies the decision once validation is done.
pub fn plan_legacy_cleanup(
    root: &Path,
    detected: &LegacyDetectionResult,
    force: bool,
    prompter: &dyn Prompter,
    fallback: LegacyFallback,
) -> anyhow::Result<bool> {
    if detected.is_empty() {
        return Ok(false);
    }
    if force {
        return Ok(true);
    }

    let listing: Vec<String> = detected
        .artifacts
        .iter()
        .map(|a| format!("  {}", a.describe(root)))
        .collect();

    if prompter.is_interactive() {
        println!("Found files from an older specwright layout:");
        for line in &listing {
            println!("{line}");
        }
        return prompter.confirm("Remove them now?", true);
    }

    match fallback {
        LegacyFallback::Abort => anyhow::bail!(
            "found files from an older specwright layout:\n{}\nre-run with --force to remove them",
            listing.join("\n")
        ),
        LegacyFallback::Warn => {
            eprintln!("warning: leaving files from an older specwright layout in place (use --force to remove):");
            for line in &listing {
                eprintln!("{line}");
            }
            Ok(false)
        }
    }
}

/// Remove legacy artifacts if planned. Failures are reported and never stop the run.
pub fn apply_legacy_cleanup(
    root: &Path,
    detected: &LegacyDetectionResult,
    clean: bool,
    json: bool,
) -> Option<CleanupSummary> {
    if !clean {
        return None;
    }
    let summary = legacy::cleanup(root, detected);
    if !json {
        print_cleanup(&summary);
    }
    Some(summary)
}

/// Union of two tool lists in registry order.
pub fn union_tools(a: &[ToolId], b: &[ToolId]) -> Vec<ToolId> {
    tools::generation_tools()
        .map(|t| t.id)
        .filter(|id| a.contains(id) || b.contains(id))
        .collect()
}

pub fn describe_migration(migration: &ProfileMigration) -> Option<String> {
    match migration {
        ProfileMigration::Migrated {
            workflows,
            delivery,
        } => {
            let ids: Vec<&str> = workflows.iter().map(|w| w.as_str()).collect();
            let mut line = format!(
                "Saved existing workflows as the custom profile: {}",
                ids.join(", ")
            );
            if let Some(d) = delivery {
                line.push_str(&format!(" (delivery: {d})"));
            }
            Some(line)
        }
        _ => None,
    }
}

pub fn describe_desired(desired: &DesiredState) -> String {
    let ids: Vec<&str> = desired.workflows.iter().map(|w| w.as_str()).collect();
    let delivery = match (desired.generate_skills, desired.generate_commands) {
        (true, true) => "skills + commands",
        (true, false) => "skills",
        (false, true) => "commands",
        (false, false) => "nothing",
    };
    let workflows = if ids.is_empty() {
        "no workflows".to_string()
    } else {
        ids.join(", ")
    };
    format!(
        "Profile: {} ({workflows}); delivery: {delivery}",
        desired.profile
    )
}

/// `specwright init`: scaffold the project tree and generate artifacts for
/// the selected tools.
pub fn run(
    root: &Path,
    opts: &InitOptions<'_>,
    store: &dyn ConfigStore,
    prompter: &dyn Prompter,
) -> anyhow::Result<()> {
    // Everything up to tool selection is validation; nothing on disk changes.
    if let Some(raw) = opts.profile {
        profile::parse_override(raw)?;
    }
    let explicit_tools = opts
        .tools
        .map(tools::parse_tool_selection)
        .transpose()
        .context("invalid --tools")?;
    if root.exists() && !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }

    let detected = legacy::detect(root);
    let clean = plan_legacy_cleanup(root, &detected, opts.force, prompter, LegacyFallback::Abort)?;

    let selected = match explicit_tools {
        Some(selected) => selected,
        None => {
            let candidates = union_tools(
                &probe::configured_tools(root, VERSION),
                &legacy::tools_implied(&detected),
            );
            if prompter.is_interactive() {
                let options: Vec<ToolId> = tools::generation_tools().map(|t| t.id).collect();
                prompter.select_tools(&options, &candidates)?
            } else if candidates.is_empty() {
                anyhow::bail!(
                    "no tools selected: pass --tools <all|none|id,...> when not running in a terminal"
                );
            } else {
                candidates
            }
        }
    };

    if !opts.json {
        println!("Initializing specwright in: {}", root.display());
    }

    let cleanup = apply_legacy_cleanup(root, &detected, clean, opts.json);

    let (mut config, migration) =
        migrations::migrate_profile(store, root).context("failed to migrate global config")?;

    let created = project::scaffold(root)
        .with_context(|| format!("failed to create project tree in {}", root.display()))?;

    // A first-time install stays on the default profile from now on instead
    // of being picked up by the pre-profile migration on the next update.
    if !config.has_profile() && opts.profile.is_none() {
        config.set_profile(config.profile());
        store.write(&config).context("failed to write global config")?;
    }

    let desired = profile::resolve(&config, opts.profile)?;
    let summary = reconcile::reconcile_all(root, &selected, &desired, VERSION, opts.force);

    if opts.json {
        return print_json(&RunReport {
            root,
            version: VERSION,
            legacy: &detected,
            cleanup: cleanup.as_ref(),
            migration: &migration,
            created: &created,
            desired: &desired,
            summary: &summary,
        });
    }

    for path in &created {
        println!("  created: {}", path.display());
    }
    if let Some(line) = describe_migration(&migration) {
        println!("{line}");
    }
    println!("{}", describe_desired(&desired));
    print_summary(&summary);

    println!("\nspecwright initialized.");
    println!("Next: describe your project in specwright/project.md, then run /specwright:propose");
    Ok(())
}
