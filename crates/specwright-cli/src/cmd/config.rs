use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use serde::Serialize;
use specwright_core::{
    config::{ConfigStore, FileConfigStore, GlobalConfig},
    profile::{self, DesiredState},
    types::{Delivery, Profile, WorkflowId},
    SpecwrightError,
};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the location of the global config file
    Path,

    /// Show the persisted config and the profile it resolves to
    Show,

    /// Set a key: profile <core|custom>, delivery <skills|commands|both>,
    /// workflows <id,id,...>
    Set { key: String, value: String },

    /// Remove a key so its default applies again
    Unset { key: String },

    /// Remove every key
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigKey {
    Profile,
    Delivery,
    Workflows,
}

impl std::str::FromStr for ConfigKey {
    type Err = SpecwrightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile" => Ok(ConfigKey::Profile),
            "delivery" => Ok(ConfigKey::Delivery),
            "workflows" => Ok(ConfigKey::Workflows),
            other => Err(SpecwrightError::UnknownConfigKey(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(store: &FileConfigStore, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Path => {
            println!("{}", store.path().display());
            Ok(())
        }
        ConfigSubcommand::Show => show(store, json),
        ConfigSubcommand::Set { key, value } => set(store, &key, &value),
        ConfigSubcommand::Unset { key } => unset(store, &key),
        ConfigSubcommand::Reset => {
            store
                .write(&GlobalConfig::default())
                .context("failed to write config")?;
            println!("Reset {}", store.path().display());
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ShowReport<'a> {
    path: &'a Path,
    config: &'a GlobalConfig,
    resolved: DesiredState,
}

fn show(store: &FileConfigStore, json: bool) -> anyhow::Result<()> {
    let config = store.read().context("failed to read config")?;
    let resolved = profile::resolve(&config, None)?;

    if json {
        return print_json(&ShowReport {
            path: store.path(),
            config: &config,
            resolved,
        });
    }

    println!("# {}", store.path().display());
    let yaml = serde_yaml::to_string(&config)?;
    if yaml.trim() == "{}" {
        println!("(empty: defaults apply)");
    } else {
        print!("{yaml}");
    }
    println!();
    println!("{}", super::init::describe_desired(&resolved));
    Ok(())
}

// ---------------------------------------------------------------------------
// set / unset
// ---------------------------------------------------------------------------

fn parse_workflows(value: &str) -> anyhow::Result<Vec<WorkflowId>> {
    let mut out = Vec::new();
    for raw in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let id: WorkflowId = raw.parse()?;
        if !out.contains(&id) {
            out.push(id);
        }
    }
    Ok(out)
}

fn set(store: &FileConfigStore, key: &str, value: &str) -> anyhow::Result<()> {
    let key: ConfigKey = key.parse()?;
    let mut config = store.read().context("failed to read config")?;

    match key {
        ConfigKey::Profile => config.set_profile(value.parse::<Profile>()?),
        ConfigKey::Delivery => config.set_delivery(value.parse::<Delivery>()?),
        ConfigKey::Workflows => config.set_workflows(&parse_workflows(value)?),
    }
    store.write(&config).context("failed to write config")?;

    println!("Set {} = {value}", key_name(key));
    if key == ConfigKey::Workflows && config.profile() != Profile::Custom {
        println!("note: workflows only apply with 'specwright config set profile custom'");
    }
    println!("Run 'specwright update' in each project to apply.");
    Ok(())
}

fn unset(store: &FileConfigStore, key: &str) -> anyhow::Result<()> {
    let key: ConfigKey = key.parse()?;
    let mut config = store.read().context("failed to read config")?;
    match key {
        ConfigKey::Profile => config.profile = None,
        ConfigKey::Delivery => config.delivery = None,
        ConfigKey::Workflows => config.workflows = None,
    }
    store.write(&config).context("failed to write config")?;
    println!("Unset {}", key_name(key));
    Ok(())
}

fn key_name(key: ConfigKey) -> &'static str {
    match key {
        ConfigKey::Profile => "profile",
        ConfigKey::Delivery => "delivery",
        ConfigKey::Workflows => "workflows",
    }
}
