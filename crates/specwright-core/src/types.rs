use crate::error::SpecwrightError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// WorkflowId
// ---------------------------------------------------------------------------

/// One unit of agent guidance that can be installed as a skill and/or a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowId {
    Explore,
    Propose,
    Apply,
    Verify,
    Sync,
    Archive,
    Onboard,
}

impl WorkflowId {
    /// Every workflow, in catalog order.
    pub fn all() -> &'static [WorkflowId] {
        &[
            WorkflowId::Explore,
            WorkflowId::Propose,
            WorkflowId::Apply,
            WorkflowId::Verify,
            WorkflowId::Sync,
            WorkflowId::Archive,
            WorkflowId::Onboard,
        ]
    }

    /// The fixed subset installed by the `core` profile.
    pub fn core() -> &'static [WorkflowId] {
        &[
            WorkflowId::Propose,
            WorkflowId::Explore,
            WorkflowId::Apply,
            WorkflowId::Archive,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowId::Explore => "explore",
            WorkflowId::Propose => "propose",
            WorkflowId::Apply => "apply",
            WorkflowId::Verify => "verify",
            WorkflowId::Sync => "sync",
            WorkflowId::Archive => "archive",
            WorkflowId::Onboard => "onboard",
        }
    }
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WorkflowId {
    type Err = SpecwrightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowId::all()
            .iter()
            .copied()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| SpecwrightError::UnknownWorkflow(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    Core,
    Custom,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Core => "core",
            Profile::Custom => "custom",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Profile {
    type Err = SpecwrightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "core" => Ok(Profile::Core),
            "custom" => Ok(Profile::Custom),
            _ => Err(SpecwrightError::InvalidProfile(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Delivery
// ---------------------------------------------------------------------------

/// Which artifact kinds get generated for the active workflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    Skills,
    Commands,
    #[default]
    Both,
}

impl Delivery {
    pub fn as_str(self) -> &'static str {
        match self {
            Delivery::Skills => "skills",
            Delivery::Commands => "commands",
            Delivery::Both => "both",
        }
    }

    pub fn generates_skills(self) -> bool {
        self != Delivery::Commands
    }

    pub fn generates_commands(self) -> bool {
        self != Delivery::Skills
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Delivery {
    type Err = SpecwrightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skills" => Ok(Delivery::Skills),
            "commands" => Ok(Delivery::Commands),
            "both" => Ok(Delivery::Both),
            _ => Err(SpecwrightError::InvalidDelivery(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// ArtifactKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Skill,
    Command,
}

impl ArtifactKind {
    /// Skills are always handled before commands.
    pub fn all() -> &'static [ArtifactKind] {
        &[ArtifactKind::Skill, ArtifactKind::Command]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Skill => "skill",
            ArtifactKind::Command => "command",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
