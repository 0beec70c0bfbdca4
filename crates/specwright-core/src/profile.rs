use crate::config::GlobalConfig;
use crate::error::Result;
use crate::types::{ArtifactKind, Profile, WorkflowId};
use serde::Serialize;

/// What should exist on disk for every configured tool, derived per run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesiredState {
    pub profile: Profile,
    pub workflows: Vec<WorkflowId>,
    pub generate_skills: bool,
    pub generate_commands: bool,
}

impl DesiredState {
    pub fn generates(&self, kind: ArtifactKind) -> bool {
        match kind {
            ArtifactKind::Skill => self.generate_skills,
            ArtifactKind::Command => self.generate_commands,
        }
    }

    pub fn wants(&self, workflow: WorkflowId) -> bool {
        self.workflows.contains(&workflow)
    }
}

/// Parse a caller-supplied profile override. Anything other than the two
/// profile names is rejected.
pub fn parse_override(raw: &str) -> Result<Profile> {
    raw.parse()
}

/// Compute the desired state from persisted config plus an optional one-shot
/// profile override.
pub fn resolve(config: &GlobalConfig, override_profile: Option<&str>) -> Result<DesiredState> {
    let profile = match override_profile {
        Some(raw) => parse_override(raw)?,
        None => config.profile(),
    };

    let workflows = match profile {
        Profile::Core => WorkflowId::core().to_vec(),
        Profile::Custom => config.custom_workflows(),
    };

    let delivery = config.delivery();
    Ok(DesiredState {
        profile,
        workflows,
        generate_skills: delivery.generates_skills(),
        generate_commands: delivery.generates_commands(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpecwrightError;
    use crate::types::Delivery;

    fn config(profile: Option<&str>, workflows: Option<&[&str]>, delivery: Option<&str>) -> GlobalConfig {
        GlobalConfig {
            profile: profile.map(str::to_string),
            workflows: workflows.map(|w| w.iter().map(|s| s.to_string()).collect()),
            delivery: delivery.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_to_core_with_both_kinds() {
        let d = resolve(&GlobalConfig::default(), None).unwrap();
        assert_eq!(d.profile, Profile::Core);
        assert_eq!(d.workflows, WorkflowId::core());
        assert!(d.generate_skills && d.generate_commands);
    }

    #[test]
    fn core_ignores_custom_list() {
        let cfg = config(Some("core"), Some(&["onboard", "verify"]), None);
        let d = resolve(&cfg, None).unwrap();
        assert_eq!(d.workflows, WorkflowId::core());
    }

    #[test]
    fn custom_uses_list_verbatim() {
        let cfg = config(Some("custom"), Some(&["sync", "explore"]), Some("skills"));
        let d = resolve(&cfg, None).unwrap();
        assert_eq!(d.workflows, vec![WorkflowId::Sync, WorkflowId::Explore]);
        assert!(d.generate_skills);
        assert!(!d.generate_commands);
    }

    #[test]
    fn custom_empty_list_is_legal() {
        let cfg = config(Some("custom"), None, Some("commands"));
        let d = resolve(&cfg, None).unwrap();
        assert!(d.workflows.is_empty());
        assert!(!d.generate_skills);
        assert!(d.generate_commands);
    }

    #[test]
    fn override_beats_persisted_profile() {
        let cfg = config(Some("custom"), Some(&["sync"]), None);
        let d = resolve(&cfg, Some("core")).unwrap();
        assert_eq!(d.workflows, WorkflowId::core());

        let cfg = config(None, Some(&["sync"]), None);
        let d = resolve(&cfg, Some("custom")).unwrap();
        assert_eq!(d.workflows, vec![WorkflowId::Sync]);
    }

    #[test]
    fn invalid_override_fails_loudly() {
        let err = resolve(&GlobalConfig::default(), Some("everything")).unwrap_err();
        assert!(matches!(err, SpecwrightError::InvalidProfile(p) if p == "everything"));
    }

    #[test]
    fn invalid_persisted_profile_is_core() {
        let cfg = config(Some("expanded"), Some(&["sync"]), None);
        assert_eq!(resolve(&cfg, None).unwrap().workflows, WorkflowId::core());
    }

    #[test]
    fn total_over_all_deliveries() {
        for delivery in [Delivery::Skills, Delivery::Commands, Delivery::Both] {
            let cfg = config(Some("core"), None, Some(delivery.as_str()));
            let d = resolve(&cfg, None).unwrap();
            assert_eq!(d.generate_skills, delivery != Delivery::Commands);
            assert_eq!(d.generate_commands, delivery != Delivery::Skills);
        }
    }
}
