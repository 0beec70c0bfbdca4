//! Static registry of the assistant tools specwright knows about.
//!
//! Adding a tool is a table change here plus a [`crate::adapters::CommandAdapter`]
//! implementation; the reconciliation engine never branches on tool identity.

use crate::error::{Result, SpecwrightError};
use crate::paths;
use crate::types::WorkflowId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolId {
    Claude,
    Cursor,
    Windsurf,
    Gemini,
    #[serde(rename = "opencode")]
    OpenCode,
    Codex,
    GithubCopilot,
    Agents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub id: ToolId,
    pub name: &'static str,
    /// Base directory for generated skills and commands. `None` means the tool
    /// is only referenced by legacy detection.
    pub base_dir: Option<&'static str>,
    /// Shared instruction file that older versions injected a marker block into.
    pub instruction_file: Option<&'static str>,
    /// Flat command directory written by the pre-skills layout.
    pub legacy_command_dir: Option<&'static str>,
}

pub static TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        id: ToolId::Claude,
        name: "Claude Code",
        base_dir: Some(".claude"),
        instruction_file: Some("CLAUDE.md"),
        legacy_command_dir: Some(".claude/specwright"),
    },
    ToolDescriptor {
        id: ToolId::Cursor,
        name: "Cursor",
        base_dir: Some(".cursor"),
        instruction_file: None,
        legacy_command_dir: Some(".cursor/specwright"),
    },
    ToolDescriptor {
        id: ToolId::Windsurf,
        name: "Windsurf",
        base_dir: Some(".windsurf"),
        instruction_file: None,
        legacy_command_dir: Some(".windsurf/specwright"),
    },
    ToolDescriptor {
        id: ToolId::Gemini,
        name: "Gemini CLI",
        base_dir: Some(".gemini"),
        instruction_file: Some("GEMINI.md"),
        legacy_command_dir: None,
    },
    ToolDescriptor {
        id: ToolId::OpenCode,
        name: "OpenCode",
        base_dir: Some(".opencode"),
        instruction_file: None,
        legacy_command_dir: Some(".opencode/specwright"),
    },
    ToolDescriptor {
        id: ToolId::Codex,
        name: "Codex",
        base_dir: Some(".codex"),
        instruction_file: None,
        legacy_command_dir: None,
    },
    ToolDescriptor {
        id: ToolId::GithubCopilot,
        name: "GitHub Copilot",
        base_dir: Some(".github"),
        instruction_file: Some(".github/copilot-instructions.md"),
        legacy_command_dir: None,
    },
    ToolDescriptor {
        id: ToolId::Agents,
        name: "AGENTS.md",
        base_dir: None,
        instruction_file: Some("AGENTS.md"),
        legacy_command_dir: None,
    },
];

impl ToolId {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolId::Claude => "claude",
            ToolId::Cursor => "cursor",
            ToolId::Windsurf => "windsurf",
            ToolId::Gemini => "gemini",
            ToolId::OpenCode => "opencode",
            ToolId::Codex => "codex",
            ToolId::GithubCopilot => "github-copilot",
            ToolId::Agents => "agents",
        }
    }

    /// `TOOLS` is laid out in declaration order, one entry per variant.
    pub fn descriptor(self) -> &'static ToolDescriptor {
        &TOOLS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToolId {
    type Err = SpecwrightError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TOOLS
            .iter()
            .map(|t| t.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| SpecwrightError::UnknownTool(s.to_string()))
    }
}

impl ToolDescriptor {
    pub fn supports_generation(&self) -> bool {
        self.base_dir.is_some()
    }

    pub fn skills_root(&self, root: &Path) -> Option<PathBuf> {
        self.base_dir
            .map(|base| root.join(base).join(paths::SKILLS_SUBDIR))
    }

    pub fn skill_dir(&self, root: &Path, workflow: WorkflowId) -> Option<PathBuf> {
        let template = crate::catalog::template(workflow);
        self.skills_root(root).map(|r| r.join(template.skill_dir))
    }

    pub fn skill_file(&self, root: &Path, workflow: WorkflowId) -> Option<PathBuf> {
        self.skill_dir(root, workflow)
            .map(|d| d.join(paths::SKILL_FILE))
    }

    /// Managed command file for `workflow`, if this tool has a command adapter.
    pub fn command_file(&self, root: &Path, workflow: WorkflowId) -> Option<PathBuf> {
        let adapter = crate::adapters::adapter_for(self.id)?;
        let template = crate::catalog::template(workflow);
        Some(root.join(adapter.file_path(template.command_id)))
    }
}

/// Tools that can receive generated skills and commands, in registry order.
pub fn generation_tools() -> impl Iterator<Item = &'static ToolDescriptor> {
    TOOLS.iter().filter(|t| t.supports_generation())
}

/// Parse a `--tools` value: `all`, `none`, or a comma-separated list of ids.
pub fn parse_tool_selection(arg: &str) -> Result<Vec<ToolId>> {
    let trimmed = arg.trim();
    match trimmed {
        "all" => return Ok(generation_tools().map(|t| t.id).collect()),
        "none" | "" => return Ok(Vec::new()),
        _ => {}
    }
    let mut selected = Vec::new();
    for raw in trimmed.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let id: ToolId = raw.parse()?;
        if !id.descriptor().supports_generation() {
            return Err(SpecwrightError::UnsupportedTool(raw.to_string()));
        }
        if !selected.contains(&id) {
            selected.push(id);
        }
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tool_id_has_one_descriptor() {
        assert_eq!(TOOLS.len(), ToolId::Agents as usize + 1);
        for t in TOOLS {
            assert_eq!(TOOLS.iter().filter(|o| o.id == t.id).count(), 1);
            assert_eq!(t.id.descriptor(), t);
        }
    }

    #[test]
    fn tool_id_str_roundtrip() {
        for t in TOOLS {
            assert_eq!(t.id.as_str().parse::<ToolId>().unwrap(), t.id);
        }
    }

    #[test]
    fn parse_all_and_none() {
        let all = parse_tool_selection("all").unwrap();
        assert!(all.contains(&ToolId::Claude));
        assert!(!all.contains(&ToolId::Agents));
        assert!(parse_tool_selection("none").unwrap().is_empty());
    }

    #[test]
    fn parse_list_dedups_and_validates() {
        let tools = parse_tool_selection("claude, cursor,claude").unwrap();
        assert_eq!(tools, vec![ToolId::Claude, ToolId::Cursor]);
        assert!(matches!(
            parse_tool_selection("claude,vim"),
            Err(SpecwrightError::UnknownTool(t)) if t == "vim"
        ));
        assert!(matches!(
            parse_tool_selection("agents"),
            Err(SpecwrightError::UnsupportedTool(_))
        ));
    }

    #[test]
    fn skill_paths_are_nested_under_base() {
        let root = Path::new("/p");
        let claude = ToolId::Claude.descriptor();
        assert_eq!(
            claude.skill_file(root, WorkflowId::Apply).unwrap(),
            PathBuf::from("/p/.claude/skills/specwright-apply/SKILL.md")
        );
        assert!(ToolId::Agents.descriptor().skill_file(root, WorkflowId::Apply).is_none());
    }
}
