//! Per-tool command adapters.
//!
//! Each adapter owns one tool's command directory convention and front-matter
//! syntax. The reconciliation engine writes whatever `format_file` returns
//! verbatim.

use crate::catalog::CommandContent;
use crate::tools::ToolId;
use std::path::PathBuf;

pub trait CommandAdapter: Send + Sync {
    fn tool(&self) -> ToolId;

    /// Project-relative path of the command file for `command_id`.
    fn file_path(&self, command_id: &str) -> PathBuf;

    /// Render the complete file content, including the version marker.
    fn format_file(&self, content: &CommandContent<'_>) -> String;

    /// Rewrite instruction text for this tool's command syntax.
    fn transform_body(&self, body: &str) -> String {
        body.to_string()
    }
}

/// Rewrite `/specwright:<id>` references to the flat `/specwright-<id>` form.
fn flatten_command_refs(body: &str) -> String {
    body.replace("/specwright:", "/specwright-")
}

fn yaml_list(items: &[&str]) -> String {
    format!("[{}]", items.join(", "))
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

// ---------------------------------------------------------------------------
// Claude Code: .claude/commands/specwright/<id>.md
// ---------------------------------------------------------------------------

pub struct ClaudeCommands;

impl CommandAdapter for ClaudeCommands {
    fn tool(&self) -> ToolId {
        ToolId::Claude
    }

    fn file_path(&self, command_id: &str) -> PathBuf {
        PathBuf::from(".claude/commands/specwright").join(format!("{command_id}.md"))
    }

    fn format_file(&self, c: &CommandContent<'_>) -> String {
        format!(
            "---\nname: {name}\ndescription: {description}\ncategory: {category}\ntags: {tags}\ngeneratedBy: \"{version}\"\n---\n\n{body}",
            name = quote(&format!("Specwright: {}", c.name)),
            description = c.description,
            category = c.category,
            tags = yaml_list(c.tags),
            version = c.generated_by,
            body = self.transform_body(c.body),
        )
    }
}

// ---------------------------------------------------------------------------
// Cursor: .cursor/commands/specwright-<id>.md
// ---------------------------------------------------------------------------

pub struct CursorCommands;

impl CommandAdapter for CursorCommands {
    fn tool(&self) -> ToolId {
        ToolId::Cursor
    }

    fn file_path(&self, command_id: &str) -> PathBuf {
        PathBuf::from(".cursor/commands").join(format!("specwright-{command_id}.md"))
    }

    fn format_file(&self, c: &CommandContent<'_>) -> String {
        format!(
            "---\nname: /specwright-{id}\nid: specwright-{id}\ncategory: {category}\ndescription: {description}\ngeneratedBy: \"{version}\"\n---\n\n{body}",
            id = c.id,
            category = c.category,
            description = c.description,
            version = c.generated_by,
            body = self.transform_body(c.body),
        )
    }

    fn transform_body(&self, body: &str) -> String {
        flatten_command_refs(body)
    }
}

// ---------------------------------------------------------------------------
// Windsurf: .windsurf/workflows/specwright-<id>.md
// ---------------------------------------------------------------------------

pub struct WindsurfCommands;

impl CommandAdapter for WindsurfCommands {
    fn tool(&self) -> ToolId {
        ToolId::Windsurf
    }

    fn file_path(&self, command_id: &str) -> PathBuf {
        PathBuf::from(".windsurf/workflows").join(format!("specwright-{command_id}.md"))
    }

    fn format_file(&self, c: &CommandContent<'_>) -> String {
        format!(
            "---\ndescription: {description}\nauto_execution_mode: 3\ngeneratedBy: \"{version}\"\n---\n\n{body}",
            description = c.description,
            version = c.generated_by,
            body = self.transform_body(c.body),
        )
    }

    fn transform_body(&self, body: &str) -> String {
        flatten_command_refs(body)
    }
}

// ---------------------------------------------------------------------------
// Gemini CLI: .gemini/commands/specwright/<id>.toml
// ---------------------------------------------------------------------------

pub struct GeminiCommands;

impl CommandAdapter for GeminiCommands {
    fn tool(&self) -> ToolId {
        ToolId::Gemini
    }

    fn file_path(&self, command_id: &str) -> PathBuf {
        PathBuf::from(".gemini/commands/specwright").join(format!("{command_id}.toml"))
    }

    fn format_file(&self, c: &CommandContent<'_>) -> String {
        format!(
            r#"# generatedBy: "{version}"
description = {description}

prompt = """
{prompt}
"""
"#,
            version = c.generated_by,
            description = quote(c.description),
            prompt = self.transform_body(c.body).trim_end(),
        )
    }
}

// ---------------------------------------------------------------------------
// OpenCode: .opencode/command/specwright-<id>.md
// ---------------------------------------------------------------------------

pub struct OpenCodeCommands;

impl CommandAdapter for OpenCodeCommands {
    fn tool(&self) -> ToolId {
        ToolId::OpenCode
    }

    fn file_path(&self, command_id: &str) -> PathBuf {
        PathBuf::from(".opencode/command").join(format!("specwright-{command_id}.md"))
    }

    fn format_file(&self, c: &CommandContent<'_>) -> String {
        format!(
            "---\ndescription: {description}\ngeneratedBy: \"{version}\"\n---\n\n{body}",
            description = c.description,
            version = c.generated_by,
            body = self.transform_body(c.body),
        )
    }

    fn transform_body(&self, body: &str) -> String {
        flatten_command_refs(body)
    }
}

// ---------------------------------------------------------------------------
// Codex: .codex/prompts/specwright-<id>.md
// ---------------------------------------------------------------------------

pub struct CodexCommands;

impl CommandAdapter for CodexCommands {
    fn tool(&self) -> ToolId {
        ToolId::Codex
    }

    fn file_path(&self, command_id: &str) -> PathBuf {
        PathBuf::from(".codex/prompts").join(format!("specwright-{command_id}.md"))
    }

    fn format_file(&self, c: &CommandContent<'_>) -> String {
        format!(
            "---\ndescription: {description}\nargument-hint: \"[change-id]\"\ngeneratedBy: \"{version}\"\n---\n\n{body}",
            description = c.description,
            version = c.generated_by,
            body = self.transform_body(c.body),
        )
    }

    fn transform_body(&self, body: &str) -> String {
        flatten_command_refs(body)
    }
}

// ---------------------------------------------------------------------------
// GitHub Copilot: .github/prompts/specwright-<id>.prompt.md
// ---------------------------------------------------------------------------

pub struct CopilotCommands;

impl CommandAdapter for CopilotCommands {
    fn tool(&self) -> ToolId {
        ToolId::GithubCopilot
    }

    fn file_path(&self, command_id: &str) -> PathBuf {
        PathBuf::from(".github/prompts").join(format!("specwright-{command_id}.prompt.md"))
    }

    fn format_file(&self, c: &CommandContent<'_>) -> String {
        format!(
            "---\ndescription: {description}\ngeneratedBy: \"{version}\"\n---\n\n$ARGUMENTS\n\n{body}",
            description = c.description,
            version = c.generated_by,
            body = self.transform_body(c.body),
        )
    }

    fn transform_body(&self, body: &str) -> String {
        flatten_command_refs(body)
    }
}

static CLAUDE: ClaudeCommands = ClaudeCommands;
static CURSOR: CursorCommands = CursorCommands;
static WINDSURF: WindsurfCommands = WindsurfCommands;
static GEMINI: GeminiCommands = GeminiCommands;
static OPENCODE: OpenCodeCommands = OpenCodeCommands;
static CODEX: CodexCommands = CodexCommands;
static COPILOT: CopilotCommands = CopilotCommands;

/// The command adapter for `tool`, or `None` when the tool has no command surface.
pub fn adapter_for(tool: ToolId) -> Option<&'static dyn CommandAdapter> {
    match tool {
        ToolId::Claude => Some(&CLAUDE),
        ToolId::Cursor => Some(&CURSOR),
        ToolId::Windsurf => Some(&WINDSURF),
        ToolId::Gemini => Some(&GEMINI),
        ToolId::OpenCode => Some(&OPENCODE),
        ToolId::Codex => Some(&CODEX),
        ToolId::GithubCopilot => Some(&COPILOT),
        ToolId::Agents => None,
    }
}
