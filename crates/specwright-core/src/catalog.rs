//! Workflow template catalog: the skill and command content for every workflow.

use crate::types::WorkflowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowTemplate {
    pub workflow: WorkflowId,
    /// Directory name under a tool's skills root.
    pub skill_dir: &'static str,
    /// Identifier handed to command adapters.
    pub command_id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub body: &'static str,
}

/// Everything a command adapter needs to render one command file.
#[derive(Debug, Clone, Copy)]
pub struct CommandContent<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub tags: &'a [&'a str],
    pub body: &'a str,
    pub generated_by: &'a str,
}

pub const COMMAND_CATEGORY: &str = "Workflow";

static CATALOG: [WorkflowTemplate; 7] = [
    WorkflowTemplate {
        workflow: WorkflowId::Explore,
        skill_dir: "specwright-explore",
        command_id: "explore",
        title: "Explore",
        description: "Think through an idea or problem before committing to a change",
        body: EXPLORE_BODY,
    },
    WorkflowTemplate {
        workflow: WorkflowId::Propose,
        skill_dir: "specwright-propose",
        command_id: "propose",
        title: "Propose",
        description: "Draft a change proposal with tasks and spec deltas",
        body: PROPOSE_BODY,
    },
    WorkflowTemplate {
        workflow: WorkflowId::Apply,
        skill_dir: "specwright-apply",
        command_id: "apply",
        title: "Apply",
        description: "Implement the tasks of an approved change",
        body: APPLY_BODY,
    },
    WorkflowTemplate {
        workflow: WorkflowId::Verify,
        skill_dir: "specwright-verify",
        command_id: "verify",
        title: "Verify",
        description: "Check an implemented change against its spec deltas",
        body: VERIFY_BODY,
    },
    WorkflowTemplate {
        workflow: WorkflowId::Sync,
        skill_dir: "specwright-sync",
        command_id: "sync",
        title: "Sync",
        description: "Merge a change's spec deltas into the main specs",
        body: SYNC_BODY,
    },
    WorkflowTemplate {
        workflow: WorkflowId::Archive,
        skill_dir: "specwright-archive",
        command_id: "archive",
        title: "Archive",
        description: "Archive a completed change and update specs",
        body: ARCHIVE_BODY,
    },
    WorkflowTemplate {
        workflow: WorkflowId::Onboard,
        skill_dir: "specwright-onboard",
        command_id: "onboard",
        title: "Onboard",
        description: "Guided walkthrough of the specwright workflow on this project",
        body: ONBOARD_BODY,
    },
];

/// Templates in catalog order, optionally restricted to `filter`.
///
/// Filtering preserves catalog order regardless of the order of `filter`.
pub fn templates(filter: Option<&[WorkflowId]>) -> Vec<&'static WorkflowTemplate> {
    CATALOG
        .iter()
        .filter(|t| filter.map_or(true, |f| f.contains(&t.workflow)))
        .collect()
}

pub fn template(workflow: WorkflowId) -> &'static WorkflowTemplate {
    // CATALOG is declared in WorkflowId::all() order.
    &CATALOG[WorkflowId::all()
        .iter()
        .position(|w| *w == workflow)
        .unwrap_or_default()]
}

/// Look up the catalog entry owning a skill directory name.
pub fn by_skill_dir(name: &str) -> Option<&'static WorkflowTemplate> {
    CATALOG.iter().find(|t| t.skill_dir == name)
}

/// Render the full SKILL.md for `template`, stamping `version` as the marker.
pub fn render_skill(template: &WorkflowTemplate, version: &str) -> String {
    format!(
        r#"---
name: {name}
description: {description}
license: MIT
compatibility: Requires the specwright CLI.
metadata:
  author: specwright
  version: "1.0"
  generatedBy: "{version}"
---

{body}"#,
        name = template.skill_dir,
        description = template.description,
        body = template.body,
    )
}

/// Build the adapter input for `template`.
pub fn command_content<'a>(
    template: &'a WorkflowTemplate,
    tags: &'a [&'a str],
    version: &'a str,
) -> CommandContent<'a> {
    CommandContent {
        id: template.command_id,
        name: template.title,
        description: template.description,
        category: COMMAND_CATEGORY,
        tags,
        body: template.body,
        generated_by: version,
    }
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

const EXPLORE_BODY: &str = r#"Enter explore mode. Think with the user; do not write code yet.

**Steps**
1. Read `specwright/project.md` and skim the active changes under `specwright/changes/`.
2. Ask clarifying questions until the problem, constraints and success criteria are clear.
3. Sketch options and their trade-offs. Reference existing specs under `specwright/specs/`.
4. When the direction is settled, suggest `/specwright:propose` to capture it as a change.

**Guardrails**
- Never edit project source files in this mode.
- Keep notes concise; the proposal is where decisions get recorded.
"#;

const PROPOSE_BODY: &str = r#"Create a change proposal under `specwright/changes/<change-id>/`.

**Steps**
1. Pick a short kebab-case change id (verb-led, e.g. `add-login-throttle`).
2. Write `proposal.md` with Why, What Changes and Impact sections.
3. Write `tasks.md` as an ordered checklist of small, verifiable tasks.
4. Add spec deltas under `specs/<capability>/spec.md` using ADDED/MODIFIED/REMOVED requirement headings.
5. Stop and ask for review. Implementation happens in `/specwright:apply`.
"#;

const APPLY_BODY: &str = r#"Implement an approved change.

**Steps**
1. Read `proposal.md`, `tasks.md` and the spec deltas for the change.
2. Work through tasks in order; keep each edit minimal and focused.
3. Tick each task in `tasks.md` as soon as it is done.
4. Run the project's tests before reporting completion.
5. Suggest `/specwright:verify` once every task is checked.
"#;

const VERIFY_BODY: &str = r#"Verify an implemented change.

**Steps**
1. For every requirement and scenario in the change's spec deltas, locate the code or test that satisfies it.
2. Report each requirement as satisfied, partial or missing, with file references.
3. Confirm every task in `tasks.md` is checked.
4. If gaps remain, list them and return to `/specwright:apply`.
"#;

const SYNC_BODY: &str = r#"Merge a change's spec deltas into the main specs without archiving it.

**Steps**
1. For each delta file, apply ADDED, MODIFIED and REMOVED requirements to `specwright/specs/<capability>/spec.md`.
2. Preserve requirement ordering and scenario formatting in the target spec.
3. Show the resulting diff and ask for confirmation before writing.
"#;

const ARCHIVE_BODY: &str = r#"Archive a completed change.

**Steps**
1. Confirm every task in `tasks.md` is checked; stop if not.
2. Run `/specwright:sync` if the deltas have not been merged yet.
3. Move the change directory to `specwright/changes/archive/<date>-<change-id>/`.
4. Summarise which specs changed.
"#;

const ONBOARD_BODY: &str = r#"Walk the user through specwright on this project.

**Steps**
1. Explain the layout: `specwright/specs/` holds current truth, `specwright/changes/` holds proposals.
2. Pick a small real improvement together and run it end to end:
   `/specwright:explore`, `/specwright:propose`, `/specwright:apply`, `/specwright:archive`.
3. Pause after each step and explain what was produced.
"#;
