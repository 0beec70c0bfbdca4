//! Interactive confirmation and tool selection.
//!
//! Drivers only talk to [`Prompter`]; whether a terminal is attached is
//! decided here, never by the drivers themselves.

use inquire::{Confirm, MultiSelect};
use specwright_core::tools::ToolId;
use std::io::IsTerminal;

pub trait Prompter {
    /// Whether prompts can be shown. Drivers must take their
    /// non-interactive fallback instead of prompting when this is false.
    fn is_interactive(&self) -> bool;

    fn confirm(&self, message: &str, default: bool) -> anyhow::Result<bool>;

    /// Pick tools from `options`, with `preselected` checked initially.
    fn select_tools(&self, options: &[ToolId], preselected: &[ToolId])
        -> anyhow::Result<Vec<ToolId>>;
}

/// Prompts on the controlling terminal via `inquire`.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
    }

    fn confirm(&self, message: &str, default: bool) -> anyhow::Result<bool> {
        Ok(Confirm::new(message).with_default(default).prompt()?)
    }

    fn select_tools(
        &self,
        options: &[ToolId],
        preselected: &[ToolId],
    ) -> anyhow::Result<Vec<ToolId>> {
        let labels: Vec<String> = options
            .iter()
            .map(|t| format!("{} ({})", t.name(), t.as_str()))
            .collect();
        let default_indices: Vec<usize> = options
            .iter()
            .enumerate()
            .filter(|(_, t)| preselected.contains(t))
            .map(|(i, _)| i)
            .collect();

        let chosen = MultiSelect::new(
            "Select tools to configure (space to toggle, enter to confirm)",
            labels.clone(),
        )
        .with_default(&default_indices)
        .prompt()?;

        Ok(options
            .iter()
            .zip(&labels)
            .filter(|(_, label)| chosen.contains(label))
            .map(|(&t, _)| t)
            .collect())
    }
}
