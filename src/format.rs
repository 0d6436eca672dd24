//! Output formatting for the CLI: YAML, JSON and markdown.

use crate::config::{Document, render_document};
use crate::runners::LaunchCommand;
use crate::types::Game;
use anyhow::Result;
use serde_json::Value;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
    Markdown,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

/// Format a config document.
///
/// Markdown renders as a fenced YAML block.
pub fn format_document(doc: &Document, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(render_document(doc)?),
        OutputFormat::Json => {
            let json: Value = serde_json::to_value(doc)?;
            Ok(serde_json::to_string_pretty(&json)?)
        }
        OutputFormat::Markdown => Ok(format!("```yaml\n{}```\n", render_document(doc)?)),
    }
}

/// Format a single YAML value (the result of `get`).
pub fn format_value(value: &serde_yaml::Value, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml | OutputFormat::Markdown => Ok(serde_yaml::to_string(value)?),
    }
}

/// Format the game library.
pub fn format_games(games: &[Game], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(games)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(games)?),
        OutputFormat::Markdown => Ok(format_games_markdown(games)),
    }
}

/// Format a list of games as markdown.
pub fn format_games_markdown(games: &[Game]) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Games ({})\n\n", games.len()));

    if games.is_empty() {
        md.push_str("_No games in library._\n");
        return md;
    }

    for game in games {
        md.push_str(&format!("- **{}** (`{}`)", game.name, game.slug));
        if let Some(ref runner) = game.runner {
            md.push_str(&format!(" runner: {}", runner));
        }
        if !game.installed {
            md.push_str(" [not installed]");
        }
        md.push('\n');
    }

    md
}

/// Format a launch command.
pub fn format_launch(launch: &LaunchCommand, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(launch)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(launch)?),
        OutputFormat::Markdown => Ok(format!("```sh\n{}\n```\n", shell_join(&launch.command))),
    }
}

/// Join arguments into a copy-pasteable shell line.
fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || "'\"\\$`".contains(c)) {
                format!("'{}'", arg.replace('\'', r"'\''"))
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
