use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ActionArgs, CatalogCommands, SnapshotArgs};

/// Next-step guidance for agent marketing workflows
///
/// Waypoint looks at an agent's profile and the actions they have already
/// completed, and suggests what to do next from a catalog of available
/// actions. It can also run as an MCP (Model Context Protocol) server so AI
/// assistants can ask the same questions.
#[derive(Parser)]
#[command(version, about, name = "wp")]
pub struct Args {
    /// Path to the catalog JSON file. Defaults to
    /// $XDG_CONFIG_HOME/waypoint/catalog.json when present, otherwise the
    /// built-in catalog
    #[arg(long, global = true)]
    pub catalog_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Waypoint CLI
///
/// - `suggest`, `check`, `explain`, `score`: advisory queries over a snapshot
/// - `catalog`: inspect, validate or export the action catalog
/// - `serve`: start the MCP server for AI assistant integration
#[derive(Subcommand)]
pub enum Commands {
    /// Suggest next steps, most useful first
    #[command(alias = "s")]
    Suggest(SnapshotArgs),
    /// Check whether an action's prerequisites are met
    #[command(alias = "c")]
    Check(ActionArgs),
    /// Show contextual help for an action
    #[command(alias = "e")]
    Explain(ActionArgs),
    /// Compute the efficiency score with its breakdown
    Score(SnapshotArgs),
    /// Inspect and manage the action catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
    /// Start the MCP server
    Serve,
}
