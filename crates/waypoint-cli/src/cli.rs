//! Command handlers and argument wrappers
//!
//! Argument structures carry the clap derives and convert into the core's
//! interface-neutral [`Snapshot`]; [`Cli`] runs the advisor and renders the
//! result.
//!
//! ```text
//! User Input → CLI Args (clap) → Snapshot → FlowAdvisor → markdown
//! ```

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use jiff::Timestamp;
use log::debug;
use waypoint_core::{
    display::{CatalogListing, OperationStatus, Suggestions},
    Catalog, CatalogLoader, CompletedAction, FlowAdvisor, Snapshot,
};

use crate::renderer::TerminalRenderer;

/// User state for a query
///
/// Flags and completions given on the command line are added to those read
/// from `--snapshot`.
#[derive(Args, Default)]
pub struct SnapshotArgs {
    /// JSON snapshot file with `flags` and `completed` fields
    #[arg(long, help = "JSON snapshot file with `flags` and `completed` fields")]
    pub snapshot: Option<PathBuf>,
    /// Profile flags that are set
    #[arg(
        short,
        long = "flag",
        value_delimiter = ',',
        help = "Profile flag that is set (basic_info, contact_info, bio, social_links); repeatable"
    )]
    pub flags: Vec<String>,
    /// Completed actions as ID or ID@RFC3339
    #[arg(
        short,
        long = "completed",
        help = "Completed action as ID or ID@RFC3339; repeatable, oldest first"
    )]
    pub completed: Vec<String>,
    /// Time shown in the output header
    #[arg(long, help = "Time shown in the output header (RFC 3339)")]
    pub now: Option<Timestamp>,
}

impl SnapshotArgs {
    /// Merge the snapshot file with command-line flags and completions
    pub fn into_snapshot(self) -> Result<Snapshot> {
        let mut snapshot = match &self.snapshot {
            Some(path) => {
                let document = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
                Snapshot::from_json(&document)
                    .with_context(|| format!("Invalid snapshot {}", path.display()))?
            }
            None => Snapshot::default(),
        };

        snapshot.flags.extend(self.flags);
        snapshot
            .completed
            .extend(self.completed.iter().map(|c| CompletedAction::parse(c)));
        Ok(snapshot)
    }
}

/// A query about a single action
#[derive(Args)]
pub struct ActionArgs {
    #[arg(help = "Catalog id of the action")]
    pub action_id: String,
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List every action and pattern in the catalog
    #[command(alias = "l")]
    List,
    /// Validate the catalog and report any problems
    #[command(alias = "v")]
    Validate,
    /// Print the JSON schema of the catalog document
    Schema,
    /// Write the built-in catalog to a file for customisation
    Init {
        #[arg(help = "Target path. Defaults to $XDG_CONFIG_HOME/waypoint/catalog.json")]
        path: Option<PathBuf>,
    },
}

/// Runs advisory queries against a loaded catalog
pub struct Cli {
    catalog: Catalog,
    advisor: FlowAdvisor,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(catalog: Catalog, renderer: TerminalRenderer) -> Self {
        Self {
            catalog,
            advisor: FlowAdvisor::new(),
            renderer,
        }
    }

    pub fn suggest(&self, args: SnapshotArgs) -> Result<()> {
        let now = args.now;
        let snapshot = args.into_snapshot()?;
        let (profile, history) = snapshot.resolve(&self.catalog)?;

        let suggestions = self
            .advisor
            .suggest_next_steps(&profile, &history, &self.catalog)
            .context("Failed to suggest next steps")?;
        debug!("{} suggestions", suggestions.len());

        self.renderer
            .render(&Suggestions::new(suggestions).generated_at(now).to_string())
    }

    pub fn check(&self, args: ActionArgs) -> Result<()> {
        let ActionArgs {
            action_id,
            snapshot,
        } = args;
        let (profile, history) = snapshot.into_snapshot()?.resolve(&self.catalog)?;

        let check = self
            .advisor
            .check_prerequisites(&action_id, &profile, &history, &self.catalog)
            .with_context(|| format!("Failed to check '{action_id}'"))?;
        self.renderer.render(&check.to_string())
    }

    pub fn explain(&self, args: ActionArgs) -> Result<()> {
        let ActionArgs {
            action_id,
            snapshot,
        } = args;
        let (profile, history) = snapshot.into_snapshot()?.resolve(&self.catalog)?;

        let help = self
            .advisor
            .explain(&action_id, &profile, &history, &self.catalog)
            .with_context(|| format!("Failed to explain '{action_id}'"))?;
        self.renderer.render(&help.to_string())
    }

    pub fn score(&self, args: SnapshotArgs) -> Result<()> {
        let (profile, history) = args.into_snapshot()?.resolve(&self.catalog)?;

        let breakdown = self
            .advisor
            .efficiency_breakdown(&profile, &history, &self.catalog)
            .context("Failed to compute efficiency score")?;
        self.renderer.render(&breakdown.to_string())
    }

    pub fn list_catalog(&self) -> Result<()> {
        self.renderer
            .render(&CatalogListing(&self.catalog).to_string())
    }
}

/// Handles catalog commands, which manage the catalog rather than query it
pub fn handle_catalog_command(
    loader: CatalogLoader,
    renderer: TerminalRenderer,
    command: CatalogCommands,
) -> Result<()> {
    match command {
        CatalogCommands::List => {
            let catalog = loader.load().context("Failed to load catalog")?;
            Cli::new(catalog, renderer).list_catalog()
        }
        CatalogCommands::Validate => match loader.load() {
            Ok(catalog) => renderer.render(
                &OperationStatus::success(format!(
                    "Catalog is valid: {} actions, {} patterns",
                    catalog.actions.len(),
                    catalog.patterns.len()
                ))
                .to_string(),
            ),
            Err(e) => {
                renderer.render(&OperationStatus::failure(e.to_string()).to_string())?;
                bail!("Catalog validation failed")
            }
        },
        CatalogCommands::Schema => {
            let schema = schemars::schema_for!(Catalog);
            let json = serde_json::to_string_pretty(&schema)
                .context("Failed to serialize catalog schema")?;
            println!("{json}");
            Ok(())
        }
        CatalogCommands::Init { path } => {
            let written = CatalogLoader::write_builtin(path.as_deref())
                .context("Failed to write catalog")?;
            renderer.render(
                &OperationStatus::success(format!("Wrote catalog to {}", written.display()))
                    .to_string(),
            )
        }
    }
}
