//! Waypoint CLI Application
//!
//! Command-line interface and MCP server for next-step guidance.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::{handle_catalog_command, Cli, SnapshotArgs};
use log::info;
use mcp::{run_stdio_server, WaypointMcpServer};
use renderer::TerminalRenderer;
use waypoint_core::CatalogLoader;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        catalog_file,
        no_color,
        command,
    } = Args::parse();

    let loader = CatalogLoader::new().with_catalog_path(catalog_file);
    let renderer = TerminalRenderer::new(!no_color);

    info!("Waypoint started");

    match command {
        Some(Suggest(args)) => Cli::new(load(loader)?, renderer).suggest(args),
        Some(Check(args)) => Cli::new(load(loader)?, renderer).check(args),
        Some(Explain(args)) => Cli::new(load(loader)?, renderer).explain(args),
        Some(Score(args)) => Cli::new(load(loader)?, renderer).score(args),
        Some(Catalog { command }) => handle_catalog_command(loader, renderer, command),
        Some(Serve) => {
            info!("Starting Waypoint MCP server");
            run_stdio_server(WaypointMcpServer::new(load(loader)?))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(load(loader)?, renderer).suggest(SnapshotArgs::default()),
    }
}

fn load(loader: CatalogLoader) -> Result<waypoint_core::Catalog> {
    loader.load().context("Failed to load catalog")
}
