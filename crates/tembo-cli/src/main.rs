//! Tembo CLI Application
//!
//! Command-line admin console for the Tembo safari backend.

mod args;
mod cli;
mod handlers;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::Cli;
use log::info;
use renderer::TerminalRenderer;
use tembo_core::{params::ListBookings, DashboardBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        config,
        api_url,
        session_file,
        no_color,
        command,
    } = Args::parse();

    let dashboard = DashboardBuilder::new()
        .with_config_path(config)
        .with_api_url(api_url)
        .with_session_path(session_file)
        .build()
        .context("Failed to initialize dashboard")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(dashboard, renderer);

    info!("Tembo started");

    let result = match command {
        Some(Auth { command }) => cli.handle_auth_command(command).await,
        Some(Itinerary { command }) => cli.handle_itinerary_command(command).await,
        Some(Blog { command }) => cli.handle_blog_command(command).await,
        Some(Staff { command }) => cli.handle_staff_command(command).await,
        Some(Report { command }) => cli.handle_report_command(command).await,
        None => cli.business_overview(&ListBookings::default()).await,
    };

    cli.finish(result)
}
