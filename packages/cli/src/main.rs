#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Terminal front end for the London crime dashboard.
//!
//! With a subcommand it prints one view and exits. Without one it opens an
//! interactive session that redraws the summary whenever the selection
//! changes.

mod interactive;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crime_dashboard::{Dashboard, DashboardConfig};
use crime_dashboard_analytics_models::Selection;

#[derive(Parser)]
#[command(name = "crime_dashboard", about = "London crime dashboard")]
struct Cli {
    /// Path to a TOML config file. Dataset locations can also be set with
    /// the `CRIME_DASHBOARD_*` environment variables.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every view for a selection as JSON
    View {
        /// Month label (e.g., "2025-01"), or "all"
        #[arg(long)]
        month: Option<String>,
        /// Borough display name (e.g., "Camden"), or "all"
        #[arg(long)]
        area: Option<String>,
        /// Crime type to select. Repeat for several.
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// List the months present in the incident data
    Months,
    /// Print a borough's socio-economic profile
    Socio {
        /// Borough display name
        area: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = DashboardConfig::load(cli.config.as_deref())?;
    let mut dashboard = Dashboard::load(&config).await?;

    let Some(command) = cli.command else {
        return interactive::run(&mut dashboard);
    };

    match command {
        Commands::View {
            month,
            area,
            categories,
        } => {
            if let Some(Selection::Only(name)) = area.as_deref().map(Selection::from)
                && !dashboard.store().has_area(&name)
            {
                log::warn!("{name} is not a borough in the boundary data");
            }
            let actions =
                render::actions_from_args(month.as_deref(), area.as_deref(), &categories);
            for action in &actions {
                dashboard.dispatch(action);
            }

            let snapshot = dashboard.snapshot();
            let report = render::ViewReport::new(
                &snapshot,
                dashboard.area_shades(),
                dashboard.socio_profile(),
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Months => {
            for month in dashboard.store().available_months() {
                println!("{month}");
            }
        }
        Commands::Socio { area } => {
            if !dashboard.store().has_area(&area) {
                log::warn!("{area} is not a borough in the boundary data");
            }
            match dashboard.store().socio_profile(&Selection::only(area.as_str())) {
                Some(entry) => print!("{}", render::SocioSummary { area: &area, entry }),
                None => {
                    log::warn!("No socio-economic row for {area}");
                    println!("No socio-economic data for {area}");
                }
            }
        }
    }

    Ok(())
}
