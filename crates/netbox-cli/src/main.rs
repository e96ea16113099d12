//! netbox CLI
//!
//! Operator commands for a NetBox inventory: count devices, seed demo data,
//! and print the device report.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use netbox_api::DeviceStatus;
use netbox_client::NetboxClient;
use netbox_inventory::{
    ApiDeviceSource, DeviceReport, ReportParams, Script, Seeder, TracingLog, count_devices,
};

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "netbox", version)]
#[command(about = "Operator tooling for a NetBox inventory", long_about = None)]
struct Cli {
    /// NetBox API root
    #[arg(long, env = "NETBOX_URL", global = true)]
    url: Option<String>,

    /// NetBox API token
    #[arg(long, env = "NETBOX_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Path to a netbox.toml config file
    #[arg(long, env = "NETBOX_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count devices, per status or for one status
    Count {
        /// Filter devices by status (e.g. active, planned, decommissioned)
        #[arg(long)]
        status: Option<String>,
    },
    /// Populate NetBox with a demo topology
    Seed,
    /// YAML report of devices grouped by site and rack
    Report {
        /// Device status
        #[arg(long)]
        status: DeviceStatus,

        /// Filter by site name
        #[arg(long)]
        site: Option<String>,

        /// Filter by rack name; add --site when the name exists in several sites
        #[arg(long)]
        rack: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Config::load_default(cli.config.as_deref())?.resolve(cli.url, cli.token);
    let client = NetboxClient::new(&settings)?;

    match cli.command {
        Commands::Count { status } => {
            if let Some(count) = count_devices(&client, status.as_deref()).await {
                println!("{}", count.render());
            }
        }
        Commands::Seed => {
            let summary = Seeder::new(&client).run().await?;
            println!("Created {} objects", summary.object_count());
        }
        Commands::Report { status, site, rack } => {
            let params = ReportParams { status, site, rack };
            let report = DeviceReport::new(ApiDeviceSource::new(client));
            let outcome = report.run(&params, &TracingLog).await;
            if let Some(text) = outcome.text() {
                println!("{text}");
            }
        }
    }

    Ok(())
}
