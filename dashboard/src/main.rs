use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dashboard::config::{DashboardConfig, Surface};
use dashboard::session::Session;
use dashboard::view::ConsoleBridge;
use tokio::runtime::Builder as TokioBuilder;

#[derive(Parser)]
#[command(author, version, about = "Headless driver for the CrowdCount occupancy dashboard")]
struct Args {
    /// Load dashboard settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Backend base URL, e.g. http://127.0.0.1:5000
    #[arg(long)]
    base_url: Option<String>,
    /// Bearer token for authenticated endpoints
    #[arg(long)]
    token: Option<String>,
    /// Surface to drive; admin polls every area, user only assigned ones
    #[arg(long, value_enum)]
    surface: Option<Surface>,
    /// Poll zone lists as if the zones view were open
    #[arg(long, default_value_t = false)]
    watch_zones: bool,
    /// Run a single polling cycle and append a summary report
    #[arg(long, default_value_t = false)]
    once: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = &args.config {
        DashboardConfig::load(path)?
    } else {
        DashboardConfig::default()
    };
    config.apply_cli(args.base_url, args.token, args.surface, args.watch_zones);

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating dashboard runtime")?;

    runtime.block_on(async {
        let mut session = Session::connect(config).await;
        let mut view = ConsoleBridge::new();

        if args.once {
            let status = session.run_once(&mut view).await;
            let snapshot = session.metrics();

            println!(
                "Single cycle -> status {}, areas {}, failures {}, alerts {}",
                status.label(),
                session.areas().len(),
                snapshot.failures,
                snapshot.alerts_raised
            );

            let report = format!(
                "status={} areas={} failures={} alerts={}\n",
                status.label(),
                session.areas().len(),
                snapshot.failures,
                snapshot.alerts_raised
            );
            let report_path = PathBuf::from("logs/cycle_report.log");
            if let Some(parent) = report_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(report_path)?;
            file.write_all(report.as_bytes())?;
        } else {
            session.run(&mut view).await?;
        }

        Ok::<(), anyhow::Error>(())
    })
}
