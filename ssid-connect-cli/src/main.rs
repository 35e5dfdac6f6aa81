//! SSID Connect command-line frontend
//!
//! Saves WiFi networks to a local store and joins the first reachable one.
//! Notices go to stdout, logs to stderr (`RUST_LOG` controls the level).

mod config;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ssid_connect_app::adapters::FileKeyValueStorage;
use ssid_connect_app::platform::{detect_platform, PlatformProfile};
use ssid_connect_app::{AppState, AppStateBuilder, Notice, NoticeAction, NoticeLevel};
use ssid_connect_core::types::ConnectConfig;

#[derive(Debug, Parser)]
#[command(name = "ssid-connect", version)]
#[command(about = "Save WiFi networks and connect to the first one in range")]
struct Cli {
    /// Directory holding the saved networks and config.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Save a new network
    Add {
        ssid: String,
        /// Leave out for open networks
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Show saved networks in connection order
    List {
        #[arg(long)]
        show_passwords: bool,
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the name or password of a saved network
    Edit {
        id: String,
        #[arg(long)]
        ssid: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Remove a saved network
    Delete { id: String },
    /// Try the saved networks in order until one connects
    Connect {
        /// Open the system WiFi settings when joining must happen there
        #[arg(long)]
        open_settings: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let data_dir =
        config::resolve_data_dir(cli.data_dir, std::env::var_os(config::DATA_DIR_ENV))?;
    let connect_config = config::load_file_config(&data_dir)?.connect_config()?;
    tracing::debug!("Data directory: {}", data_dir.display());

    // Only connecting needs the WiFi stack; skip detection for list edits.
    let profile = if matches!(cli.command, Commands::Connect { .. }) {
        detect_platform(connect_config.join_timeout).await
    } else {
        PlatformProfile::restricted()
    };

    let state = build_state(&data_dir, connect_config, profile)?;
    let notice = dispatch(&state, cli.command).await?;

    if let Some(ref notice) = notice {
        print_notice(notice);
    }
    Ok(if is_failure(notice.as_ref()) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn build_state(
    data_dir: &Path,
    connect_config: ConnectConfig,
    profile: PlatformProfile,
) -> Result<AppState> {
    Ok(AppStateBuilder::new()
        .key_value_storage(Arc::new(FileKeyValueStorage::new(data_dir)))
        .platform(profile)
        .connect_config(connect_config)
        .build()?)
}

async fn dispatch(state: &AppState, command: Commands) -> Result<Option<Notice>> {
    Ok(match command {
        Commands::Add { ssid, password } => {
            Some(state.add_controller().submit(&ssid, &password).await)
        }
        Commands::List {
            show_passwords,
            json,
        } => list(state, show_passwords, json).await?,
        Commands::Edit { id, ssid, password } => edit(state, &id, ssid, password).await?,
        Commands::Delete { id } => delete(state, &id).await?,
        Commands::Connect { open_settings } => Some(connect(state, open_settings).await),
    })
}

fn is_failure(notice: Option<&Notice>) -> bool {
    notice.is_some_and(Notice::is_error)
}

async fn list(state: &AppState, show_passwords: bool, json: bool) -> Result<Option<Notice>> {
    let controller = state.list_controller();
    if let Some(notice) = controller.reload().await {
        return Ok(Some(notice));
    }

    let mut networks = controller.networks().await;
    if !show_passwords {
        for network in &mut networks {
            network.password = mask(&network.password);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&networks)?);
        return Ok(None);
    }

    if networks.is_empty() {
        return Ok(Some(Notice::info(
            "No Networks",
            "No saved WiFi networks yet. Add one with `ssid-connect add <SSID>`.",
        )));
    }

    let id_width = networks.iter().map(|n| n.id.len()).max().unwrap_or(2).max(2);
    let ssid_width = networks.iter().map(|n| n.ssid.len()).max().unwrap_or(4).max(4);
    println!("{:<id_width$}  {:<ssid_width$}  PASSWORD", "ID", "SSID");
    for network in &networks {
        println!(
            "{:<id_width$}  {:<ssid_width$}  {}",
            network.id, network.ssid, network.password
        );
    }
    Ok(None)
}

async fn edit(
    state: &AppState,
    id: &str,
    ssid: Option<String>,
    password: Option<String>,
) -> Result<Option<Notice>> {
    if ssid.is_none() && password.is_none() {
        bail!("Nothing to change, pass --ssid and/or --password");
    }

    let controller = state.list_controller();
    if let Some(notice) = controller.reload().await {
        return Ok(Some(notice));
    }
    if !controller.begin_edit(id).await {
        bail!("No saved network with id {id}");
    }
    let draft = controller
        .draft()
        .await
        .context("Edit draft was closed unexpectedly")?;

    controller
        .set_draft(
            ssid.as_deref().unwrap_or(&draft.ssid),
            password.as_deref().unwrap_or(&draft.password),
        )
        .await;
    Ok(controller.save_edit().await)
}

async fn delete(state: &AppState, id: &str) -> Result<Option<Notice>> {
    let controller = state.list_controller();
    if let Some(notice) = controller.reload().await {
        return Ok(Some(notice));
    }
    let Some(network) = controller.networks().await.into_iter().find(|n| n.id == id) else {
        bail!("No saved network with id {id}");
    };

    Ok(Some(controller.delete(id).await.unwrap_or_else(|| {
        Notice::success("Deleted", format!("Removed {}", network.ssid))
    })))
}

async fn connect(state: &AppState, open_settings: bool) -> Notice {
    let home = state.home_controller();
    let notice = home.connect().await;

    if open_settings && notice.action == Some(NoticeAction::OpenWifiSettings) {
        if let Some(failure) = home.open_wifi_settings().await {
            return failure;
        }
    }
    notice
}

fn print_notice(notice: &Notice) {
    let marker = match notice.level {
        NoticeLevel::Info => "i",
        NoticeLevel::Success => "✓",
        NoticeLevel::Warning => "!",
        NoticeLevel::Error => "✗",
    };
    println!("{marker} {}: {}", notice.title, notice.message);
    if notice.action == Some(NoticeAction::OpenWifiSettings) {
        println!("  Run `ssid-connect connect --open-settings` to open WiFi settings.");
    }
}

fn mask(password: &str) -> String {
    if password.is_empty() {
        "(open)".to_string()
    } else {
        "*".repeat(8)
    }
}
