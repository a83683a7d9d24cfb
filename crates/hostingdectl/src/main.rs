// # hostingdectl - hosting.de DNS command-line client
//
// Thin layer over the resource operations of `hostingde-core`: parses
// arguments, resolves credentials, installs logging and maps failures to
// exit codes. No API or retry logic lives here.
//
// ## Configuration
//
// - `--auth-token` / `HOSTINGDE_AUTH_TOKEN`: API auth token (required)
// - `--account-id` / `HOSTINGDE_ACCOUNT_ID`: account to act for (optional)
// - `HOSTINGDE_BASE_URL`: API endpoint prefix (optional)
// - `HOSTINGDE_LOG_LEVEL`: trace, debug, info, warn, error (default: warn)
//
// ## Example
//
// ```bash
// export HOSTINGDE_AUTH_TOKEN=your_token
//
// hostingdectl zone create --name example.test
// hostingdectl record create --zone-id <ZONE_ID> --name www.example.test \
//     --type A --content 192.0.2.1
// ```

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use hostingde_core::{
    ApiClient, ClientConfig, Credentials, ManagedResource, RecordState, ZoneState,
};
use serde_json::Value;
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Command, RecordCommand, ZoneCommand};

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CtlExitCode {
    /// Command completed
    Success = 0,
    /// Configuration error (credentials, environment)
    ConfigError = 1,
    /// API or runtime error
    RuntimeError = 2,
    /// Interrupted by Ctrl-C
    Interrupted = 130,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Map `HOSTINGDE_LOG_LEVEL` to a tracing level
fn parse_log_level(value: &str) -> Option<Level> {
    match value.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Exit code for a failed command
fn exit_code_for(err: &anyhow::Error) -> CtlExitCode {
    match err.downcast_ref::<hostingde_core::Error>() {
        Some(hostingde_core::Error::Config(_)) => CtlExitCode::ConfigError,
        Some(hostingde_core::Error::Cancelled) => CtlExitCode::Interrupted,
        _ => CtlExitCode::RuntimeError,
    }
}

fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let credentials =
        Credentials::resolve(cli.auth.auth_token.clone(), cli.auth.account_id.clone())?;

    let mut config = ClientConfig::new(credentials);
    if let Ok(base_url) = env::var("HOSTINGDE_BASE_URL")
        && !base_url.is_empty()
    {
        config = config.with_base_url(base_url);
    }

    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = env::var("HOSTINGDE_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
    let Some(level) = parse_log_level(&log_level) else {
        eprintln!(
            "Configuration error: HOSTINGDE_LOG_LEVEL '{}' is not valid. \
            Valid levels: trace, debug, info, warn, error",
            log_level
        );
        return CtlExitCode::ConfigError.into();
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let client = match hostingde_http::connect(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::RuntimeError.into();
        }
    };

    let code = rt.block_on(async {
        let cancel = client.cancellation_token().clone();

        tokio::select! {
            result = execute(&client, cli.command) => match result {
                Ok(output) => match serde_json::to_string_pretty(&output) {
                    Ok(text) => {
                        println!("{}", text);
                        CtlExitCode::Success
                    }
                    Err(e) => {
                        error!("Failed to render output: {}", e);
                        CtlExitCode::RuntimeError
                    }
                },
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    exit_code_for(&e)
                }
            },
            _ = tokio::signal::ctrl_c() => {
                cancel.cancel();
                warn!("Interrupted, pending operation abandoned");
                CtlExitCode::Interrupted
            }
        }
    });

    code.into()
}

/// Run one command and return what to print
async fn execute(client: &ApiClient, command: Command) -> Result<Value> {
    match command {
        Command::Zone { action } => zone_command(client, action).await,
        Command::Record { action } => record_command(client, action).await,
    }
}

async fn zone_command(client: &ApiClient, action: ZoneCommand) -> Result<Value> {
    match action {
        ZoneCommand::Create {
            name,
            zone_type,
            email,
        } => {
            let desired = ZoneState::new(name, zone_type).with_email(email.unwrap_or_default());
            let state = ZoneState::create(client, &desired).await?;
            info!("Zone {} is active", state.id);
            Ok(serde_json::to_value(state)?)
        }
        ZoneCommand::Get { id } => {
            let state = read_zone(client, &id).await?;
            Ok(serde_json::to_value(state)?)
        }
        ZoneCommand::Update { id, name, email } => {
            let current = read_zone(client, &id).await?;
            let mut desired = current.clone();
            if let Some(name) = name {
                desired.name = name;
            }
            if let Some(email) = email {
                desired.email = email;
            }

            let state = ZoneState::update(client, &current, &desired).await?;
            Ok(serde_json::to_value(state)?)
        }
        ZoneCommand::Delete { id } => {
            let current = ZoneState {
                id: id.clone(),
                ..ZoneState::default()
            };
            ZoneState::delete(client, &current).await?;
            Ok(serde_json::json!({ "deleted": id }))
        }
    }
}

async fn record_command(client: &ApiClient, action: RecordCommand) -> Result<Value> {
    match action {
        RecordCommand::Create {
            zone_id,
            name,
            record_type,
            content,
            ttl,
        } => {
            let desired = RecordState::new(zone_id, name, record_type, content).with_ttl(ttl);
            let state = RecordState::create(client, &desired).await?;
            Ok(serde_json::to_value(state)?)
        }
        RecordCommand::Get { zone_id, id } => {
            let state = read_record(client, zone_id.as_deref().unwrap_or_default(), &id).await?;
            Ok(serde_json::to_value(state)?)
        }
        RecordCommand::Update {
            zone_id,
            id,
            name,
            record_type,
            content,
            ttl,
        } => {
            let current = read_record(client, &zone_id, &id).await?;
            let mut desired = current.clone();
            if let Some(name) = name {
                desired.name = name;
            }
            if let Some(record_type) = record_type {
                desired.record_type = record_type;
            }
            if let Some(content) = content {
                desired.content = content;
            }
            if let Some(ttl) = ttl {
                desired.ttl = ttl;
            }

            let state = RecordState::update(client, &current, &desired).await?;
            Ok(serde_json::to_value(state)?)
        }
        RecordCommand::Delete { zone_id, id } => {
            let current = RecordState {
                id: id.clone(),
                ..RecordState::new(zone_id.as_str(), "", "", "")
            };
            RecordState::delete(client, &current).await?;
            Ok(serde_json::json!({ "deleted": id, "zone_id": zone_id }))
        }
    }
}

async fn read_zone(client: &ApiClient, id: &str) -> Result<ZoneState> {
    let probe = ZoneState {
        id: id.to_string(),
        ..ZoneState::default()
    };
    ZoneState::read(client, &probe)
        .await?
        .with_context(|| format!("zone {} not found", id))
}

async fn read_record(client: &ApiClient, zone_id: &str, id: &str) -> Result<RecordState> {
    let probe = RecordState {
        id: id.to_string(),
        ..RecordState::new(zone_id, "", "", "")
    };
    RecordState::read(client, &probe).await?.with_context(|| {
        if zone_id.is_empty() {
            format!("record {} not found", id)
        } else {
            format!("record {} not found in zone {}", id, zone_id)
        }
    })
}
