use std::path::PathBuf;

use anyhow::{Context, Result};
use api_gateway::{ApiGateway, ApiGatewayConfig, RestApiCapability};
use axum::Router;
use calc_bootstrap::{
    AppConfig, CliArgs, init_logging, module_config_or_default, spawn_shutdown_listener,
};
use clap::{Parser, Subcommand};
use matrix_calc::{MatrixCalc, MatrixCalcConfig};
use mimalloc::MiMalloc;
use tokio_util::sync::CancellationToken;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Matrix Calculator Server - arithmetic on JSON matrices over HTTP
#[derive(Parser)]
#[command(name = "matrix-calc-server")]
#[command(about = "Matrix Calculator Server - arithmetic on JSON matrices over HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

/// Modules hosted by this binary, built from their config sections.
struct Modules {
    gateway: ApiGateway,
    matrix_calc: MatrixCalc,
}

impl Modules {
    fn from_config(config: &AppConfig) -> Result<Self> {
        let gateway_cfg: ApiGatewayConfig = module_config_or_default(config, ApiGateway::NAME)?;
        let calc_cfg: MatrixCalcConfig = module_config_or_default(config, MatrixCalc::NAME)?;
        Ok(Self {
            gateway: ApiGateway::new(gateway_cfg),
            matrix_calc: MatrixCalc::new(calc_cfg),
        })
    }

    fn build_router(&self) -> Result<Router> {
        let rest: [&dyn RestApiCapability; 1] = [&self.matrix_calc];
        self.gateway.build_router(&rest)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.clone(),
        verbose: cli.verbose,
    };

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load_with_cli(&args)?;
    if let Some(port) = cli.port {
        apply_port_override(&mut config, port)?;
    }

    if cli.print_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(&config).await,
        Commands::Check => check_config(&config),
    }
}

fn apply_port_override(config: &mut AppConfig, port: u16) -> Result<()> {
    let mut gateway_cfg: ApiGatewayConfig = module_config_or_default(config, ApiGateway::NAME)?;
    gateway_cfg.set_port(port)?;
    let value = serde_json::to_value(&gateway_cfg).context("failed to encode api_gateway config")?;
    config.set_module_config(ApiGateway::NAME, value);
    Ok(())
}

fn check_config(config: &AppConfig) -> Result<()> {
    let modules = Modules::from_config(config)?;
    modules.gateway.config().socket_addr()?;
    modules.build_router()?;
    if config.logging.file.is_some() {
        config.home_dir(false)?;
    }

    println!("Configuration is valid");
    println!("{}", config.to_pretty_json()?);
    Ok(())
}

async fn run_server(config: &AppConfig) -> Result<()> {
    let home_dir = if config.logging.file.is_some() {
        config.home_dir(true)?
    } else {
        PathBuf::new()
    };
    let _log_guard = init_logging(&config.logging, &home_dir)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Matrix Calculator Server starting"
    );

    let modules = Modules::from_config(config)?;
    let router = modules.build_router()?;

    let cancel = CancellationToken::new();
    let signals = spawn_shutdown_listener(cancel.clone());

    let result = modules.gateway.serve(router, cancel.clone()).await;

    cancel.cancel();
    if let Err(e) = signals.await {
        tracing::warn!(error = %e, "Signal listener task failed");
    }

    tracing::info!("Matrix Calculator Server stopped");
    result
}
