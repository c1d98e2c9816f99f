// # poultryd - Poultry Record Daemon
//
// Thin integration layer: all record logic lives in poultry-core and the
// routes in poultry-api.
//
// The poultryd daemon is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Building the record store through the registry
// 4. Serving the HTTP API until SIGTERM/SIGINT, then flushing the store
//
// ## Configuration
//
// - `POULTRY_LISTEN_ADDR`: Address to bind (default `0.0.0.0:3000`)
// - `POULTRY_STORE_TYPE`: Record store type (`file`, `memory`; default `file`)
// - `POULTRY_STORE_PATH`: Path to the store file (default `data/poultry.json`)
// - `POULTRY_SHUTDOWN_GRACE_SECS`: Seconds to drain requests on shutdown (default 10)
// - `POULTRY_LOG_LEVEL`: trace, debug, info, warn, error (default `info`)
//
// ## Example
//
// ```bash
// export POULTRY_STORE_TYPE=file
// export POULTRY_STORE_PATH=/var/lib/poultry/records.json
//
// poultryd
// ```

use anyhow::Result;
use poultry_core::config::{DEFAULT_LISTEN_ADDR, DEFAULT_STORE_PATH};
use poultry_core::{PoultryConfig, RecordService, ServerConfig, StoreConfig, StoreRegistry};
use std::env;
use std::process::ExitCode;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum PoultryExitCode {
    CleanShutdown = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<PoultryExitCode> for ExitCode {
    fn from(code: PoultryExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Daemon configuration as read from the environment
#[derive(Debug)]
struct Config {
    listen_addr: String,
    store_type: String,
    store_path: String,
    shutdown_grace_secs: u64,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let shutdown_grace_secs = match lookup("POULTRY_SHUTDOWN_GRACE_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                anyhow::anyhow!(
                    "POULTRY_SHUTDOWN_GRACE_SECS must be a whole number of seconds. Got: {}",
                    raw
                )
            })?,
            None => ServerConfig::default().shutdown_grace_secs,
        };

        Ok(Self {
            listen_addr: lookup("POULTRY_LISTEN_ADDR")
                .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            store_type: lookup("POULTRY_STORE_TYPE").unwrap_or_else(|| "file".to_string()),
            store_path: lookup("POULTRY_STORE_PATH")
                .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string()),
            shutdown_grace_secs,
            log_level: lookup("POULTRY_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        match self.store_type.as_str() {
            "file" | "memory" => {}
            _ => anyhow::bail!(
                "POULTRY_STORE_TYPE '{}' is not supported. \
                Supported types: file, memory",
                self.store_type
            ),
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "POULTRY_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        self.to_poultry_config().validate()?;
        Ok(())
    }

    fn to_poultry_config(&self) -> PoultryConfig {
        let store = match self.store_type.as_str() {
            "memory" => StoreConfig::Memory,
            _ => StoreConfig::File {
                path: self.store_path.clone(),
            },
        };

        PoultryConfig {
            server: ServerConfig {
                listen_addr: self.listen_addr.clone(),
                shutdown_grace_secs: self.shutdown_grace_secs,
            },
            store,
        }
    }

    fn log_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return PoultryExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return PoultryExitCode::ConfigError.into();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level())
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return PoultryExitCode::ConfigError.into();
    }

    info!("Starting poultryd");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return PoultryExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_daemon(config.to_poultry_config()).await {
            error!("Daemon error: {:#}", e);
            PoultryExitCode::RuntimeError
        } else {
            PoultryExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Run the daemon until a shutdown signal arrives
async fn run_daemon(config: PoultryConfig) -> Result<()> {
    let registry = StoreRegistry::with_builtin();
    let store = registry.create_store(&config.store).await?;
    let service = RecordService::from_boxed(store);
    info!("Record store: {}", service.store_name());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;
    info!("Listening on {}", addr);

    let app = poultry_api::router(service.clone());
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        signal = wait_for_shutdown() => {
            info!("Received shutdown signal: {}", signal?);
            let _ = stop_tx.send(());

            let grace = Duration::from_secs(config.server.shutdown_grace_secs);
            match tokio::time::timeout(grace, &mut server).await {
                Ok(joined) => joined??,
                Err(_) => {
                    warn!("In-flight requests still running after {:?}, aborting", grace);
                    server.abort();
                }
            }
        }
        joined = &mut server => {
            joined??;
            anyhow::bail!("Server stopped without a shutdown signal");
        }
    }

    service.flush().await?;
    info!("Shutdown complete");
    Ok(())
}

/// Wait for SIGTERM or SIGINT
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    let name = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    Ok(name)
}

/// Wait for CTRL-C
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_use_file_store() {
        let cfg = config(&[]).unwrap();
        cfg.validate().unwrap();

        let poultry = cfg.to_poultry_config();
        assert_eq!(poultry.server.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(
            poultry.store,
            StoreConfig::File {
                path: DEFAULT_STORE_PATH.to_string()
            }
        );
        assert_eq!(cfg.log_level(), Level::INFO);
    }

    #[test]
    fn memory_store_ignores_path() {
        let cfg = config(&[("POULTRY_STORE_TYPE", "memory"), ("POULTRY_STORE_PATH", "")]).unwrap();
        cfg.validate().unwrap();
        assert_eq!(cfg.to_poultry_config().store, StoreConfig::Memory);
    }

    #[test]
    fn rejects_unknown_store_type() {
        let cfg = config(&[("POULTRY_STORE_TYPE", "mongodb")]).unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_empty_file_path() {
        let cfg = config(&[("POULTRY_STORE_PATH", " ")]).unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bad_listen_addr() {
        let cfg = config(&[("POULTRY_LISTEN_ADDR", "localhost")]).unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bad_log_level() {
        let cfg = config(&[("POULTRY_LOG_LEVEL", "verbose")]).unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_grace_over_limit() {
        let cfg = config(&[("POULTRY_SHUTDOWN_GRACE_SECS", "301")]).unwrap();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_numeric_grace() {
        assert!(config(&[("POULTRY_SHUTDOWN_GRACE_SECS", "soon")]).is_err());
    }
}
