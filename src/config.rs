use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for CoolieConnect
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CoolieConnectConfig {
    /// Logging settings
    pub observability: ObservabilityConfig,
    /// Simulated backend delays
    pub latency: LatencyConfig,
    /// Flow constants (code lengths, pricing)
    pub flows: FlowConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Emit JSON lines instead of human-readable logs
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LatencyConfig {
    /// Delay before an OTP counts as sent
    pub otp_dispatch_ms: u64,
    /// Delay before an entered OTP counts as verified
    pub otp_verify_ms: u64,
    /// Delay of a PNR lookup
    pub pnr_lookup_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            otp_dispatch_ms: 2000,
            otp_verify_ms: 1500,
            pnr_lookup_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Number of OTP digit cells
    pub otp_length: usize,
    /// Exact PNR length accepted by the passenger dashboard
    pub pnr_length: usize,
    /// Price per luggage item
    pub unit_rate: u32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            otp_length: 6,
            pnr_length: 10,
            unit_rate: 50,
        }
    }
}

impl CoolieConnectConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (coolie-connect.toml)
    /// 3. Environment variables (prefixed with COOLIE_CONNECT__)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if Path::new("coolie-connect.toml").exists() {
            builder = builder.add_source(File::with_name("coolie-connect"));
        }

        // Nested keys use a double underscore: COOLIE_CONNECT__FLOWS__UNIT_RATE=60
        builder = builder.add_source(
            Environment::with_prefix("COOLIE_CONNECT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<CoolieConnectConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = CoolieConnectConfig::load_env_file();
        CoolieConnectConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static CoolieConnectConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}
