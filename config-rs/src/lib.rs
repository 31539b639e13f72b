//! config-rs/lib.rs
//! Process-wide configuration for the drafter services.
//! Values are read once at startup and handed to the pipeline by value;
//! nothing here is consulted mid-request.

use std::env;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/responses";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_INITIAL_RETRY_DELAY_MS: u64 = 500;
pub const DEFAULT_MAX_RETRY_DELAY_MS: u64 = 5_000;
pub const DEFAULT_SERVICE_PORT: u16 = 8000;
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 1024 * 1024;

/// Name used for the `<NAME>_SERVICE_ADDR` / `<NAME>_SERVICE_PORT` variables.
pub const SERVICE_NAME: &str = "DRAFTER";

/// Load a `.env` file if one is present. Missing files are not an error.
pub fn load_dotenv() {
    if dotenv::dotenv().is_ok() {
        log::debug!("Loaded environment from .env");
    }
}

// Reads a variable and parses it, warning and falling back on bad input
fn parse_var<T, F>(lookup: &F, name: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().unwrap_or_else(|_| {
            log::warn!("Invalid value for {}, using default {}", name, default);
            default
        }),
        _ => default,
    }
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Settings for the optional generative backend.
#[derive(Clone)]
pub struct BackendConfig {
    /// API credential. Its presence is what enables the backend.
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    /// Upper bound on one whole backend consultation, retries included.
    pub timeout: Duration,
    pub max_retries: u32,
    pub initial_retry_delay_ms: u64,
    pub max_retry_delay_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            initial_retry_delay_ms: DEFAULT_INITIAL_RETRY_DELAY_MS,
            max_retry_delay_ms: DEFAULT_MAX_RETRY_DELAY_MS,
        }
    }
}

// The api key must never end up in logs
impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("initial_retry_delay_ms", &self.initial_retry_delay_ms)
            .field("max_retry_delay_ms", &self.max_retry_delay_ms)
            .finish()
    }
}

impl BackendConfig {
    /// Reads, through `lookup`:
    /// - OPENAI_API_KEY: enables the backend when non-empty
    /// - OPENAI_MODEL: model identifier (default "gpt-4o-mini")
    /// - OPENAI_TEMPERATURE: sampling temperature (default 0.3)
    /// - OPENAI_API_URL: Responses API endpoint
    /// - OPENAI_TIMEOUT_SECS: bound on one consultation (default 30)
    /// - OPENAI_MAX_RETRIES, OPENAI_INITIAL_RETRY_DELAY_MS, OPENAI_MAX_RETRY_DELAY_MS
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            api_key: non_empty(&lookup, "OPENAI_API_KEY"),
            api_url: non_empty(&lookup, "OPENAI_API_URL").unwrap_or(defaults.api_url),
            model: non_empty(&lookup, "OPENAI_MODEL").unwrap_or(defaults.model),
            temperature: parse_var(&lookup, "OPENAI_TEMPERATURE", defaults.temperature),
            timeout: Duration::from_secs(parse_var(
                &lookup,
                "OPENAI_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )),
            max_retries: parse_var(&lookup, "OPENAI_MAX_RETRIES", defaults.max_retries),
            initial_retry_delay_ms: parse_var(
                &lookup,
                "OPENAI_INITIAL_RETRY_DELAY_MS",
                defaults.initial_retry_delay_ms,
            ),
            max_retry_delay_ms: parse_var(
                &lookup,
                "OPENAI_MAX_RETRY_DELAY_MS",
                defaults.max_retry_delay_ms,
            ),
        }
    }

    /// Whether a generative backend should be constructed at all
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Settings for the HTTP front end.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub max_payload_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_SERVICE_PORT)),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

impl GatewayConfig {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            bind_addr: bind_address_from(&lookup, SERVICE_NAME, DEFAULT_SERVICE_PORT),
            max_payload_bytes: parse_var(
                &lookup,
                "DRAFTER_MAX_PAYLOAD_BYTES",
                DEFAULT_MAX_PAYLOAD_BYTES,
            ),
        }
    }
}

/// Everything the process needs, built once in `main`.
#[derive(Debug, Clone, Default)]
pub struct DrafterConfig {
    pub backend: BackendConfig,
    pub gateway: GatewayConfig,
}

impl DrafterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            backend: BackendConfig::from_lookup(&lookup),
            gateway: GatewayConfig::from_lookup(&lookup),
        }
    }
}

fn service_port_from<F>(lookup: &F, service_name: &str, default_port: u16) -> u16
where
    F: Fn(&str) -> Option<String>,
{
    let var_name = format!("{}_SERVICE_PORT", service_name.to_uppercase());
    parse_var(lookup, &var_name, default_port)
}

fn bind_address_from<F>(lookup: &F, service_name: &str, default_port: u16) -> SocketAddr
where
    F: Fn(&str) -> Option<String>,
{
    let var_name = format!("{}_SERVICE_ADDR", service_name.to_uppercase());

    if let Some(addr_str) = non_empty(lookup, &var_name) {
        let stripped = addr_str
            .strip_prefix("http://")
            .or_else(|| addr_str.strip_prefix("https://"))
            .unwrap_or(&addr_str);
        match stripped.trim_end_matches('/').parse::<SocketAddr>() {
            Ok(addr) => return addr,
            Err(_) => log::warn!("Invalid address format in {}, using default", var_name),
        }
    }

    let port = service_port_from(lookup, service_name, default_port);
    SocketAddr::from((Ipv4Addr::LOCALHOST, port))
}
