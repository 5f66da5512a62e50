//! Gateway configuration and credential bootstrap
//!
//! Resolution priority per credential: environment variable, then the TOML
//! config file, then an interactive prompt whose answer is persisted back to
//! the file for future runs. Bootstrap completes before the router is built;
//! request handlers only ever see the resolved, immutable values.

use ampm_common::{config as common_config, Error, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const CONFIG_FILE_NAME: &str = "ampm-gw.toml";
pub const DEFAULT_STOREFRONT: &str = "us";
pub const DEFAULT_PORT: u16 = 5740;

const DEVELOPER_TOKEN_ENV: &str = "AMPM_DEVELOPER_TOKEN";
const USER_TOKEN_ENV: &str = "AMPM_USER_TOKEN";

/// On-disk gateway config. Token fields hold values entered at the prompt so
/// the operator is only asked once.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub developer_token: Option<String>,
    pub user_token: Option<String>,
    pub storefront: Option<String>,
    pub port: Option<u16>,
}

/// Resolved gateway configuration; immutable once the server starts
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub developer_token: String,
    pub user_token: String,
    pub storefront: String,
    pub port: u16,
}

/// Load gateway configuration, prompting on stdin for missing credentials.
pub fn load(config_path: Option<PathBuf>, port_override: Option<u16>) -> Result<GatewayConfig> {
    let path = config_path.unwrap_or_else(|| common_config::config_file_path(CONFIG_FILE_NAME));
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    load_with_io(&path, port_override, &mut stdin.lock(), &mut stdout)
}

/// Load with injected input/output streams so the prompt path is testable.
pub fn load_with_io(
    path: &Path,
    port_override: Option<u16>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<GatewayConfig> {
    let mut file: ConfigFile = if path.exists() {
        common_config::read_toml(path)?
    } else {
        ConfigFile::default()
    };
    let mut dirty = false;

    let developer_token = resolve_token(
        "developer token",
        DEVELOPER_TOKEN_ENV,
        &mut file.developer_token,
        &mut dirty,
        input,
        output,
    )?;
    let user_token = resolve_token(
        "user token",
        USER_TOKEN_ENV,
        &mut file.user_token,
        &mut dirty,
        input,
        output,
    )?;

    if dirty {
        common_config::write_toml(path, &file)?;
        info!("Saved entered credentials to {}", path.display());
    }

    Ok(GatewayConfig {
        developer_token,
        user_token,
        storefront: file
            .storefront
            .unwrap_or_else(|| DEFAULT_STOREFRONT.to_string()),
        port: port_override.or(file.port).unwrap_or(DEFAULT_PORT),
    })
}

/// Resolve one credential: ENV wins, then the stored file value, then a
/// prompt whose answer is written back into `stored`.
fn resolve_token(
    label: &str,
    env_var: &str,
    stored: &mut Option<String>,
    dirty: &mut bool,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<String> {
    if let Ok(value) = std::env::var(env_var) {
        if !value.trim().is_empty() {
            info!("{} loaded from environment variable {}", label, env_var);
            return Ok(value);
        }
    }

    if let Some(value) = stored {
        if !value.trim().is_empty() {
            info!("{} loaded from config file", label);
            return Ok(value.clone());
        }
    }

    write!(output, "Enter {label}: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let value = line.trim().to_string();
    if value.is_empty() {
        return Err(Error::Config(format!(
            "{label} not provided (set {env_var} or rerun and enter a value)"
        )));
    }

    *stored = Some(value.clone());
    *dirty = true;
    Ok(value)
}
