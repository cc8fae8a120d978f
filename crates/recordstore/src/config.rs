// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! YAML configuration for the collector.

use crate::error::StoreError;
use crate::schema::Schema;
use anyhow::{Context, Result};
use diagnostics::*;
use serde::{Deserialize, Serialize};
use sheets::{ServiceAccount, SheetsClient, Table, Worksheet};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "amr-config.yaml";

const EXAMPLE_CONFIG: &str = r#"# Spreadsheet URL or bare spreadsheet id
spreadsheet: "https://docs.google.com/spreadsheets/d/YOUR_SPREADSHEET_ID/edit"

# Worksheet index within the spreadsheet (0 is the first tab)
worksheet: 0

# Service account key file, relative to this config file
credentials: "service-account.json"

# Seconds an access token is reused before re-authenticating
token_ttl_secs: 3600

# Default for the Entry_By field
entry_by: ""
"#;

fn default_token_ttl_secs() -> u64 {
    3600
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Spreadsheet URL or id
    pub spreadsheet: String,
    #[serde(default)]
    pub worksheet: usize,
    /// Path to the service account key file
    pub credentials: PathBuf,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    #[serde(default)]
    pub entry_by: String,
    /// Replaces the built-in AMR field list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    /// Alternate Sheets API endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl CollectorConfig {
    pub fn schema(&self) -> Result<Schema> {
        match &self.fields {
            Some(fields) => Schema::new(fields.iter().cloned()).context("Invalid fields list"),
            None => Ok(Schema::amr()),
        }
    }

    #[must_use]
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    #[must_use]
    pub fn credentials_path(&self) -> PathBuf {
        if self.credentials.is_absolute() {
            self.credentials.clone()
        } else {
            self.base_dir.join(&self.credentials)
        }
    }

    /// Authenticate and resolve the configured worksheet
    pub fn open_worksheet(&self) -> Result<Worksheet, StoreError> {
        let account =
            ServiceAccount::from_file(self.credentials_path()).map_err(StoreError::from_open)?;
        let mut client = SheetsClient::from_service_account(account, self.token_ttl())
            .map_err(StoreError::from_open)?;
        if let Some(base) = &self.api_base {
            client = client.with_api_base(base).map_err(StoreError::from_open)?;
        }
        let client = Rc::new(client);

        let key = sheets::spreadsheet_id(&self.spreadsheet).map_err(StoreError::from_open)?;
        let spreadsheet = SheetsClient::open_by_key(&client, &key).map_err(StoreError::from_open)?;
        let worksheet = spreadsheet
            .worksheet(self.worksheet)
            .map_err(StoreError::from_open)?;

        let title = spreadsheet.title().to_string();
        let tab = worksheet.title();
        info!("Connected to spreadsheet {title}, worksheet {tab}", title, tab);
        Ok(worksheet)
    }
}

/// Parse and validate configuration text
pub fn parse_config(text: &str) -> Result<CollectorConfig> {
    let config: CollectorConfig =
        serde_yaml_ng::from_str(text).with_context(|| "Failed to parse YAML configuration")?;
    validate_config(&config)?;
    Ok(config)
}

/// Load configuration from YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CollectorConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config = parse_config(&content)?;
    config.base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(config)
}

/// Validate configuration
pub fn validate_config(config: &CollectorConfig) -> Result<()> {
    if config.spreadsheet.trim().is_empty() {
        anyhow::bail!("spreadsheet cannot be empty");
    }

    if config.credentials.as_os_str().is_empty() {
        anyhow::bail!("credentials cannot be empty");
    }

    if config.token_ttl_secs == 0 {
        anyhow::bail!("token_ttl_secs must be greater than 0");
    }

    let _ = config.schema()?;
    Ok(())
}

/// Write a commented example configuration, refusing to overwrite
pub fn create_example_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        anyhow::bail!("Config file already exists: {}", path.display());
    }
    std::fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}
