// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result, anyhow};
use recordstore::{CollectorConfig, Form, Schema, Session};
use sheets::Worksheet;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "AMR_CONFIG";

/// Config path from the command line, then `AMR_CONFIG`, then the default file
pub fn config_path_with_override(override_path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = override_path {
        return path;
    }
    env::var(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(recordstore::config::DEFAULT_CONFIG_FILE))
}

/// Loaded configuration plus the pieces every command derives from it
pub struct CollectorContext {
    pub config: CollectorConfig,
    pub schema: Schema,
}

impl CollectorContext {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config = recordstore::load_config(config_path).with_context(|| {
            format!("Failed to load configuration from {}", config_path.display())
        })?;
        let schema = config.schema()?;
        Ok(Self { config, schema })
    }

    pub fn form(&self) -> Form {
        Form::for_schema(&self.schema, &self.config.entry_by)
    }

    /// Connect and load the current record set
    pub fn open_session(&self) -> Result<Session<Worksheet>> {
        let worksheet = self.config.open_worksheet()?;
        Ok(Session::open(worksheet, self.schema.clone())?)
    }
}

/// Convert a 1-based record number as shown to the user into a position
pub fn position_of(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Record numbers start at 1"))
}

/// Parse `FIELD=VALUE` assignments; later assignments to a field win
pub fn parse_assignments(assignments: &[String]) -> Result<BTreeMap<String, String>> {
    let mut inputs = BTreeMap::new();
    for assignment in assignments {
        let (field, value) = assignment
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected FIELD=VALUE, got '{assignment}'"))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(anyhow!("Missing field name in '{assignment}'"));
        }
        let _ = inputs.insert(field.to_string(), value.to_string());
    }
    Ok(inputs)
}
