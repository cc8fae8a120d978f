// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use diagnostics::*;
use std::path::Path;

/// Write an example configuration file to fill in
pub fn init_command(config_path: &Path) -> Result<()> {
    let path = config_path.display().to_string();
    debug!("Creating example configuration {path}", path);

    recordstore::create_example_config(config_path)?;

    println!("✓ Created example configuration: {path}");
    println!("  Set the spreadsheet URL and the service account key path, then run 'amr check'");
    Ok(())
}
