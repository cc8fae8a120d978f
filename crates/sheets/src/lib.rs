// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Row-oriented remote tables.
//!
//! The [`Table`] trait is the seam between record-level code and the
//! store. Two implementations are provided:
//!
//! - [`Worksheet`]: one tab of a Google spreadsheet, reached through the
//!   blocking [`SheetsClient`] with service-account authentication
//! - [`MemoryTable`]: an in-process table with call recording and
//!   injectable failures
//!
//! # Usage
//!
//! ```no_run
//! # fn example() -> Result<(), sheets::SheetsError> {
//! use sheets::{ServiceAccount, SheetsClient, Table, DEFAULT_TOKEN_TTL};
//! use std::rc::Rc;
//!
//! let account = ServiceAccount::from_file("service-account.json")?;
//! let client = Rc::new(SheetsClient::from_service_account(account, DEFAULT_TOKEN_TTL)?);
//! let id = sheets::spreadsheet_id("https://docs.google.com/spreadsheets/d/1AbC/edit")?;
//! let sheet = SheetsClient::open_by_key(&client, &id)?.worksheet(0)?;
//! let rows = sheet.get_all_values()?;
//! # Ok(())
//! # }
//! ```

pub mod a1;
pub mod auth;
pub mod cache;
mod client;
mod error;
mod locator;
pub mod memory;
pub mod models;
mod table;

pub use auth::{AccessToken, ServiceAccount, ServiceAccountSource, StaticToken, TokenSource};
pub use cache::TtlCell;
pub use client::{DEFAULT_API_BASE, DEFAULT_TOKEN_TTL, SheetsClient, Spreadsheet, Worksheet};
pub use error::{Result, SheetsError};
pub use locator::spreadsheet_id;
pub use memory::{Call, FailureMode, MemoryTable};
pub use table::Table;
