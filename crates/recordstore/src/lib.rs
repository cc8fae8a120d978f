// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! AMR patient record store.
//!
//! Maps a fixed, ordered field [`Schema`] onto a row-oriented table: row 1
//! holds the header, every row after it is one [`Record`]. The stateless
//! operations live in [`adapter`]; [`Session`] adds the loaded record set,
//! the edit target and reload-after-mutate on top of them.
//!
//! ```
//! use recordstore::{Record, Schema, Session};
//! use sheets::MemoryTable;
//!
//! let mut session = Session::open(MemoryTable::new("Sheet1"), Schema::amr())?;
//! session.add(&Record::from_pairs([("Age", "65"), ("Gender", "Male")]))?;
//! assert_eq!(session.records().len(), 1);
//! # Ok::<(), recordstore::StoreError>(())
//! ```

pub mod adapter;
pub mod config;
mod error;
pub mod export;
pub mod form;
mod record;
mod schema;
mod session;

pub use adapter::{append, delete, ensure_headers, load_all, update};
pub use config::{CollectorConfig, create_example_config, load_config, validate_config};
pub use error::{FormError, SchemaError, StoreError};
pub use export::{default_export_name, write_csv};
pub use form::{FieldKind, FieldSpec, Form, find_or_default};
pub use record::{Record, RecordSet};
pub use schema::{AMR_FIELDS, HEADER_ROWS, Schema};
pub use session::{EditTarget, Session};
