// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod check;
pub mod edit;
pub mod export;
pub mod fields;
pub mod init;
pub mod list;

pub use check::check_command;
pub use edit::{add_command, delete_command, edit_command};
pub use export::export_command;
pub use fields::fields_command;
pub use init::init_command;
pub use list::list_command;
