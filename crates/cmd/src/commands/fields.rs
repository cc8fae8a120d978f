// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use recordstore::{FieldKind, Form};

fn describe(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Number { min, max, default } => {
            format!("number {min}..={max} (default {default})")
        }
        FieldKind::Choice { options, default } => {
            let fallback = options.get(*default).map(String::as_str).unwrap_or("");
            format!("one of: {} (default {fallback})", options.join(" | "))
        }
        FieldKind::Flag => "0 or 1 (default 0)".to_string(),
        FieldKind::Timestamp => "set automatically on save".to_string(),
        FieldKind::Text { default } if default.is_empty() => "text".to_string(),
        FieldKind::Text { default } => format!("text (default {default})"),
    }
}

/// One line per form field: name, label and accepted values
pub fn field_lines(form: &Form) -> Vec<String> {
    let width = form
        .fields()
        .iter()
        .map(|f| f.name.len())
        .max()
        .unwrap_or(0);
    form.fields()
        .iter()
        .map(|f| format!("{:width$}  {}: {}", f.name, f.label, describe(&f.kind)))
        .collect()
}

pub fn fields_command(form: &Form) {
    for line in field_lines(form) {
        println!("{line}");
    }
}
