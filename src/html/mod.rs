//! HTML helpers and ready-made component sets

pub mod table;

pub use table::{
    headless_table_template, render_table, table_template, uppercase_values, without_header,
    Table, TableArg, TableTemplate,
};

/// Escape text for use in HTML element content and quoted attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}
