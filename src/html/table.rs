//! HTML table built from overridable components
//!
//! [`table_template`] registers one component per part of the markup:
//!
//! | name        | arguments                   | emits                       |
//! |-------------|-----------------------------|-----------------------------|
//! | `table`     | table                       | `<table>` + thead + tbody   |
//! | `thead`     | table                       | header row, one `th` per column |
//! | `th`        | table, column               | one header cell             |
//! | `tbody`     | table                       | one `tbody_row` per row     |
//! | `tbody_row` | table, row                  | one `td` per column         |
//! | `td`        | table, row, column, value   | one body cell               |
//!
//! Every component can be overridden, or given filters, on a clone of the
//! template without affecting the others.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use super::escape_html;
use crate::error::{ConfigError, TemplateError};
use crate::template::{Context, Template};

/// CSS class used when callers do not pick their own
pub const DEFAULT_TABLE_CLASS: &str = "table-1";

/// Class used by [`headless_table_template`]
pub const HEADLESS_TABLE_CLASS: &str = "table-headless";

/// Column labels and row data
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Table {
    #[serde(default)]
    pub cols: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(cols: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { cols, rows }
    }

    /// Load table data from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_str(&content)
    }

    /// Load table data from a TOML string with `cols` and `rows` arrays
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Cell text, or `None` when the row is too short
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(|s| s.as_str())
    }
}

/// One entry of a table component's argument list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableArg {
    Table(Arc<Table>),
    Row(usize),
    Col(usize),
    Value(String),
}

/// Template specialised for table components
pub type TableTemplate = Template<TableArg>;

type TableContext<'a> = Context<'a, TableArg, String, TemplateError>;

fn table_arg(component: &str, args: &[TableArg]) -> Result<Arc<Table>, TemplateError> {
    args.iter()
        .find_map(|arg| match arg {
            TableArg::Table(table) => Some(Arc::clone(table)),
            _ => None,
        })
        .ok_or_else(|| TemplateError::invalid_argument(component, "missing table"))
}

fn row_arg(component: &str, args: &[TableArg]) -> Result<usize, TemplateError> {
    args.iter()
        .find_map(|arg| match arg {
            TableArg::Row(row) => Some(*row),
            _ => None,
        })
        .ok_or_else(|| TemplateError::invalid_argument(component, "missing row index"))
}

fn col_arg(component: &str, args: &[TableArg]) -> Result<usize, TemplateError> {
    args.iter()
        .find_map(|arg| match arg {
            TableArg::Col(col) => Some(*col),
            _ => None,
        })
        .ok_or_else(|| TemplateError::invalid_argument(component, "missing column index"))
}

fn value_arg(args: &[TableArg]) -> &str {
    args.iter()
        .find_map(|arg| match arg {
            TableArg::Value(value) => Some(value.as_str()),
            _ => None,
        })
        .unwrap_or("")
}

/// Renderer for the `table` component with a fixed CSS class
pub fn table_renderer(
    class: &str,
) -> impl Fn(&TableContext<'_>, Vec<TableArg>) -> Result<String, TemplateError> + Send + Sync + 'static
{
    let class = escape_html(class);
    move |ctx: &TableContext<'_>, args: Vec<TableArg>| {
        let thead = ctx.invoke("thead", args.clone())?.unwrap_or_default();
        let tbody = ctx.invoke("tbody", args)?.unwrap_or_default();
        Ok(format!(r#"<table class="{}">{}{}</table>"#, class, thead, tbody))
    }
}

fn thead(ctx: &TableContext<'_>, args: Vec<TableArg>) -> Result<String, TemplateError> {
    let table = table_arg("thead", &args)?;
    let mut out = String::from("<thead><tr>");
    for col in 0..table.cols.len() {
        let cell = ctx.invoke("th", vec![TableArg::Table(Arc::clone(&table)), TableArg::Col(col)])?;
        out.push_str(&cell.unwrap_or_default());
    }
    out.push_str("</tr></thead>");
    Ok(out)
}

fn th(_ctx: &TableContext<'_>, args: Vec<TableArg>) -> Result<String, TemplateError> {
    let table = table_arg("th", &args)?;
    let col = col_arg("th", &args)?;
    let label = table.cols.get(col).map(|s| s.as_str()).unwrap_or("");
    Ok(format!(
        r#"<th class="col-{}">{}</th>"#,
        col,
        escape_html(label)
    ))
}

fn tbody(ctx: &TableContext<'_>, args: Vec<TableArg>) -> Result<String, TemplateError> {
    let table = table_arg("tbody", &args)?;
    let mut out = String::from("<tbody>");
    for row in 0..table.rows.len() {
        let html = ctx.invoke(
            "tbody_row",
            vec![TableArg::Table(Arc::clone(&table)), TableArg::Row(row)],
        )?;
        out.push_str(&html.unwrap_or_default());
    }
    out.push_str("</tbody>");
    Ok(out)
}

fn tbody_row(ctx: &TableContext<'_>, args: Vec<TableArg>) -> Result<String, TemplateError> {
    let table = table_arg("tbody_row", &args)?;
    let row = row_arg("tbody_row", &args)?;
    let mut out = String::from("<tr>");
    for col in 0..table.cols.len() {
        // short rows render empty cells
        let value = table.cell(row, col).unwrap_or("").to_string();
        let html = ctx.invoke(
            "td",
            vec![
                TableArg::Table(Arc::clone(&table)),
                TableArg::Row(row),
                TableArg::Col(col),
                TableArg::Value(value),
            ],
        )?;
        out.push_str(&html.unwrap_or_default());
    }
    out.push_str("</tr>");
    Ok(out)
}

fn td(_ctx: &TableContext<'_>, args: Vec<TableArg>) -> Result<String, TemplateError> {
    let col = col_arg("td", &args)?;
    Ok(format!(
        r#"<td class="col-{}">{}</td>"#,
        col,
        escape_html(value_arg(&args))
    ))
}

/// Build the table component set, rendered through the `table` component
pub fn table_template(class: &str) -> Result<TableTemplate, TemplateError> {
    let mut template = TableTemplate::with_top_level("table");
    template.set_fn("table", table_renderer(class))?;
    template.set_fn("thead", thead)?;
    template.set_fn("th", th)?;
    template.set_fn("tbody", tbody)?;
    template.set_fn("tbody_row", tbody_row)?;
    template.set_fn("td", td)?;
    Ok(template)
}

/// Clone `base` with an empty `thead` and the headless table class
pub fn without_header(base: &TableTemplate) -> Result<TableTemplate, TemplateError> {
    let mut template = base.clone();
    template.set_fn("table", table_renderer(HEADLESS_TABLE_CLASS))?;
    template.set_fn("thead", |_ctx: &TableContext<'_>, _args| Ok(String::new()))?;
    Ok(template)
}

/// The table component set without a header block
pub fn headless_table_template() -> Result<TableTemplate, TemplateError> {
    without_header(&table_template(DEFAULT_TABLE_CLASS)?)
}

/// Filter that uppercases every cell value in the argument list
pub fn uppercase_values<E>(args: Vec<TableArg>) -> Result<Vec<TableArg>, E> {
    Ok(args
        .into_iter()
        .map(|arg| match arg {
            TableArg::Value(value) => TableArg::Value(value.to_uppercase()),
            other => other,
        })
        .collect())
}

/// Render `table` through `template`; a template without a top-level
/// component renders as an empty string
pub fn render_table(template: &TableTemplate, table: Table) -> Result<String, TemplateError> {
    let output = template.render(vec![TableArg::Table(Arc::new(table))])?;
    Ok(output.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fruit() -> Table {
        Table::new(
            vec!["Name".to_string(), "Qty".to_string()],
            vec![
                vec!["apple".to_string(), "3".to_string()],
                vec!["pear".to_string()],
            ],
        )
    }

    #[test]
    fn test_cell_lookup() {
        let table = fruit();
        assert_eq!(table.cell(0, 1), Some("3"));
        assert_eq!(table.cell(1, 1), None);
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn test_table_from_toml() {
        let table = Table::from_str(
            r#"
cols = ["A", "B"]
rows = [["1", "2"], ["3", "4"]]
"#,
        )
        .expect("Should parse");
        assert_eq!(table.cols, vec!["A", "B"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.cell(1, 0), Some("3"));
    }

    #[test]
    fn test_table_from_invalid_toml() {
        assert!(Table::from_str("cols = 3").is_err());
    }

    #[test]
    fn test_short_row_renders_empty_cell() {
        let template = table_template(DEFAULT_TABLE_CLASS).unwrap();
        let html = render_table(&template, fruit()).unwrap();
        assert!(html.contains(r#"<tr><td class="col-0">pear</td><td class="col-1"></td></tr>"#));
    }

    #[test]
    fn test_values_are_escaped() {
        let template = table_template(r#"a"b"#).unwrap();
        let table = Table::new(
            vec!["<b>".to_string()],
            vec![vec!["x & y".to_string()]],
        );
        let html = render_table(&template, table).unwrap();
        assert_eq!(
            html,
            concat!(
                r#"<table class="a&quot;b">"#,
                r#"<thead><tr><th class="col-0">&lt;b&gt;</th></tr></thead>"#,
                r#"<tbody><tr><td class="col-0">x &amp; y</td></tr></tbody>"#,
                "</table>"
            )
        );
    }

    #[test]
    fn test_empty_table() {
        let template = table_template(DEFAULT_TABLE_CLASS).unwrap();
        let html = render_table(&template, Table::default()).unwrap();
        assert_eq!(
            html,
            r#"<table class="table-1"><thead><tr></tr></thead><tbody></tbody></table>"#
        );
    }

    #[test]
    fn test_missing_table_argument() {
        let template = table_template(DEFAULT_TABLE_CLASS).unwrap();
        assert_eq!(
            template.invoke("thead", vec![]),
            Err(TemplateError::invalid_argument("thead", "missing table"))
        );
        assert_eq!(
            template.invoke("td", vec![TableArg::Row(0)]),
            Err(TemplateError::invalid_argument("td", "missing column index"))
        );
    }

    #[test]
    fn test_uppercase_values_leaves_other_args() {
        let args = vec![
            TableArg::Row(1),
            TableArg::Value("pear".to_string()),
        ];
        let out: Result<_, TemplateError> = uppercase_values(args);
        assert_eq!(
            out.unwrap(),
            vec![TableArg::Row(1), TableArg::Value("PEAR".to_string())]
        );
    }

    #[test]
    fn test_without_header_leaves_base_untouched() {
        let base = table_template(DEFAULT_TABLE_CLASS).unwrap();
        let headless = without_header(&base).unwrap();

        let html = render_table(&headless, fruit()).unwrap();
        assert!(html.starts_with(r#"<table class="table-headless"><tbody>"#));
        assert!(render_table(&base, fruit())
            .unwrap()
            .starts_with(r#"<table class="table-1"><thead>"#));
    }

    #[test]
    fn test_headless_template() {
        let template = headless_table_template().unwrap();
        let html = render_table(&template, fruit()).unwrap();
        assert!(html.starts_with(r#"<table class="table-headless"><tbody>"#));
        assert!(!html.contains("<thead>"));
    }
}
