use std::io::IsTerminal;
use std::sync::OnceLock;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::{GlobalFlags, OutputFormat};

pub mod table;

use table::{Table, TableOptions};

static TABLE_OPTIONS: OnceLock<TableOptions> = OnceLock::new();

/// Decide terminal width and coloring once, before any command prints.
/// Color needs a TTY, table output, no `--quiet`, and no `NO_COLOR`.
pub fn init(flags: &GlobalFlags) {
    let color = flags.format == OutputFormat::Table
        && !flags.quiet
        && std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none();
    let max_width = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 40);

    let _ = TABLE_OPTIONS.set(TableOptions { max_width, color });
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> TableOptions {
    TABLE_OPTIONS.get().copied().unwrap_or_default()
}

/// Arrays become one row per element. Objects become a key/value table of
/// their scalar fields (nested objects flattened to dotted keys), followed by
/// one table per array field, e.g. the questions of a survey.
fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let options = table_options();
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_rows(&items, options)),
        Value::Object(map) => {
            let mut fields = Vec::new();
            let mut sections = Vec::new();
            for (key, value) in map {
                match value {
                    Value::Array(items) => sections.push((key, items)),
                    other => flatten(&key, other, &mut fields),
                }
            }

            let mut kv = Table::new(["key", "value"]);
            for (key, value) in fields {
                kv.push_row(vec![key, value_to_cell(&value)]);
            }

            let mut blocks = vec![kv.render(options)];
            for (key, items) in sections {
                blocks.push(format!("\n{key}:\n{}", render_rows(&items, options)));
            }
            Ok(blocks.join("\n"))
        }
        scalar => {
            let mut table = Table::new(["value"]);
            table.push_row(vec![value_to_cell(&scalar)]);
            Ok(table.render(options))
        }
    }
}

fn render_rows(items: &[Value], options: TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let mut table = Table::new(["value"]);
        for item in items {
            table.push_row(vec![value_to_cell(item)]);
        }
        return table.render(options);
    }

    let rows = items
        .iter()
        .map(|item| {
            let mut fields = Vec::new();
            if let Value::Object(map) = item {
                flatten_map("", map, &mut fields);
            }
            fields
        })
        .collect::<Vec<_>>();

    let mut headers = Vec::<String>::new();
    for row in &rows {
        for (key, _) in row {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let mut table = Table::new(headers.clone());
    for row in rows {
        table.push_row(
            headers
                .iter()
                .map(|header| {
                    row.iter()
                        .find(|(key, _)| key == header)
                        .map_or_else(|| String::from("-"), |(_, value)| value_to_cell(value))
                })
                .collect(),
        );
    }
    table.render(options)
}

fn flatten(key: &str, value: Value, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => flatten_map(key, &map, out),
        other => out.push((key.to_string(), other)),
    }
}

fn flatten_map(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, value) in map {
        let key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        flatten(&key, value.clone(), out);
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}
