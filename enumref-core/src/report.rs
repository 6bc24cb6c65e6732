//! Output formatting - plaintext and JSON.

use serde_json::{json, Value};

use crate::catalog::CatalogEntry;
use crate::discriminant::Discriminant;
use crate::iter::Enumerator;
use crate::table::ReflectionTable;

/// Iteration direction for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Declaration order.
    #[default]
    Forward,
    /// Last declared first.
    Backward,
}

fn ordered<V: Discriminant>(
    table: &ReflectionTable<V>,
    direction: Direction,
) -> Vec<Enumerator<'_, V>> {
    match direction {
        Direction::Forward => table.iter().collect(),
        Direction::Backward => table.iter().rev().collect(),
    }
}

/// JSON number for a value, or a string when it exceeds 64 bits.
fn value_json<V: Discriminant>(value: V) -> Value {
    let wide = value.widen();
    if let Ok(n) = i64::try_from(wide) {
        json!(n)
    } else if let Ok(n) = u64::try_from(wide) {
        json!(n)
    } else {
        Value::String(wide.to_string())
    }
}

/// Renders a table as text, one `index) value - name` line per enumerator.
///
/// Aliases (a value already taken by an earlier enumerator) are marked.
pub fn render_plain<V: Discriminant>(
    table: &ReflectionTable<V>,
    repr: &str,
    direction: Direction,
) -> String {
    let mut out = format!("Enum {} with underlying type {}\n", table.type_name(), repr);
    for e in ordered(table, direction) {
        let alias = if e.is_first_of_value() {
            String::new()
        } else {
            format!(" (alias of {})", table.name_of(e.value()).unwrap_or("?"))
        };
        out.push_str(&format!("{}) {} - {}{}\n", e.index(), e.value(), e.name(), alias));
    }
    out.push_str(&format!("Enum size is {}\n", table.len()));
    out
}

/// JSON description of a table.
pub fn table_json<V: Discriminant>(
    table: &ReflectionTable<V>,
    repr: &str,
    direction: Direction,
) -> Value {
    let enumerators: Vec<Value> = ordered(table, direction)
        .iter()
        .map(|e| {
            json!({
                "index": e.index(),
                "value": value_json(e.value()),
                "name": e.name(),
                "alias": !e.is_first_of_value(),
            })
        })
        .collect();
    json!({
        "name": table.type_name(),
        "repr": repr,
        "count": table.len(),
        "enumerators": enumerators,
    })
}

/// JSON description of a catalog entry.
pub fn entry_json(entry: &CatalogEntry, direction: Direction) -> Value {
    table_json(&entry.table, entry.repr.as_str(), direction)
}

/// Text description of a catalog entry.
pub fn entry_plain(entry: &CatalogEntry, direction: Direction) -> String {
    render_plain(&entry.table, entry.repr.as_str(), direction)
}

/// JSON for a single lookup result; `null` fields on a miss.
pub fn lookup_json<V: Discriminant>(query: &str, found: Option<Enumerator<'_, V>>) -> Value {
    match found {
        Some(e) => json!({
            "query": query,
            "found": true,
            "index": e.index(),
            "value": value_json(e.value()),
            "name": e.name(),
        }),
        None => json!({
            "query": query,
            "found": false,
            "index": null,
            "value": null,
            "name": null,
        }),
    }
}

/// Prints a JSON value.
///
/// Falls back to the compact form if pretty serialization fails.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            println!("{}", value);
        }
    }
}

/// Prints a text block as-is.
pub fn print_plain(text: &str) {
    print!("{}", text);
}
