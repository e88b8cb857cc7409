use crate::filter::{Filter, FilterTerm, is_extra_keyword};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use serde_json::json;
use std::fmt::Write;

pub fn create_styled_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)).collect::<Vec<_>>());
    table
}

fn term_kind(term: &FilterTerm) -> &'static str {
    match term.keyword() {
        Some(keyword) if is_extra_keyword(keyword) => "extra",
        Some(_) => "criteria",
        None if term.has_relation() => "criteria",
        None => "text",
    }
}

pub fn format_terms_text(filter: &Filter) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        "FILTER".bold(),
        filter.to_filter_string().bright_white()
    );

    if filter.is_empty() {
        let _ = writeln!(out, "No terms.");
        return out;
    }

    let mut table = create_styled_table(&["#", "Keyword", "Relation", "Value", "Type", "Kind"]);
    for (idx, term) in filter.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(term.keyword().unwrap_or("")),
            Cell::new(term.relation().map(|r| r.to_string()).unwrap_or_default()),
            Cell::new(term.value().map(|v| v.to_string()).unwrap_or_default()),
            Cell::new(term.value().map(|v| v.kind()).unwrap_or("")),
            Cell::new(term_kind(term)),
        ]);
    }
    let _ = writeln!(out, "{table}");
    out
}

pub fn format_terms_json(filter: &Filter) -> String {
    let terms: Vec<_> = filter
        .iter()
        .map(|term| {
            json!({
                "keyword": term.keyword(),
                "relation": term.relation().map(|r| r.to_string()),
                "value": term.value(),
                "type": term.value().map(|v| v.kind()),
                "kind": term_kind(term),
            })
        })
        .collect();

    serde_json::to_string_pretty(&json!({
        "filter": filter.to_filter_string(),
        "id": filter.id(),
        "terms": terms,
    }))
    .unwrap_or_else(|_| "{}".to_string())
}

pub fn format_filter_json(filter: &Filter) -> String {
    serde_json::to_string_pretty(&json!({
        "filter": filter.to_filter_string(),
        "criteria": filter.to_filter_criteria_string(),
        "extra": filter.to_filter_extra_string(),
        "first": filter.first(),
        "rows": filter.rows(),
        "sort_by": filter.sort_by(),
        "sort_order": filter.sort_order(),
    }))
    .unwrap_or_else(|_| "{}".to_string())
}
