use gmp_filter::filter::{AND, Filter, FilterTerm, FilterValue, OR, Relation};
use pretty_assertions::assert_eq;

#[test]
fn test_rows_term_is_numeric() {
    let term = FilterTerm::from_string("rows=10");
    assert_eq!(term.keyword(), Some("rows"));
    assert_eq!(term.relation(), Some(Relation::Equal));
    assert_eq!(term.value(), Some(&FilterValue::Int(10)));
    assert_eq!(term.to_string(), "rows=10");
}

#[test]
fn test_parse_keeps_term_order() {
    let filter = Filter::from_string("apply_overrides=0 levels=hml rows=2");
    let keywords: Vec<_> = filter.iter().filter_map(FilterTerm::keyword).collect();
    assert_eq!(keywords, vec!["apply_overrides", "levels", "rows"]);
    assert_eq!(
        filter.to_filter_string(),
        "apply_overrides=0 levels=hml rows=2"
    );
}

#[test]
fn test_and_joins_with_connective() {
    let filter = Filter::from_string("severity>3");
    assert_eq!(filter.get("severity"), Some(&FilterValue::Int(3)));

    let combined = filter.and(&Filter::from_string("severity<8"));
    assert_eq!(combined.to_filter_string(), "severity>3 and severity<8");
    assert_eq!(combined.terms()[1], *AND);
}

#[test]
fn test_or_joins_with_connective() {
    let combined = Filter::from_string("name=a").or(&Filter::from_string("name=b"));
    assert_eq!(combined.to_filter_string(), "name=a or name=b");
    assert_eq!(combined.terms()[1], *OR);
}

#[test]
fn test_empty_left_side_has_no_dangling_connective() {
    let combined = Filter::new().and(&Filter::from_string("name=foo"));
    assert_eq!(combined.to_filter_string(), "name=foo");
}

#[test]
fn test_delete_rows() {
    let filter = Filter::from_string("rows=10").delete("rows");
    assert_eq!(filter.get("rows"), None);
    assert!(filter.is_empty());
}

#[test]
fn test_combinators_do_not_mutate_operands() {
    let left = Filter::from_string("name=foo rows=10");
    let right = Filter::from_string("owner=admin");
    let left_before = left.clone();
    let right_before = right.clone();

    let _ = left.and(&right);
    let _ = left.or(&right);
    let _ = left.merge(&right);
    let _ = left.set("rows", 20_i64, Relation::Equal);
    let _ = left.delete("name");

    assert_eq!(left, left_before);
    assert_eq!(right, right_before);
}

#[test]
fn test_has_term_prevents_duplicate_boundaries() {
    let start = FilterTerm::from_string("created>2024-01-01");
    let filter = Filter::from_string("name~web created>2024-01-01");
    assert!(filter.has_term(&start));

    let widened = if filter.has_term(&start) {
        filter.clone()
    } else {
        filter.add_term(start.clone())
    };
    assert_eq!(widened.get_terms("created").len(), 1);
}

#[test]
fn test_consecutive_connectives_are_kept() {
    let filter = Filter::from_string("name=a and not name=b");
    assert_eq!(filter.len(), 4);
    assert_eq!(filter.to_filter_string(), "name=a and not name=b");
}

#[test]
fn test_get_all_rows() {
    let filter = Filter::from_string("name~web first=31 rows=10").all();
    assert_eq!(filter.first(), Some(1));
    assert_eq!(filter.rows(), Some(-1));
}

#[test]
fn test_boolean_accessors_return_raw_values() {
    let filter = Filter::from_string("apply_overrides=1 active=0");
    assert_eq!(filter.apply_overrides(), Some(&FilterValue::Int(1)));
    assert_eq!(filter.active(), Some(&FilterValue::from("0")));
}

#[test]
fn test_from_str_and_display() {
    let filter: Filter = "name~web   rows=10".parse().unwrap();
    assert_eq!(format!("{filter}"), "name~web rows=10");
}
