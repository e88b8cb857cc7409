use gmp_filter::counts::{CollectionCounts, CountsError};
use gmp_filter::filter::Filter;

#[test]
fn test_walks_pages_with_filter() {
    let filter = Filter::from_string("name~web first=1 rows=20");
    let page1 = CollectionCounts::new(1, 120, 50, 20, 20).expect("valid counts");
    assert!(page1.is_first());
    assert!(page1.has_next());

    let next = page1.next_filter(&filter);
    assert_eq!(next.first(), Some(21));
    assert_eq!(next.rows(), Some(20));

    let page3 = CollectionCounts::new(41, 120, 50, 10, 20).expect("valid counts");
    assert!(page3.is_last());
    assert_eq!(page3.current_page(), 3);
    assert_eq!(page3.page_count(), 3);
    assert_eq!(page3.previous_filter(&next).first(), Some(21));
    assert_eq!(page3.last_filter(&filter).first(), Some(41));
}

#[test]
fn test_all_rows_page() {
    let counts = CollectionCounts::new(1, 7, 7, 7, 0).expect("valid counts");
    assert!(counts.is_first());
    assert!(counts.is_last());
    assert_eq!(counts.page_count(), 1);

    let filter = counts.next_filter(&Filter::from_string("rows=-1 first=1"));
    assert_eq!(filter.rows(), Some(-1), "page size of zero leaves rows alone");
}

#[test]
fn test_rejects_inconsistent_server_counts() {
    let err = serde_json::from_str::<CollectionCounts>(
        r#"{"first":0,"all":3,"filtered":2,"length":2,"rows":10}"#,
    )
    .expect_err("first below one");
    assert!(err.to_string().contains("at least 1"));

    assert!(matches!(
        CollectionCounts::new(1, 3, 2, 3, 10),
        Err(CountsError::LengthExceedsFiltered { .. })
    ));
}

#[test]
fn test_serializes_plain_fields() {
    let counts = CollectionCounts::new(11, 30, 25, 10, 10).expect("valid counts");
    let json = serde_json::to_value(counts).expect("serialize");
    assert_eq!(json["first"], 11);
    assert_eq!(json["filtered"], 25);
    assert_eq!(counts.last(), 20);
}
