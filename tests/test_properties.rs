use gmp_filter::filter::{Filter, FilterTerm, Relation};
use proptest::prelude::*;

fn keyword() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("name".to_string()),
        Just("rows".to_string()),
        Just("first".to_string()),
        Just("severity".to_string()),
        Just("apply_overrides".to_string()),
        Just("sort-reverse".to_string()),
        "[a-z_]{1,8}",
    ]
}

fn relation() -> impl Strategy<Value = char> {
    prop_oneof![Just('='), Just(':'), Just('~'), Just('>'), Just('<')]
}

fn term_text() -> impl Strategy<Value = String> {
    prop_oneof![
        (keyword(), relation(), "[a-zA-Z0-9.-]{0,8}").prop_map(|(k, r, v)| format!("{k}{r}{v}")),
        (keyword(), relation(), "[a-z =:~<>]{0,8}")
            .prop_map(|(k, r, v)| format!("{k}{r}\"{v}\"")),
        "[a-zA-Z0-9.]{1,8}",
        Just("and".to_string()),
        Just("or".to_string()),
        Just("not".to_string()),
    ]
}

fn filter_text() -> impl Strategy<Value = String> {
    prop::collection::vec(term_text(), 0..8).prop_map(|terms| terms.join(" "))
}

proptest! {
    #[test]
    fn prop_round_trip_is_stable(text in filter_text()) {
        let once = Filter::from_string(&text).to_filter_string();
        let twice = Filter::from_string(&once).to_filter_string();
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(Filter::from_string(&once), Filter::from_string(&twice));
    }

    #[test]
    fn prop_term_equality_is_reflexive_and_symmetric(a in term_text(), b in term_text()) {
        let ta = FilterTerm::from_string(&a);
        let tb = FilterTerm::from_string(&b);
        prop_assert_eq!(&ta, &ta.clone());
        prop_assert_eq!(ta == tb, tb == ta);
    }

    #[test]
    fn prop_set_keeps_one_term(text in filter_text(), first in 1i64..1000, second in 1i64..1000) {
        let filter = Filter::from_string(&text)
            .set("rows", first, Relation::Equal)
            .set("rows", second, Relation::Equal);
        prop_assert_eq!(filter.get_terms("rows").len(), 1);
        prop_assert_eq!(filter.rows(), Some(second));
    }

    #[test]
    fn prop_and_does_not_mutate(left in filter_text(), right in filter_text()) {
        let l = Filter::from_string(&left);
        let r = Filter::from_string(&right);
        let (l_before, r_before) = (l.clone(), r.clone());
        let combined = l.and(&r);
        prop_assert_eq!(&l, &l_before);
        prop_assert_eq!(&r, &r_before);
        prop_assert!(combined.len() >= l.len() + r.len());
    }
}
