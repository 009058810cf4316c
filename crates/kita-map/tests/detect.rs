//! Integration tests for header auto-detection.

use std::collections::BTreeSet;

use kita_map::{MappingState, auto_detect, candidates, detect_matches, keywords_for};
use kita_model::FieldKey;
use proptest::prelude::*;

fn headers(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[test]
fn german_child_export_maps_required_columns() {
    let headers = headers(&[
        "Mitgliedsnummer",
        "Vorname",
        "Nachname",
        "Geburtsdatum",
        "Eintrittsdatum",
    ]);
    let mapping = auto_detect(&headers);

    assert_eq!(mapping.get(FieldKey::MemberNumber), Some(0));
    assert_eq!(mapping.get(FieldKey::FirstName), Some(1));
    assert_eq!(mapping.get(FieldKey::LastName), Some(2));
    assert_eq!(mapping.get(FieldKey::BirthDate), Some(3));
    assert_eq!(mapping.get(FieldKey::EntryDate), Some(4));
    assert_eq!(mapping.len(), 5);
}

#[test]
fn full_export_with_both_parents() {
    let headers = headers(&[
        "Mitgliedsnr",
        "Vorname",
        "Nachname",
        "Straße",
        "Hausnummer",
        "PLZ",
        "Wohnort",
        "Betreuungsstunden",
        "Elternteil 1 Vorname",
        "Elternteil 1 Nachname",
        "Elternteil 1 E-Mail",
        "Elternteil 2 Vorname",
        "Elternteil 2 Nachname",
        "Elternteil 2 Telefon",
    ]);
    let mapping = auto_detect(&headers);

    assert_eq!(mapping.get(FieldKey::MemberNumber), Some(0));
    assert_eq!(mapping.get(FieldKey::Street), Some(3));
    assert_eq!(mapping.get(FieldKey::HouseNumber), Some(4));
    assert_eq!(mapping.get(FieldKey::PostalCode), Some(5));
    assert_eq!(mapping.get(FieldKey::City), Some(6));
    assert_eq!(mapping.get(FieldKey::CareHours), Some(7));
    assert_eq!(mapping.get(FieldKey::Parent1FirstName), Some(8));
    assert_eq!(mapping.get(FieldKey::Parent1LastName), Some(9));
    assert_eq!(mapping.get(FieldKey::Parent1Email), Some(10));
    assert_eq!(mapping.get(FieldKey::Parent2FirstName), Some(11));
    assert_eq!(mapping.get(FieldKey::Parent2LastName), Some(12));
    assert_eq!(mapping.get(FieldKey::Parent2Phone), Some(13));
}

#[test]
fn redetect_replaces_previous_mapping() {
    let mut state = MappingState::from_headers(headers(&["Mitgliedsnummer", "Vorname"]));
    state.assign(FieldKey::City, 1).unwrap();

    let state = MappingState::from_headers(headers(&["Vorname", "Mitgliedsnummer"]));
    assert_eq!(state.mapping().get(FieldKey::FirstName), Some(0));
    assert_eq!(state.mapping().get(FieldKey::MemberNumber), Some(1));
    assert!(!state.mapping().contains(FieldKey::City));
}

const FRAGMENTS: &[&str] = &[
    "Mitgliedsnummer",
    "Nr",
    "Vorname",
    "Name",
    "Nachname",
    "Elternteil 1",
    "Elternteil 2",
    "Mutter",
    "Vater",
    "E-Mail",
    "Telefon",
    "Geburtsdatum",
    "Eintritt",
    "Austritt",
    "Hausnr",
    "Straße",
    "PLZ",
    "Ort",
    "Stunden",
    "Bemerkung",
];

#[test]
fn inner_spacing_is_not_collapsed_before_matching() {
    let headers = headers(&["Elternteil  1 Vorname"]);
    let matches = detect_matches(&headers);

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].field, FieldKey::FirstName);
    assert_eq!(matches[0].keyword, "vorname");
    assert!(auto_detect(&headers).get(FieldKey::Parent1FirstName).is_none());
}

fn header_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec(prop::sample::select(FRAGMENTS), 1..3)
            .prop_map(|parts| parts.join(" ")),
        prop::collection::vec(prop::sample::select(FRAGMENTS), 1..3)
            .prop_map(|parts| parts.join("  ")),
        "[ a-zA-Z]{0,16}",
    ]
}

proptest! {
    #[test]
    fn assigned_keyword_is_contained_in_header(headers in prop::collection::vec(header_strategy(), 0..12)) {
        for m in detect_matches(&headers) {
            prop_assert!(m.header.trim().to_lowercase().contains(m.keyword));
            prop_assert!(keywords_for(m.field).contains(&m.keyword));
            prop_assert_eq!(&headers[m.column], &m.header);
        }
    }

    #[test]
    fn assigned_keyword_is_longest_available(headers in prop::collection::vec(header_strategy(), 0..12)) {
        let mut taken = BTreeSet::new();
        for m in detect_matches(&headers) {
            for candidate in candidates(&m.header) {
                if !taken.contains(&candidate.field) {
                    prop_assert!(m.keyword.len() >= candidate.keyword.len());
                }
            }
            taken.insert(m.field);
        }
    }

    #[test]
    fn mapping_is_injective(headers in prop::collection::vec(header_strategy(), 0..12)) {
        let mapping = auto_detect(&headers);
        let columns: BTreeSet<usize> = mapping.iter().map(|(_, column)| column).collect();
        prop_assert_eq!(columns.len(), mapping.len());
        prop_assert!(columns.iter().all(|column| *column < headers.len()));
    }

    #[test]
    fn detection_is_deterministic(headers in prop::collection::vec(header_strategy(), 0..12)) {
        prop_assert_eq!(auto_detect(&headers), auto_detect(&headers));
    }
}
