//! Wire-format tests for kita-model types.

use kita_model::{
    ExecuteResult, FieldKey, FieldMapping, ParentAction, ParentDecision, ParentSlot, ParsedFile,
    PreviewResponse, Separator,
};

#[test]
fn field_mapping_uses_camel_case_keys() {
    let mapping: FieldMapping = [(FieldKey::MemberNumber, 0), (FieldKey::Parent1Email, 7)]
        .into_iter()
        .collect();
    let json = serde_json::to_value(&mapping).expect("serialize mapping");
    assert_eq!(json, serde_json::json!({ "memberNumber": 0, "parent1Email": 7 }));

    let back: FieldMapping = serde_json::from_value(json).expect("deserialize mapping");
    assert_eq!(back, mapping);
}

#[test]
fn parsed_file_reads_tab_separator() {
    let json = r#"{
        "headers": ["Mitgliedsnummer", "Vorname"],
        "detectedSeparator": "\t",
        "sampleRows": [["100", "Mia"]],
        "totalRows": 12
    }"#;
    let parsed: ParsedFile = serde_json::from_str(json).expect("parse file");
    assert_eq!(parsed.detected_separator, Separator::Tab);
    assert_eq!(parsed.sample_values(1), vec!["Mia"]);
    assert_eq!(parsed.total_rows, 12);
}

#[test]
fn parent_decision_serializes_slot_as_number() {
    let decision = ParentDecision::link(3, ParentSlot::Second, "p-9");
    let json = serde_json::to_value(&decision).expect("serialize decision");
    assert_eq!(
        json,
        serde_json::json!({
            "rowIndex": 3,
            "parentSlot": 2,
            "action": "link",
            "existingParentId": "p-9"
        })
    );
    assert_eq!(decision.action, ParentAction::Link);
}

#[test]
fn parent_slot_rejects_out_of_range_numbers() {
    let json = r#"{ "rowIndex": 0, "parentSlot": 3, "action": "create" }"#;
    assert!(serde_json::from_str::<ParentDecision>(json).is_err());
}

#[test]
fn preview_response_defaults_optional_parts() {
    let json = r#"{
        "rows": [{
            "index": 0,
            "child": { "memberNumber": "100", "firstName": "Mia", "careHours": 35 },
            "parent1": { "firstName": "Anna", "lastName": "Weber",
                         "existingMatches": [{ "id": "p1", "firstName": "Anna", "lastName": "Weber" }] },
            "isValid": false,
            "isDuplicate": true,
            "existingChildId": "c1",
            "fieldConflicts": [{ "field": "careHours", "fieldLabel": "Betreuungsstunden",
                                 "existingValue": "20", "newValue": "25" }]
        }],
        "validCount": 0,
        "errorCount": 1
    }"#;
    let response: PreviewResponse = serde_json::from_str(json).expect("parse preview");
    let row = &response.rows[0];
    assert!(row.warnings.is_empty());
    assert_eq!(row.child.care_hours, Some(35.0));
    assert_eq!(row.conflict("careHours").map(|c| c.new_value.as_str()), Some("25"));
    let parent = row.parent(ParentSlot::First).expect("parent1");
    assert!(parent.find_match("p1").is_some());
    assert!(!parent.already_linked);
    assert!(row.parent(ParentSlot::Second).is_none());
}

#[test]
fn execute_result_tolerates_missing_counts() {
    let result: ExecuteResult =
        serde_json::from_str(r#"{ "childrenCreated": 4 }"#).expect("parse result");
    assert_eq!(result.children_created, 4);
    assert_eq!(result.parents_linked, 0);
    assert!(result.errors.is_empty());
}
