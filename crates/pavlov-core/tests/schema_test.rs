use pavlov_core::errors::PavlovError;
use pavlov_core::models::{Event, EventKind, Predicate, Schema, Variable, VariableKind};

fn door_schema() -> Schema {
    Schema::new(
        vec![
            Variable::action("Open", ["none", "door"]),
            Variable::action("Close", ["none", "door"]),
        ],
        vec![Variable::sensory("Door", ["closed", "open"])],
    )
    .unwrap()
}

#[test]
fn schema_partitions_actions_and_sensors() {
    let schema = door_schema();
    assert_eq!(schema.len(), 3);
    assert_eq!(schema.actions().count(), 2);
    assert_eq!(schema.sensors().count(), 1);
    assert_eq!(schema.get("Door").unwrap().kind, VariableKind::Sensory);
}

#[test]
fn schema_rejects_duplicate_names() {
    let err = Schema::new(
        vec![Variable::action("Open", ["none", "door"])],
        vec![Variable::sensory("Open", ["no", "yes"])],
    )
    .unwrap_err();
    assert!(matches!(err, PavlovError::DuplicateVariable { .. }));
}

#[test]
fn schema_rejects_empty_domain() {
    let empty: [&str; 0] = [];
    let err = Schema::new(vec![], vec![Variable::sensory("Door", empty)]).unwrap_err();
    assert!(matches!(err, PavlovError::InvalidConfiguration { .. }));
}

#[test]
fn schema_validates_values() {
    let schema = door_schema();
    assert!(schema.validate("Door", "open").is_ok());
    assert!(matches!(
        schema.validate("Door", "ajar"),
        Err(PavlovError::UnknownValue { .. })
    ));
    assert!(matches!(
        schema.validate("Roof", "open"),
        Err(PavlovError::UnknownVariable { .. })
    ));
}

#[test]
fn legal_actions_skip_defaults() {
    let schema = door_schema();
    let legal = schema.legal_actions();
    assert_eq!(
        legal,
        vec![Predicate::new("Open", "door"), Predicate::new("Close", "door")]
    );
}

#[test]
fn custom_default_must_be_in_domain() {
    let err = Schema::new(
        vec![],
        vec![Variable::sensory("Door", ["closed", "open"]).with_default("ajar")],
    )
    .unwrap_err();
    assert!(matches!(err, PavlovError::UnknownValue { .. }));
}

#[test]
fn event_fields_are_recorded() {
    let event = Event::new(3, EventKind::ActionChosen)
        .with("action", "Open=door")
        .with("probability", 0.75);
    assert_eq!(event.field("action"), Some("Open=door"));
    assert_eq!(event.field("probability"), Some("0.75"));
    assert_eq!(event.kind.to_string(), "action_chosen");
}
