//! Property tests for schema partitioning and event fields.

use proptest::prelude::*;

use pavlov_core::models::{Event, EventKind, Schema, Variable};

fn domain(size: usize) -> Vec<String> {
    (0..size).map(|i| format!("v{i}")).collect()
}

proptest! {
    #[test]
    fn legal_actions_are_every_non_default_action_value(
        action_sizes in prop::collection::vec(1usize..5, 0..4),
        sensor_sizes in prop::collection::vec(1usize..5, 0..4),
    ) {
        let actions: Vec<Variable> = action_sizes
            .iter()
            .enumerate()
            .map(|(i, n)| Variable::action(format!("A{i}"), domain(*n)))
            .collect();
        let sensors: Vec<Variable> = sensor_sizes
            .iter()
            .enumerate()
            .map(|(i, n)| Variable::sensory(format!("S{i}"), domain(*n)))
            .collect();
        let schema = Schema::new(actions, sensors).unwrap();

        let legal = schema.legal_actions();
        let expected: usize = action_sizes.iter().map(|n| n - 1).sum();
        prop_assert_eq!(legal.len(), expected);
        for predicate in &legal {
            let variable = schema.get(&predicate.name).unwrap();
            prop_assert!(variable.is_action());
            prop_assert_ne!(&predicate.value, &variable.default);
        }
        prop_assert_eq!(schema.defaults().len(), action_sizes.len() + sensor_sizes.len());
    }

    #[test]
    fn last_field_write_wins(values in prop::collection::vec("[a-z]{1,6}", 1..6)) {
        let mut event = Event::new(0, EventKind::ActionChosen);
        for value in &values {
            event = event.with("action", value);
        }
        prop_assert_eq!(event.field("action"), values.last().map(String::as_str));
        prop_assert_eq!(event.fields.len(), 1);
    }
}
