//! Append-only, time-indexed store of full variable assignments.

use pavlov_core::errors::PavlovResult;
use pavlov_core::models::{Assignment, Schema};

use crate::lagged;
use crate::probability::ProbabilityTable;

/// One full assignment per committed timestep, plus the in-progress entry.
///
/// Committed entries are never mutated. The in-progress entry collects sensed
/// values and chosen actions, and is filled with defaults when closed.
#[derive(Debug, Clone)]
pub struct ObservationHistory {
    schema: Schema,
    entries: Vec<Assignment>,
    open: Option<Assignment>,
}

impl ObservationHistory {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            entries: Vec::new(),
            open: None,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Start the in-progress entry if none is open.
    pub fn open_entry(&mut self) {
        self.open.get_or_insert_with(Assignment::new);
    }

    /// Record a value in the in-progress entry, opening it if needed.
    pub fn observe(&mut self, name: &str, value: &str) -> PavlovResult<()> {
        self.schema.validate(name, value)?;
        self.open
            .get_or_insert_with(Assignment::new)
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Fill unobserved variables with their defaults and commit the entry.
    /// Returns the committed entry's time index.
    pub fn close_entry(&mut self) -> usize {
        let mut entry = self.schema.defaults();
        if let Some(observed) = self.open.take() {
            entry.extend(observed);
        }
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// The in-progress entry, if one is open.
    pub fn current(&self) -> Option<&Assignment> {
        self.open.as_ref()
    }

    /// Value of `name` in the in-progress entry, falling back to its default.
    pub fn current_value(&self, name: &str) -> PavlovResult<String> {
        let variable = self.schema.get(name)?;
        Ok(self
            .open
            .as_ref()
            .and_then(|entry| entry.get(name))
            .cloned()
            .unwrap_or_else(|| variable.default.clone()))
    }

    pub fn get(&self, time: usize) -> Option<&Assignment> {
        self.entries.get(time)
    }

    pub fn entries(&self) -> &[Assignment] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Assignment> {
        self.entries.last()
    }

    /// Number of committed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empirical joint distribution of `names` over the committed entries.
    pub fn joint(&self, names: &[&str], dense: bool) -> PavlovResult<ProbabilityTable> {
        let variables = names
            .iter()
            .map(|name| self.schema.get(name).cloned())
            .collect::<PavlovResult<Vec<_>>>()?;
        let mut table = ProbabilityTable::with_storage(&variables, dense)?;
        for entry in &self.entries {
            table.increment(entry)?;
        }
        table.normalize(self.entries.len() as f64);
        Ok(table)
    }

    /// Consecutive committed pairs as rows over the lagged schema.
    pub fn lagged_rows(&self) -> impl Iterator<Item = Assignment> + '_ {
        self.entries
            .windows(2)
            .map(|pair| lagged::lagged_row(&self.schema, &pair[0], &pair[1]))
    }

    /// Empirical joint distribution over the lagged schema.
    pub fn lagged_table(&self, dense: bool) -> PavlovResult<ProbabilityTable> {
        let variables = lagged::lagged_variables(&self.schema);
        let mut table = ProbabilityTable::with_storage(&variables, dense)?;
        let mut rows = 0usize;
        for row in self.lagged_rows() {
            table.increment(&row)?;
            rows += 1;
        }
        table.normalize(rows as f64);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pavlov_core::errors::PavlovError;
    use pavlov_core::models::Variable;

    fn schema() -> Schema {
        Schema::new(
            vec![Variable::action("Push", ["none", "button"])],
            vec![Variable::sensory("Light", ["off", "on"])],
        )
        .unwrap()
    }

    #[test]
    fn close_entry_fills_defaults() {
        let mut history = ObservationHistory::new(schema());
        history.observe("Light", "on").unwrap();
        let t = history.close_entry();
        assert_eq!(t, 0);
        let entry = history.get(0).unwrap();
        assert_eq!(entry["Light"], "on");
        assert_eq!(entry["Push"], "none");
    }

    #[test]
    fn observe_rejects_unknown_names_and_values() {
        let mut history = ObservationHistory::new(schema());
        assert!(matches!(
            history.observe("Heat", "on"),
            Err(PavlovError::UnknownVariable { .. })
        ));
        assert!(matches!(
            history.observe("Light", "dim"),
            Err(PavlovError::UnknownValue { .. })
        ));
    }

    #[test]
    fn current_value_falls_back_to_default() {
        let mut history = ObservationHistory::new(schema());
        history.open_entry();
        assert_eq!(history.current_value("Light").unwrap(), "off");
        history.observe("Light", "on").unwrap();
        assert_eq!(history.current_value("Light").unwrap(), "on");
    }

    #[test]
    fn joint_is_normalized_over_entries() {
        let mut history = ObservationHistory::new(schema());
        for light in ["on", "on", "off", "on"] {
            history.observe("Light", light).unwrap();
            history.close_entry();
        }
        let table = history.joint(&["Light"], false).unwrap();
        let on: Assignment = [("Light".to_string(), "on".to_string())].into();
        assert!((table.prob(&on).unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn lagged_rows_pair_consecutive_entries() {
        let mut history = ObservationHistory::new(schema());
        history.observe("Push", "button").unwrap();
        history.close_entry();
        history.observe("Light", "on").unwrap();
        history.close_entry();
        let rows: Vec<Assignment> = history.lagged_rows().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Push@t-1"], "button");
        assert_eq!(rows[0]["Light@t-1"], "off");
        assert_eq!(rows[0]["Light@t"], "on");
    }
}
