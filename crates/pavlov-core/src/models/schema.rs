//! Variable declarations and the action/sensory partition.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Assignment, Predicate};
use crate::errors::{PavlovError, PavlovResult};

/// Which side of the agent a variable lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    /// Motor variable; the agent may intervene on it.
    Action,
    /// Observed variable.
    Sensory,
}

/// A named discrete variable with a finite, ordered domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub domain: Vec<String>,
    pub kind: VariableKind,
    /// Value filled in when the variable is not observed (or not acted on) in a timestep.
    pub default: String,
}

impl Variable {
    /// Declare a variable whose default is the first domain value.
    pub fn new<I, S>(name: impl Into<String>, kind: VariableKind, domain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domain: Vec<String> = domain.into_iter().map(Into::into).collect();
        let default = domain.first().cloned().unwrap_or_default();
        Self {
            name: name.into(),
            domain,
            kind,
            default,
        }
    }

    pub fn action<I, S>(name: impl Into<String>, domain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, VariableKind::Action, domain)
    }

    pub fn sensory<I, S>(name: impl Into<String>, domain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, VariableKind::Sensory, domain)
    }

    /// Replace the default-fill value.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// Same variable under another name (used for the lagged causal schema).
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.domain.iter().position(|v| v == value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.index_of(value).is_some()
    }

    pub fn is_action(&self) -> bool {
        self.kind == VariableKind::Action
    }
}

/// The declared variables of an agent, partitioned into actions and sensors.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    variables: Vec<Variable>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema. Variable names must be unique, domains non-empty, and each
    /// default must lie in its domain.
    pub fn new(actions: Vec<Variable>, sensors: Vec<Variable>) -> PavlovResult<Self> {
        let mut schema = Self::default();
        for mut variable in actions {
            variable.kind = VariableKind::Action;
            schema.push(variable)?;
        }
        for mut variable in sensors {
            variable.kind = VariableKind::Sensory;
            schema.push(variable)?;
        }
        Ok(schema)
    }

    fn push(&mut self, variable: Variable) -> PavlovResult<()> {
        if self.index.contains_key(&variable.name) {
            return Err(PavlovError::DuplicateVariable {
                name: variable.name,
            });
        }
        if variable.domain.is_empty() {
            return Err(PavlovError::invalid_configuration(format!(
                "variable {} has an empty domain",
                variable.name
            )));
        }
        if !variable.contains(&variable.default) {
            return Err(PavlovError::UnknownValue {
                variable: variable.name,
                value: variable.default,
            });
        }
        self.index.insert(variable.name.clone(), self.variables.len());
        self.variables.push(variable);
        Ok(())
    }

    pub fn get(&self, name: &str) -> PavlovResult<&Variable> {
        self.index
            .get(name)
            .map(|&i| &self.variables[i])
            .ok_or_else(|| PavlovError::unknown_variable(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Check that `value` is a legal value of `name`.
    pub fn validate(&self, name: &str, value: &str) -> PavlovResult<&Variable> {
        let variable = self.get(name)?;
        if !variable.contains(value) {
            return Err(PavlovError::UnknownValue {
                variable: name.to_string(),
                value: value.to_string(),
            });
        }
        Ok(variable)
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn actions(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(|v| v.is_action())
    }

    pub fn sensors(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(|v| !v.is_action())
    }

    /// Every non-default value of every action variable.
    pub fn legal_actions(&self) -> Vec<Predicate> {
        self.actions()
            .flat_map(|v| {
                v.domain
                    .iter()
                    .filter(move |value| **value != v.default)
                    .map(move |value| Predicate::new(v.name.clone(), value.clone()))
            })
            .collect()
    }

    /// The all-defaults assignment.
    pub fn defaults(&self) -> Assignment {
        self.variables
            .iter()
            .map(|v| (v.name.clone(), v.default.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
