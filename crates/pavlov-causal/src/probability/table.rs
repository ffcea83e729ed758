//! Sparse/dense frequency and probability tables keyed by full variable assignments.
//!
//! Cells are addressed by a key of domain indices, one per schema variable, in
//! ascending name order. Sparse tables only hold cells that were written; dense
//! tables pre-allocate the whole cross product in mixed-radix order.

use std::collections::{BTreeMap, HashMap};

use pavlov_core::errors::{PavlovError, PavlovResult};
use pavlov_core::models::{Assignment, Variable};

#[derive(Debug, Clone, PartialEq)]
enum Cells {
    Sparse(HashMap<Vec<usize>, f64>),
    Dense(Vec<f64>),
}

/// A (possibly unnormalized) joint distribution over a fixed set of variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTable {
    /// Schema variables, sorted by name.
    variables: Vec<Variable>,
    /// Name → position in `variables`.
    positions: BTreeMap<String, usize>,
    cells: Cells,
}

impl ProbabilityTable {
    /// Empty sparse table over `variables`.
    pub fn sparse(variables: &[Variable]) -> PavlovResult<Self> {
        Self::with_storage(variables, false)
    }

    /// Zero-filled dense table over `variables`.
    pub fn dense(variables: &[Variable]) -> PavlovResult<Self> {
        Self::with_storage(variables, true)
    }

    pub fn with_storage(variables: &[Variable], dense: bool) -> PavlovResult<Self> {
        let mut sorted: Vec<Variable> = variables.to_vec();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut positions = BTreeMap::new();
        for (i, variable) in sorted.iter().enumerate() {
            if positions.insert(variable.name.clone(), i).is_some() {
                return Err(PavlovError::DuplicateVariable {
                    name: variable.name.clone(),
                });
            }
            if variable.domain.is_empty() {
                return Err(PavlovError::invalid_configuration(format!(
                    "variable {} has an empty domain",
                    variable.name
                )));
            }
        }

        let cells = if dense {
            let size = sorted.iter().map(|v| v.domain.len()).product();
            Cells::Dense(vec![0.0; size])
        } else {
            Cells::Sparse(HashMap::new())
        };

        Ok(Self {
            variables: sorted,
            positions,
            cells,
        })
    }

    /// Schema variables in key order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }

    pub fn variable(&self, name: &str) -> PavlovResult<&Variable> {
        self.positions
            .get(name)
            .map(|&i| &self.variables[i])
            .ok_or_else(|| PavlovError::unknown_variable(name))
    }

    pub fn is_dense(&self) -> bool {
        matches!(self.cells, Cells::Dense(_))
    }

    /// Number of stored cells (the full cross product for dense tables).
    pub fn cell_count(&self) -> usize {
        match &self.cells {
            Cells::Sparse(map) => map.len(),
            Cells::Dense(values) => values.len(),
        }
    }

    // --- Writes ---

    /// Add 1 to the cell of `assignment`. Partial keys are rejected; use
    /// [`ProbabilityTable::marginal`] for partial sums.
    pub fn increment(&mut self, assignment: &Assignment) -> PavlovResult<()> {
        self.add(assignment, 1.0)
    }

    /// Add `amount` to the cell of `assignment`. Keys outside the schema are ignored;
    /// every schema variable must be present.
    pub fn add(&mut self, assignment: &Assignment, amount: f64) -> PavlovResult<()> {
        let key = self.key_of(assignment)?;
        *self.cell_mut(key) += amount;
        Ok(())
    }

    /// Overwrite the cell of `assignment`.
    pub fn set_prob(&mut self, assignment: &Assignment, value: f64) -> PavlovResult<()> {
        let key = self.key_of(assignment)?;
        *self.cell_mut(key) = value;
        Ok(())
    }

    /// Divide every stored value by `n`. A zero divisor leaves the table unchanged.
    pub fn normalize(&mut self, n: f64) {
        if n != 0.0 {
            self.map(|v| v / n);
        }
    }

    /// Apply `f` to every stored value.
    pub fn map(&mut self, f: impl Fn(f64) -> f64) {
        match &mut self.cells {
            Cells::Sparse(map) => map.values_mut().for_each(|v| *v = f(*v)),
            Cells::Dense(values) => values.iter_mut().for_each(|v| *v = f(*v)),
        }
    }

    // --- Reads ---

    /// Value of a full assignment. Cells never written read as 0.
    pub fn prob(&self, assignment: &Assignment) -> PavlovResult<f64> {
        let key = self.key_of(assignment)?;
        Ok(self.cell(&key))
    }

    pub fn total(&self) -> f64 {
        self.cells().map(|(_, v)| v).sum()
    }

    /// Sum of every cell whose projection onto the keys of `partial` equals `partial`.
    pub fn marginal(&self, partial: &Assignment) -> PavlovResult<f64> {
        let constraints = self.constraints_of(partial)?;
        Ok(self
            .cells()
            .filter(|(key, _)| constraints.iter().all(|&(pos, idx)| key[pos] == idx))
            .map(|(_, v)| v)
            .sum())
    }

    /// P(event | given) = P(event, given) / P(given). Zero when P(given) is zero or
    /// when `event` and `given` disagree on a shared variable.
    pub fn conditional_prob(&self, event: &Assignment, given: &Assignment) -> PavlovResult<f64> {
        let mut joint = given.clone();
        for (name, value) in event {
            match joint.get(name) {
                Some(existing) if existing != value => {
                    // Still surface unknown names before answering.
                    self.constraints_of(event)?;
                    return Ok(0.0);
                }
                _ => {
                    joint.insert(name.clone(), value.clone());
                }
            }
        }
        let denominator = self.marginal(given)?;
        if denominator == 0.0 {
            return Ok(0.0);
        }
        Ok(self.marginal(&joint)? / denominator)
    }

    /// Marginal table over `names`; the other variables are summed out.
    pub fn project(&self, names: &[&str]) -> PavlovResult<ProbabilityTable> {
        let mut picked: Vec<usize> = Vec::with_capacity(names.len());
        for name in names {
            let pos = *self
                .positions
                .get(*name)
                .ok_or_else(|| PavlovError::unknown_variable(*name))?;
            if !picked.contains(&pos) {
                picked.push(pos);
            }
        }
        let subset: Vec<Variable> = picked.iter().map(|&p| self.variables[p].clone()).collect();
        let mut projected = ProbabilityTable::sparse(&subset)?;

        // Map positions in `self` to positions in the projected (name-sorted) schema.
        let targets: Vec<(usize, usize)> = picked
            .iter()
            .map(|&p| (p, projected.positions[&self.variables[p].name]))
            .collect();

        for (key, value) in self.cells() {
            let mut sub_key = vec![0; targets.len()];
            for &(from, to) in &targets {
                sub_key[to] = key[from];
            }
            *projected.cell_mut(sub_key) += value;
        }
        Ok(projected)
    }

    /// P(rest | given) for every stored cell, as a table over the same schema.
    /// Cells whose conditioning assignment has zero mass are 0.
    pub fn conditional(&self, given: &[&str]) -> PavlovResult<ProbabilityTable> {
        let given_table = self.project(given)?;
        let mut result = Self::with_storage(&self.variables, self.is_dense())?;
        for (key, value) in self.cells() {
            let assignment = self.assignment_of(&key);
            let denominator = given_table.prob(&assignment)?;
            let conditional = if denominator == 0.0 {
                0.0
            } else {
                value / denominator
            };
            *result.cell_mut(key) = conditional;
        }
        Ok(result)
    }

    /// Every stored cell as `(assignment, value)`.
    pub fn entries(&self) -> Vec<(Assignment, f64)> {
        self.cells()
            .map(|(key, v)| (self.assignment_of(&key), v))
            .collect()
    }

    /// Whether both tables share a schema and agree on every assignment within `tolerance`.
    pub fn approx_eq(&self, other: &ProbabilityTable, tolerance: f64) -> bool {
        if self.variables != other.variables {
            return false;
        }
        let mut keys: Vec<Vec<usize>> = self.cells().map(|(k, _)| k).collect();
        keys.extend(other.cells().map(|(k, _)| k));
        keys.iter()
            .all(|key| (self.cell(key) - other.cell(key)).abs() <= tolerance)
    }

    // --- Key plumbing ---

    fn key_of(&self, assignment: &Assignment) -> PavlovResult<Vec<usize>> {
        self.variables
            .iter()
            .map(|variable| {
                let value = assignment.get(&variable.name).ok_or_else(|| {
                    PavlovError::IncompleteAssignment {
                        missing: variable.name.clone(),
                    }
                })?;
                variable
                    .index_of(value)
                    .ok_or_else(|| PavlovError::UnknownValue {
                        variable: variable.name.clone(),
                        value: value.clone(),
                    })
            })
            .collect()
    }

    /// `(position, domain index)` pairs for a partial assignment.
    fn constraints_of(&self, partial: &Assignment) -> PavlovResult<Vec<(usize, usize)>> {
        partial
            .iter()
            .map(|(name, value)| {
                let pos = *self
                    .positions
                    .get(name)
                    .ok_or_else(|| PavlovError::unknown_variable(name.as_str()))?;
                let idx =
                    self.variables[pos]
                        .index_of(value)
                        .ok_or_else(|| PavlovError::UnknownValue {
                            variable: name.clone(),
                            value: value.clone(),
                        })?;
                Ok((pos, idx))
            })
            .collect()
    }

    fn assignment_of(&self, key: &[usize]) -> Assignment {
        self.variables
            .iter()
            .zip(key)
            .map(|(variable, &idx)| (variable.name.clone(), variable.domain[idx].clone()))
            .collect()
    }

    fn offset_of(&self, key: &[usize]) -> usize {
        self.variables
            .iter()
            .zip(key)
            .fold(0, |offset, (variable, &idx)| offset * variable.domain.len() + idx)
    }

    fn key_at(&self, mut offset: usize) -> Vec<usize> {
        let mut key = vec![0; self.variables.len()];
        for (slot, variable) in key.iter_mut().zip(&self.variables).rev() {
            let radix = variable.domain.len();
            *slot = offset % radix;
            offset /= radix;
        }
        key
    }

    fn cell(&self, key: &[usize]) -> f64 {
        match &self.cells {
            Cells::Sparse(map) => map.get(key).copied().unwrap_or(0.0),
            Cells::Dense(values) => values[self.offset_of(key)],
        }
    }

    fn cell_mut(&mut self, key: Vec<usize>) -> &mut f64 {
        let offset = match &self.cells {
            Cells::Dense(_) => self.offset_of(&key),
            Cells::Sparse(_) => 0,
        };
        match &mut self.cells {
            Cells::Sparse(map) => map.entry(key).or_insert(0.0),
            Cells::Dense(values) => &mut values[offset],
        }
    }

    fn cells(&self) -> Box<dyn Iterator<Item = (Vec<usize>, f64)> + '_> {
        match &self.cells {
            Cells::Sparse(map) => Box::new(map.iter().map(|(k, v)| (k.clone(), *v))),
            Cells::Dense(values) => Box::new(
                values
                    .iter()
                    .enumerate()
                    .map(move |(offset, v)| (self.key_at(offset), *v)),
            ),
        }
    }
}

/// Every full assignment over `variables`, in mixed-radix order (last variable fastest).
/// Zero variables yield the single empty assignment.
pub fn cross_product(variables: &[&Variable]) -> Vec<Assignment> {
    let mut out = vec![Assignment::new()];
    for variable in variables {
        out = out
            .into_iter()
            .flat_map(|partial| {
                variable.domain.iter().map(move |value| {
                    let mut next = partial.clone();
                    next.insert(variable.name.clone(), value.clone());
                    next
                })
            })
            .collect();
    }
    out
}
