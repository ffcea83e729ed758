//! Exact (tolerance-bounded) independence tests over a probability table.
//!
//! The table may hold raw counts; every probability is taken relative to the
//! table's total mass. Small-sample noise is not corrected for: two variables are
//! independent only if the factorisation holds within `tolerance` for every value
//! combination.

use pavlov_core::errors::PavlovResult;
use pavlov_core::models::{Assignment, Variable};

use super::table::{cross_product, ProbabilityTable};

/// A ⟂ B: P(a, b) = P(a)·P(b) for every value pair.
pub fn are_independent(
    table: &ProbabilityTable,
    a: &str,
    b: &str,
    tolerance: f64,
) -> PavlovResult<bool> {
    are_conditionally_independent(table, a, b, &[], tolerance)
}

/// A ⟂ B | S: P(a, b | s) = P(a | s)·P(b | s) for every value combination and every
/// conditioning assignment `s` with non-zero mass. Assignments of S that never
/// occur are skipped, since both sides of the equation are defined as 0 there.
pub fn are_conditionally_independent(
    table: &ProbabilityTable,
    a: &str,
    b: &str,
    given: &[String],
    tolerance: f64,
) -> PavlovResult<bool> {
    let mut names: Vec<&str> = vec![a, b];
    names.extend(given.iter().map(String::as_str));
    let joint = table.project(&names)?;

    let total = joint.total();
    if total == 0.0 {
        return Ok(true);
    }

    let given_names: Vec<&str> = given.iter().map(String::as_str).collect();
    let mut a_names = vec![a];
    a_names.extend(&given_names);
    let mut b_names = vec![b];
    b_names.extend(&given_names);

    let s_table = joint.project(&given_names)?;
    let as_table = joint.project(&a_names)?;
    let bs_table = joint.project(&b_names)?;

    let a_var = joint.variable(a)?.clone();
    let b_var = joint.variable(b)?.clone();
    let given_vars: Vec<&Variable> = given_names
        .iter()
        .map(|name| joint.variable(name))
        .collect::<PavlovResult<_>>()?;

    for s in cross_product(&given_vars) {
        let p_s = s_table.prob(&s)? / total;
        if p_s == 0.0 {
            continue;
        }
        for va in &a_var.domain {
            let with_a = extend(&s, &a_var.name, va);
            let p_a_given_s = as_table.prob(&with_a)? / total / p_s;
            for vb in &b_var.domain {
                let with_b = extend(&s, &b_var.name, vb);
                let with_ab = extend(&with_a, &b_var.name, vb);
                let p_b_given_s = bs_table.prob(&with_b)? / total / p_s;
                let p_ab_given_s = joint.prob(&with_ab)? / total / p_s;
                if (p_ab_given_s - p_a_given_s * p_b_given_s).abs() > tolerance {
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}

fn extend(base: &Assignment, name: &str, value: &str) -> Assignment {
    let mut next = base.clone();
    next.insert(name.to_string(), value.to_string());
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assign(pairs: &[(&str, &str)]) -> Assignment {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn binary(names: &[&str]) -> Vec<Variable> {
        names
            .iter()
            .map(|n| Variable::sensory(*n, ["0", "1"]))
            .collect()
    }

    #[test]
    fn uniform_counts_are_independent() {
        let mut table = ProbabilityTable::sparse(&binary(&["A", "B"])).unwrap();
        for a in ["0", "1"] {
            for b in ["0", "1"] {
                for _ in 0..5 {
                    table.increment(&assign(&[("A", a), ("B", b)])).unwrap();
                }
            }
        }
        assert!(are_independent(&table, "A", "B", 1e-6).unwrap());
    }

    #[test]
    fn skewed_weather_is_dependent() {
        let vars = vec![
            Variable::sensory("Sky", ["clear", "cloudy"]),
            Variable::sensory("Temp", ["warm", "cold"]),
        ];
        let mut table = ProbabilityTable::dense(&vars).unwrap();
        for (sky, temp, p) in [
            ("clear", "warm", 0.4),
            ("clear", "cold", 0.2),
            ("cloudy", "warm", 0.1),
            ("cloudy", "cold", 0.3),
        ] {
            table
                .set_prob(&assign(&[("Sky", sky), ("Temp", temp)]), p)
                .unwrap();
        }
        assert!(!are_independent(&table, "Sky", "Temp", 1e-6).unwrap());
    }

    #[test]
    fn uniform_triple_is_conditionally_independent() {
        let mut table = ProbabilityTable::dense(&binary(&["A", "B", "C"])).unwrap();
        table.map(|_| 1.0 / 8.0);
        let given = vec!["C".to_string()];
        assert!(are_conditionally_independent(&table, "A", "B", &given, 1e-6).unwrap());
    }

    #[test]
    fn skewed_triple_is_conditionally_dependent() {
        let mut table = ProbabilityTable::dense(&binary(&["A", "B", "C"])).unwrap();
        table.map(|_| 0.05);
        table
            .set_prob(&assign(&[("A", "1"), ("B", "1"), ("C", "0")]), 0.45)
            .unwrap();
        table
            .set_prob(&assign(&[("A", "0"), ("B", "0"), ("C", "1")]), 0.25)
            .unwrap();
        let given = vec!["C".to_string()];
        assert!(!are_conditionally_independent(&table, "A", "B", &given, 1e-6).unwrap());
    }

    #[test]
    fn empty_table_is_vacuously_independent() {
        let table = ProbabilityTable::sparse(&binary(&["A", "B"])).unwrap();
        assert!(are_independent(&table, "A", "B", 1e-6).unwrap());
    }

    #[test]
    fn unknown_variable_is_an_error() {
        let table = ProbabilityTable::sparse(&binary(&["A", "B"])).unwrap();
        assert!(are_independent(&table, "A", "Z", 1e-6).is_err());
    }
}
