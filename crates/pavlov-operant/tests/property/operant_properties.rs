//! Property tests for pavlov-operant: scoring convergence and memory aging.

use proptest::prelude::*;

use pavlov_core::models::{Predicate, VariableKind};
use pavlov_operant::{demerit, merit, WorkingMemory};

proptest! {
    #[test]
    fn scores_are_probabilities(r in 0u64..500, extra in 0u64..500) {
        let n = r + extra;
        let m = merit(r, n);
        let d = demerit(r, n);
        prop_assert!((0.0..=1.0).contains(&m));
        prop_assert!((0.0..=1.0).contains(&d));
        if n > 0 {
            let rate = r as f64 / n as f64;
            prop_assert!(m <= rate + 1e-12);
            prop_assert!(d >= rate - 1e-12);
        }
    }

    #[test]
    fn scores_converge_to_the_rate(num in 1u64..10, den_extra in 0u64..10, scale in 1u64..50) {
        let den = num + den_extra;
        let rate = num as f64 / den as f64;
        let (r1, n1) = (num * scale, den * scale);
        let (r2, n2) = (num * scale * 4, den * scale * 4);
        prop_assert!((merit(r2, n2) - rate).abs() <= (merit(r1, n1) - rate).abs() + 1e-12);
        prop_assert!((demerit(r2, n2) - rate).abs() <= (demerit(r1, n1) - rate).abs() + 1e-12);
    }

    #[test]
    fn predicates_age_until_evicted(max_age in 2usize..12, k in 0usize..16) {
        let mut memory = WorkingMemory::new(max_age);
        let bell = Predicate::new("Bell", "ring");
        memory.add_sensory(bell.clone());
        for _ in 0..k {
            memory.age();
        }
        if k <= max_age {
            prop_assert!(memory.holds(&bell, VariableKind::Sensory, k));
        } else {
            prop_assert!(memory.slots().all(|slot| !slot.sensory.contains(&bell)));
        }
        prop_assert_eq!(memory.slots().count(), max_age + 1);
    }
}
