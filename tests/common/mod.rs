//! Test utilities shared by the integration tests
//!
//! - Alpha-equivalence assertions for results holding fresh variables
//! - Order-insensitive comparison of result sets
#![allow(dead_code)]

use mettaspace::backend::models::{atoms_are_equivalent, Atom};
use mettaspace::backend::runner::Metta;

/// Assert that `actual` and `expected` have the same length and are
/// pairwise alpha-equivalent.
pub fn assert_atoms_equivalent(actual: &[Atom], expected: &[Atom]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Expected {} atoms, got {}: {:?}",
        expected.len(),
        actual.len(),
        actual
    );
    for (a, e) in actual.iter().zip(expected) {
        assert!(atoms_are_equivalent(a, e), "Expected {} to be alpha-equivalent to {}", a, e);
    }
}

/// Assert that `actual` is a permutation of `expected`.
pub fn assert_eq_no_order(actual: &[Atom], expected: &[Atom]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Expected {:?}, got {:?}",
        expected,
        actual
    );
    let mut remaining: Vec<&Atom> = expected.iter().collect();
    for atom in actual {
        match remaining.iter().position(|e| *e == atom) {
            Some(i) => {
                remaining.swap_remove(i);
            }
            None => panic!("Unexpected atom {} in {:?}, expected {:?}", atom, actual, expected),
        }
    }
}

/// Run `src`, failing the test on any parse or evaluation error.
pub fn run_ok(metta: &mut Metta, src: &str) -> Vec<Vec<Atom>> {
    metta
        .run(src)
        .into_iter()
        .map(|outcome| outcome.unwrap_or_else(|err| panic!("{} failed: {}", src, err)))
        .collect()
}

/// Run `src` and flatten every query's results into one list.
pub fn run_flat(metta: &mut Metta, src: &str) -> Vec<Atom> {
    run_ok(metta, src).into_iter().flatten().collect()
}

/// Parse `src` with a fresh runner.
pub fn parse(src: &str) -> Vec<Atom> {
    Metta::new().parse_all(src).unwrap()
}
