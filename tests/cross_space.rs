//! Unification, conjunctive queries and composition of spaces through
//! registered handles.

mod common;

use common::{assert_atoms_equivalent, parse, run_flat, run_ok};
use mettaspace::backend::config::EvalConfig;
use mettaspace::backend::eval::unify;
use mettaspace::backend::models::{atoms_are_equivalent, Atom, SpaceHandle, VariableAtom};
use mettaspace::backend::runner::Metta;
use mettaspace::error::MettaError;

fn atom(src: &str) -> Atom {
    parse(src).remove(0)
}

#[test]
fn test_unification_is_commutative() {
    let pairs = [
        ("(f $x b)", "(f a $y)"),
        ("($x $x)", "(a $y)"),
        ("(g $x)", "(g $y)"),
        ("(h (k $x) $x)", "(h $y 1)"),
    ];
    for (left, right) in pairs {
        let (a, b) = (atom(left), atom(right));
        let ab = unify(&a, &b).unwrap_or_else(|| panic!("{} should unify with {}", a, b));
        let ba = unify(&b, &a).unwrap_or_else(|| panic!("{} should unify with {}", b, a));
        assert_eq!(ab.apply_to(&a), ab.apply_to(&b));
        assert_eq!(ba.apply_to(&a), ba.apply_to(&b));
        assert!(
            atoms_are_equivalent(&ab.apply_to(&a), &ba.apply_to(&a)),
            "{} vs {}",
            ab.apply_to(&a),
            ba.apply_to(&a)
        );
    }
}

#[test]
fn test_unification_failure_is_symmetric() {
    let pairs = [("(f a)", "(f b)"), ("$x", "(f $x)"), ("(f a b)", "(f $x)"), ("1", "1.0")];
    for (left, right) in pairs {
        let (a, b) = (atom(left), atom(right));
        assert!(unify(&a, &b).is_none(), "{} should not unify with {}", a, b);
        assert!(unify(&b, &a).is_none(), "{} should not unify with {}", b, a);
    }
}

#[test]
fn test_results_with_free_variables_are_alpha_equivalent() {
    let mut metta = Metta::new();
    run_ok(&mut metta, "(= (mk) (pair $x $y))");
    let first = run_flat(&mut metta, "!(mk)");
    let second = run_flat(&mut metta, "!(mk)");
    assert_atoms_equivalent(&first, &parse("(pair $a $b)"));
    assert_atoms_equivalent(&second, &first);
    // each rule use gets fresh variables
    assert_ne!(first, second);
    assert!(!atoms_are_equivalent(&first[0], &atom("(pair $a $a)")));
}

#[test]
fn test_three_clause_conjunction_binds_consistently() {
    let mut metta = Metta::new();
    run_ok(
        &mut metta,
        r#"
            (a 1) (b 1) (c 1)
            (a 2) (b 2)
            (a 3) (c 3)
            "#,
    );
    let results = run_flat(&mut metta, "!(match &self (, (a $x) (b $x) (c $x)) $x)");
    assert_eq!(results, vec![Atom::long(1)]);

    let pattern = atom("(, (a $x) (b $x) (c $x))");
    let found: Vec<_> = metta.space().query(&pattern).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get(&VariableAtom::new("x")), Some(&Atom::long(1)));

    run_ok(&mut metta, "(b 3)");
    let results = run_flat(&mut metta, "!(match &self (, (a $x) (b $x) (c $x)) $x)");
    assert_eq!(results, vec![Atom::long(1), Atom::long(3)]);
}

#[test]
fn test_conjunction_fails_entirely() {
    let mut metta = Metta::new();
    run_ok(&mut metta, "(a 1) (b 2) (c 3)");
    let results = run_flat(&mut metta, "!(match &self (, (a $x) (b $x) (c $x)) $x)");
    assert!(results.is_empty());
}

#[test]
fn test_subst() {
    let space = SpaceHandle::new("people");
    for fact in parse("(age ann 30) (age bob 25)") {
        space.add(fact);
    }
    assert_eq!(
        space.subst(&atom("(age $who $n)"), &atom("($n $who)")),
        parse("(30 ann) (25 bob)")
    );
}

#[test]
fn test_two_unifying_rules_both_contribute() {
    let mut metta = Metta::new();
    let results = run_flat(
        &mut metta,
        r#"
        (= (pet) cat)
        (= (pet) dog)
        (= (other) fish)
        !(pet)
        "#,
    );
    assert_eq!(results, parse("cat dog"));
}

const GRAPH: &str = r#"
    (edge a b)
    (edge b c)
    (edge c $z)
"#;

#[test]
fn test_registered_handle_is_transparent() {
    let mut s = Metta::new();
    run_ok(&mut s, GRAPH);
    let direct = run_flat(&mut s, "!(match &self (edge $x $y) ($x $y))");

    let mut u = Metta::new();
    u.register_atom("&s", s.self_atom());
    run_ok(&mut u, "(= (edges) (match &s (edge $x $y) ($x $y)))");
    let delegated = run_flat(&mut u, "!(edges)");

    assert_atoms_equivalent(&delegated, &direct);
    assert_atoms_equivalent(&direct, &parse("(a b) (b c) (c $w)"));
    assert_eq!(u.space().atom_count(), 1);
}

#[test]
fn test_mutation_through_handle_is_visible_in_target() {
    let mut s = Metta::new();
    run_ok(&mut s, GRAPH);
    let mut u = Metta::new();
    u.register_atom("&s", s.self_atom());

    let results = run_flat(&mut u, "!(add-atom &s (edge c d))");
    assert_eq!(results, vec![Atom::unit()]);
    assert!(s.space().contains(&atom("(edge c d)")));
    assert!(!u.space().contains(&atom("(edge c d)")));

    let results = run_flat(&mut s, "!(match &self (edge c d) found)");
    assert_eq!(results, parse("found found"));
}

#[test]
fn test_handles_registered_by_space_handle() {
    let shared = SpaceHandle::new("shared");
    shared.add(atom("(likes sam tea)"));

    let mut first = Metta::new();
    let mut second = Metta::new();
    first.register_atom("&shared", Atom::space(shared.clone()));
    second.register_atom("&db", Atom::space(shared.clone()));

    run_flat(&mut first, "!(add-atom &shared (likes kim coffee))");
    let results = run_flat(&mut second, "!(match &db (likes $who $what) $who)");
    assert_eq!(results, parse("sam kim"));
}

#[test]
fn test_tokens_are_per_runner() {
    let mut owner = Metta::new();
    owner.register_atom("&private", Atom::space(SpaceHandle::new("private")));
    let mut stranger = Metta::new();
    let results = run_flat(&mut stranger, "!(match &private $x $x)");
    assert_eq!(results.len(), 1);
    assert!(results[0].is_error());
}

#[test]
fn test_empty_result_is_not_an_error() {
    let mut metta = Metta::new();
    let results = run_ok(&mut metta, "(= (known) yes) !(match &self (unknown $x) $x)");
    assert_eq!(results, vec![Vec::<Atom>::new()]);
}

#[test]
fn test_depth_failure_is_distinct_from_empty_result() {
    let metta = Metta::with_config(EvalConfig { max_depth: 100 });
    let outcomes: Vec<_> = metta
        .run_forms(
            r#"
            (= (down $n) (down (+ $n 1)))
            !(down 0)
            !(match &self (nothing $x) $x)
            "#,
        )
        .collect();
    assert!(matches!(
        outcomes[0],
        Err(MettaError::DepthLimitExceeded { limit: 100, .. })
    ));
    assert_eq!(outcomes[1], Ok(Vec::new()));
}

#[test]
fn test_space_handles_cross_threads() {
    let metta = Metta::new();
    metta.add(atom("(seen 0)"));
    let space = metta.space().clone();
    let handle = std::thread::spawn(move || {
        space.add(atom("(seen 1)"));
        space.atom_count()
    });
    assert_eq!(handle.join().unwrap(), 2);
    assert_eq!(metta.space().atom_count(), 2);
}
