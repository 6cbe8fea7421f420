//! Tests for space operations.

#[cfg(test)]
mod tests {
    use crate::backend::models::{Atom, SpaceHandle};
    use crate::backend::runner::{run_ok, Metta};

    fn run(metta: &mut Metta, src: &str) -> Vec<Vec<String>> {
        run_ok(metta, src)
            .into_iter()
            .map(|results| results.iter().map(|atom| atom.to_string()).collect())
            .collect()
    }

    fn run_fresh(src: &str) -> Vec<Vec<String>> {
        run(&mut Metta::new(), src)
    }

    #[test]
    fn test_match_self() {
        let results = run_fresh(
            r#"
            (color apple red)
            (color banana yellow)
            (color cherry red)
            !(match &self (color $fruit red) $fruit)
        "#,
        );
        assert_eq!(results, vec![vec!["apple", "cherry"]]);
    }

    #[test]
    fn test_match_no_results_is_empty() {
        let results = run_fresh("(color apple red) !(match &self (color $x blue) $x)");
        assert_eq!(results, vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_match_conjunction_joins_on_shared_variable() {
        let results = run_fresh(
            r#"
            (parent a b)
            (parent b c)
            (parent c d)
            !(match &self (, (parent $x $y) (parent $y $z)) ($x $z))
        "#,
        );
        assert_eq!(results, vec![vec!["(a c)", "(b d)"]]);
    }

    #[test]
    fn test_match_template_evaluated_in_caller_space() {
        let mut metta = Metta::new();
        let kb = SpaceHandle::new("kb");
        kb.add(Atom::expr(vec![Atom::sym("num"), Atom::long(3)]));
        metta.register_atom("&kb", Atom::space(kb));
        let results = run(
            &mut metta,
            r#"
            (= (double $x) (* $x 2))
            !(match &kb (num $n) (double $n))
        "#,
        );
        assert_eq!(results, vec![vec!["6"]]);
    }

    #[test]
    fn test_target_space_rules_are_not_merged() {
        let mut metta = Metta::new();
        let kb = SpaceHandle::new("kb");
        let kb_atoms = Metta::new()
            .parse_all("(= (secret) 42) (item (secret))")
            .unwrap();
        for atom in kb_atoms {
            kb.add(atom);
        }
        metta.register_atom("&kb", Atom::space(kb));
        let results = run(&mut metta, "!(match &kb (item $x) $x) !(secret)");
        assert_eq!(results, vec![vec!["(secret)"], vec!["(secret)"]]);
    }

    #[test]
    fn test_match_unknown_space() {
        let results = run_ok(&mut Metta::new(), "!(match &nowhere $x $x)");
        assert_eq!(results[0].len(), 1);
        assert!(results[0][0].is_error());
        assert!(results[0][0].to_string().contains("unknown space &nowhere"));
    }

    #[test]
    fn test_match_not_a_space() {
        let results = run_ok(&mut Metta::new(), "!(match 42 $x $x)");
        assert!(results[0][0].is_error());
        assert!(results[0][0].to_string().contains("expected a space, got 42"));
    }

    #[test]
    fn test_match_arity() {
        let results = run_ok(&mut Metta::new(), "!(match &self x)");
        assert!(results[0][0].is_error());
        assert!(results[0][0]
            .to_string()
            .contains("match requires exactly 3 arguments"));
    }

    #[test]
    fn test_add_atom_returns_unit_and_stores_unevaluated() {
        let mut metta = Metta::new();
        let results = run(&mut metta, "(= (f) 1) !(add-atom &self (f)) !(get-atoms &self)");
        assert_eq!(results, vec![vec!["()"], vec!["(= (f) 1)", "(f)"]]);
    }

    #[test]
    fn test_remove_atom() {
        let mut metta = Metta::new();
        let results = run(
            &mut metta,
            "(a) (b) (a) !(remove-atom &self (a)) !(get-atoms &self)",
        );
        assert_eq!(results, vec![vec!["()"], vec!["(b)", "(a)"]]);
    }

    #[test]
    fn test_remove_missing_atom_is_harmless() {
        let mut metta = Metta::new();
        let results = run(&mut metta, "(a) !(remove-atom &self (z)) !(get-atoms &self)");
        assert_eq!(results, vec![vec!["()"], vec!["(a)"]]);
    }

    #[test]
    fn test_add_atom_with_bound_variable() {
        let mut metta = Metta::new();
        let results = run(
            &mut metta,
            "!(let $v 7 (add-atom &self (value $v))) !(match &self (value $x) $x)",
        );
        assert_eq!(results, vec![vec!["()"], vec!["7"]]);
    }

    #[test]
    fn test_new_space_is_independent() {
        let results = run_fresh(
            r#"
            (outer fact)
            !(let $s (new-space)
                (let $u (add-atom $s (inner 1))
                    (collapse (get-atoms $s))))
        "#,
        );
        assert_eq!(results, vec![vec!["((inner 1))"]]);
    }

    #[test]
    fn test_new_space_match() {
        let results = run_fresh(
            "!(let $s (new-space) (let $u (add-atom $s (fact 1)) (match $s (fact $x) $x)))",
        );
        assert_eq!(results, vec![vec!["1"]]);
    }

    #[test]
    fn test_new_space_arity() {
        let results = run_ok(&mut Metta::new(), "!(new-space extra)");
        assert!(results[0][0].is_error());
    }

    #[test]
    fn test_get_atoms_unknown_space() {
        let results = run_ok(&mut Metta::new(), "!(get-atoms &missing)");
        assert!(results[0][0].is_error());
        assert!(results[0][0].to_string().contains("get-atoms: unknown space"));
    }

    #[test]
    fn test_match_sees_atoms_added_by_earlier_query() {
        let mut metta = Metta::new();
        let results = run(
            &mut metta,
            "!(add-atom &self (later 1)) !(match &self (later $x) $x)",
        );
        assert_eq!(results, vec![vec!["()"], vec!["1"]]);
    }
}
