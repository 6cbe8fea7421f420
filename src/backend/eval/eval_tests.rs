use super::*;
use crate::backend::compile::compile;
use crate::backend::config::EvalConfig;
use crate::backend::runner::{run_ok, Metta};

/// Add every bare form of `program` to the environment's space.
fn load(env: &Environment, program: &str) {
    for form in compile(program, env.tokenizer()).unwrap() {
        env.space().add(form.atom);
    }
}

fn parse(env: &Environment, src: &str) -> Atom {
    compile(src, env.tokenizer()).unwrap().remove(0).atom
}

fn eval_str(env: &Environment, src: &str) -> Vec<String> {
    eval(parse(env, src), env)
        .unwrap()
        .iter()
        .map(|atom| atom.to_string())
        .collect()
}

fn eval_fresh(src: &str) -> Vec<String> {
    eval_str(&Environment::new(), src)
}

#[test]
fn test_eval_symbol_normal_form() {
    assert_eq!(eval_fresh("foo"), vec!["foo"]);
}

#[test]
fn test_eval_variable_and_empty_expression() {
    assert_eq!(eval_fresh("$x"), vec!["$x"]);
    assert_eq!(eval_fresh("()"), vec!["()"]);
}

#[test]
fn test_eval_builtin_add() {
    assert_eq!(eval_fresh("(+ 1 2)"), vec!["3"]);
}

#[test]
fn test_eval_nested_arithmetic() {
    assert_eq!(eval_fresh("(* (+ 1 2) (- 10 4))"), vec!["18"]);
}

#[test]
fn test_eval_float_promotion() {
    assert_eq!(eval_fresh("(+ 1 2.5)"), vec!["3.5"]);
}

#[test]
fn test_eval_comparison_and_logic() {
    assert_eq!(eval_fresh("(and (< 1 2) (not (== a b)))"), vec!["True"]);
}

#[test]
fn test_grounded_error_becomes_error_atom() {
    let env = Environment::new();
    let results = eval(parse(&env, "(/ 1 0)"), &env).unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].is_error());
    assert_eq!(
        results[0].to_string(),
        "(Error (/ 1 0) \"Arithmetic error: Division by zero\")"
    );
}

#[test]
fn test_grounded_type_error() {
    let results = eval_fresh("(+ 1 a)");
    assert_eq!(results.len(), 1);
    assert!(results[0].contains("expected Number, got Symbol"));
}

#[test]
fn test_unbound_argument_does_not_reduce() {
    assert_eq!(eval_fresh("(+ $x 1)"), vec!["(+ $x 1)"]);
}

#[test]
fn test_error_child_short_circuits() {
    let results = eval_fresh("(foo (/ 1 0) (bar))");
    assert_eq!(results.len(), 1);
    assert!(results[0].starts_with("(Error (/ 1 0)"));
}

#[test]
fn test_error_atom_is_normal_form() {
    assert_eq!(eval_fresh("(Error foo \"bad\")"), vec!["(Error foo \"bad\")"]);
}

#[test]
fn test_rule_rewrites_to_fixpoint() {
    let env = Environment::new();
    load(
        &env,
        r#"
        (= (double $x) (* $x 2))
        (= (quad $x) (double (double $x)))
    "#,
    );
    assert_eq!(eval_str(&env, "(quad 3)"), vec!["12"]);
}

#[test]
fn test_recursive_rules() {
    let env = Environment::new();
    load(
        &env,
        r#"
        (= (fact $n) (if (== $n 0) 1 (* $n (fact (- $n 1)))))
    "#,
    );
    assert_eq!(eval_str(&env, "(fact 5)"), vec!["120"]);
}

#[test]
fn test_peano_addition() {
    let env = Environment::new();
    load(
        &env,
        r#"
        (= (add Z $y) $y)
        (= (add (S $x) $y) (S (add $x $y)))
    "#,
    );
    assert_eq!(eval_str(&env, "(add (S (S Z)) (S Z))"), vec!["(S (S (S Z)))"]);
}

#[test]
fn test_rules_that_all_prune_contribute_nothing() {
    let env = Environment::new();
    load(&env, "(= (f $x) (let 1 $x never))");
    assert!(eval_str(&env, "(f 2)").is_empty());
}

#[test]
fn test_superpose() {
    assert_eq!(eval_fresh("(superpose (1 2 3))"), vec!["1", "2", "3"]);
    assert_eq!(eval_fresh("(superpose ((+ 1 1) (+ 2 2)))"), vec!["2", "4"]);
}

#[test]
fn test_superpose_keeps_duplicates() {
    assert_eq!(eval_fresh("(superpose (a a))"), vec!["a", "a"]);
}

#[test]
fn test_superpose_empty_prunes_expression() {
    assert!(eval_fresh("(f (superpose ()))").is_empty());
}

#[test]
fn test_children_branch_left_to_right() {
    assert_eq!(
        eval_fresh("(+ (superpose (1 2)) (superpose (10 20)))"),
        vec!["11", "21", "12", "22"]
    );
}

#[test]
fn test_bindings_threaded_per_branch() {
    assert_eq!(
        eval_fresh("(let $x (superpose (1 2)) (pair $x $x))"),
        vec!["(pair 1 1)", "(pair 2 2)"]
    );
}

#[test]
fn test_collapse() {
    assert_eq!(eval_fresh("(collapse (superpose (1 2 3)))"), vec!["(1 2 3)"]);
}

#[test]
fn test_collapse_of_nothing_is_unit() {
    assert_eq!(eval_fresh("(collapse (match &self (missing $x) $x))"), vec!["()"]);
}

#[test]
fn test_let() {
    assert_eq!(eval_fresh("(let $x (+ 1 2) (* $x $x))"), vec!["9"]);
}

#[test]
fn test_let_destructures() {
    assert_eq!(eval_fresh("(let (pair $a $b) (pair 1 2) (+ $a $b))"), vec!["3"]);
}

#[test]
fn test_let_mismatch_prunes() {
    assert!(eval_fresh("(let (pair $a) (other 1) $a)").is_empty());
}

#[test]
fn test_let_star() {
    assert_eq!(eval_fresh("(let* (($x 2) ($y (* $x 5))) (+ $x $y))"), vec!["12"]);
}

#[test]
fn test_let_star_malformed() {
    let results = eval_fresh("(let* (x) x)");
    assert_eq!(results.len(), 1);
    assert!(results[0].contains("let* binding must be a (pattern value) pair"));
}

#[test]
fn test_let_arity() {
    let results = eval_fresh("(let $x 1)");
    assert!(results[0].contains("let requires exactly 3 arguments"));
}

#[test]
fn test_if() {
    assert_eq!(eval_fresh("(if True yes no)"), vec!["yes"]);
    assert_eq!(eval_fresh("(if (> 1 2) yes no)"), vec!["no"]);
}

#[test]
fn test_if_only_evaluates_chosen_branch() {
    assert_eq!(eval_fresh("(if True ok (/ 1 0))"), vec!["ok"]);
}

#[test]
fn test_if_non_boolean_condition() {
    let results = eval_fresh("(if 5 yes no)");
    assert_eq!(results.len(), 1);
    assert!(results[0].contains("if condition must be True or False, got 5"));
}

#[test]
fn test_quote() {
    assert_eq!(eval_fresh("(quote (+ 1 2))"), vec!["(quote (+ 1 2))"]);
}

#[test]
fn test_unify() {
    assert_eq!(eval_fresh("(unify (f $x) (f 1) $x none)"), vec!["1"]);
    assert_eq!(eval_fresh("(unify (f 1) (g 1) yes no)"), vec!["no"]);
}

#[test]
fn test_depth_limit() {
    let env = Environment::with_config(EvalConfig { max_depth: 20 });
    load(&env, "(= (loop) (loop))");
    match eval(parse(&env, "(loop)"), &env) {
        Err(MettaError::DepthLimitExceeded { limit, .. }) => assert_eq!(limit, 20),
        other => panic!("Expected depth limit error, got {:?}", other),
    }
}

#[test]
fn test_nested_normal_form_deeper_than_limit() {
    let env = Environment::with_config(EvalConfig { max_depth: 20 });
    let mut nested = Atom::sym("Z");
    for _ in 0..100 {
        nested = Atom::expr(vec![Atom::sym("S"), nested]);
    }
    assert_eq!(eval(nested.clone(), &env).unwrap(), vec![nested]);
}

#[test]
fn test_depth_counts_rewrites_not_nesting() {
    let env = Environment::with_config(EvalConfig { max_depth: 30 });
    load(&env, "(= (wrap $x) (S $x))");
    let mut call = Atom::sym("Z");
    for _ in 0..50 {
        call = Atom::expr(vec![Atom::sym("wrap"), call]);
    }
    let results = eval(call, &env).unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].to_string().starts_with("(S (S (S"));
}

#[test]
fn test_grounded_atoms_are_rewritten_by_rules() {
    let env = Environment::new();
    load(&env, "(= 1 one)");
    assert_eq!(eval_str(&env, "1"), vec!["one"]);
    assert_eq!(eval_str(&env, "(pair 1 2)"), vec!["(pair one 2)"]);
    assert_eq!(eval_str(&env, "2"), vec!["2"]);
}

#[test]
fn test_grounded_error_stays_in_its_branch() {
    let env = Environment::new();
    load(
        &env,
        r#"
        (= (f) (/ 1 0))
        (= (f) ok)
    "#,
    );
    assert_eq!(
        eval_str(&env, "(f)"),
        vec!["(Error (/ 1 0) \"Arithmetic error: Division by zero\")", "ok"]
    );
}

#[test]
fn test_lazy_enumeration_of_infinite_stream() {
    let env = Environment::new();
    load(
        &env,
        r#"
        (= (nat) Z)
        (= (nat) (S (nat)))
    "#,
    );
    let first: Vec<String> = interpret(parse(&env, "(nat)"), &env)
        .take(3)
        .map(|result| result.unwrap().to_string())
        .collect();
    assert_eq!(first, vec!["Z", "(S Z)", "(S (S Z))"]);
}

#[test]
fn test_interpreter_reports_progress() {
    let env = Environment::new();
    let mut interpreter = interpret(parse(&env, "(+ 1 2)"), &env);
    assert!(!interpreter.is_finished());
    assert_eq!(interpreter.next().unwrap().unwrap(), Atom::long(3));
    assert!(interpreter.next().is_none());
    assert!(interpreter.is_finished());
    assert!(interpreter.steps() > 0);
}

#[test]
fn test_runner_queries_share_space() {
    let mut metta = Metta::new();
    let results = run_ok(
        &mut metta,
        r#"
            (= (color) red)
            (= (color) green)
            !(color)
            !(collapse (color))
        "#,
    );
    assert_eq!(results[0], vec![Atom::sym("red"), Atom::sym("green")]);
    assert_eq!(results[1].len(), 1);
    assert_eq!(results[1][0].to_string(), "(red green)");
}
