//! Trampoline Engine - Iterative Evaluation
//!
//! The `Interpreter` is a lazy iterator over the results of one query. Its
//! work stack holds pending branches and lazy alternative streams; each call
//! to `next` runs steps until a branch completes with a value. Taking the
//! first N results never explores the branches after them.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::backend::environment::Environment;
use crate::backend::grounded::ExecError;
use crate::backend::models::{Atom, Bindings, Grounded};
use crate::error::MettaError;

use super::super::bindings as binding_forms;
use super::super::{control_flow, rules, space};
use super::types::{push_frame, Action, Branch, Cont, ContNode, Ctx, Frame, Step, Work};

/// Resumable evaluation of one atom.
pub struct Interpreter {
    stack: Vec<Work>,
    env: Environment,
    max_depth: usize,
    steps: u64,
}

impl Interpreter {
    /// Prepare evaluation of `atom` in the environment's space.
    pub fn new(atom: Atom, env: &Environment) -> Self {
        let ctx = Ctx::new(env.space().clone());
        Self::from_branch(Branch::eval(atom, ctx, None, Bindings::new()), env)
    }

    pub(crate) fn from_branch(branch: Branch, env: &Environment) -> Self {
        Interpreter {
            stack: vec![Work::Branch(branch)],
            env: env.clone(),
            max_depth: env.max_depth(),
            steps: 0,
        }
    }

    /// Number of steps performed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// True once every branch has been explored.
    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }

    fn pop_branch(&mut self) -> Option<Branch> {
        loop {
            match self.stack.pop()? {
                Work::Branch(branch) => return Some(branch),
                Work::Alternatives(mut alternatives) => {
                    if let Some(branch) = alternatives.next() {
                        self.stack.push(Work::Alternatives(alternatives));
                        return Some(branch);
                    }
                }
            }
        }
    }

    fn schedule(&mut self, action: Action) {
        match action {
            Action::Push(branch) => self.stack.push(Work::Branch(branch)),
            Action::Fork(alternatives) => self.stack.push(Work::Alternatives(alternatives)),
            Action::Prune => {}
        }
    }

    /// Perform one step of `branch`. Returns the final value when the branch
    /// completes.
    fn step(&mut self, branch: Branch) -> Result<Option<Atom>, MettaError> {
        self.steps += 1;
        trace!(target: "mettaspace::backend::eval::step", step = ?branch.step, "step");
        match branch.step {
            Step::Eval { atom, ctx } => {
                let action = self.eval_atom(atom, ctx, branch.cont, branch.bindings)?;
                self.schedule(action);
                Ok(None)
            }
            Step::Return(atom) => match branch.cont {
                None => Ok(Some(branch.bindings.apply_to(&atom))),
                Some(node) => {
                    let action = self.resume(&node, atom, branch.bindings)?;
                    self.schedule(action);
                    Ok(None)
                }
            },
        }
    }

    fn eval_atom(
        &mut self,
        atom: Atom,
        ctx: Ctx,
        cont: Cont,
        bindings: Bindings,
    ) -> Result<Action, MettaError> {
        if ctx.depth > self.max_depth {
            debug!(target: "mettaspace::backend::eval", limit = self.max_depth, %atom, "depth limit exceeded");
            return Err(MettaError::DepthLimitExceeded {
                limit: self.max_depth,
                atom,
            });
        }
        match atom {
            Atom::Variable(_) => Ok(Action::Push(Branch::ret(atom, cont, bindings))),
            Atom::Symbol(_) | Atom::Grounded(_) => Ok(rules::apply_rules(atom, ctx, cont, bindings)),
            Atom::Expression(ref items) if items.is_empty() || atom.is_error() => {
                Ok(Action::Push(Branch::ret(atom, cont, bindings)))
            }
            Atom::Expression(_) => {
                if let Some(action) = self.eval_special_form(&atom, &ctx, &cont, &bindings)? {
                    return Ok(action);
                }
                let items: Arc<[Atom]> = match atom {
                    Atom::Expression(items) => items.into(),
                    _ => Arc::from(Vec::new()),
                };
                Ok(self.continue_args(items, Vec::new(), 0, ctx, cont, bindings))
            }
        }
    }

    /// Dispatch on the head symbol. `None` means the expression is not a
    /// special form and is reduced as an ordinary call.
    fn eval_special_form(
        &self,
        atom: &Atom,
        ctx: &Ctx,
        cont: &Cont,
        bindings: &Bindings,
    ) -> Result<Option<Action>, MettaError> {
        let Some(head) = atom.head_symbol() else {
            return Ok(None);
        };
        let args = match atom.children() {
            Some(items) => &items[1..],
            None => return Ok(None),
        };
        let call = SpecialCall {
            expr: atom,
            args,
            ctx: ctx.clone(),
            cont: cont.clone(),
            bindings: bindings.clone(),
            env: &self.env,
        };
        let action = match head {
            "let" => binding_forms::eval_let(call),
            "let*" => binding_forms::eval_let_star(call),
            "unify" => binding_forms::eval_unify(call),
            "if" => control_flow::eval_if(call),
            "quote" => control_flow::eval_quote(call),
            "match" => space::eval_match(call),
            "superpose" => space::eval_superpose(call),
            "collapse" => space::eval_collapse(call)?,
            "add-atom" => space::eval_add_atom(call),
            "remove-atom" => space::eval_remove_atom(call),
            "get-atoms" => space::eval_get_atoms(call),
            "new-space" => space::eval_new_space(call),
            _ => return Ok(None),
        };
        trace!(target: "mettaspace::backend::eval::special_form", head, "special form");
        Ok(Some(action))
    }

    /// Reduce children from `next` onwards. Variables are already normal
    /// forms and are taken directly.
    fn continue_args(
        &mut self,
        items: Arc<[Atom]>,
        mut done: Vec<Atom>,
        mut next: usize,
        ctx: Ctx,
        cont: Cont,
        bindings: Bindings,
    ) -> Action {
        while next < items.len() && matches!(items[next], Atom::Variable(_)) {
            done.push(bindings.apply_to(&items[next]));
            next += 1;
        }
        if next == items.len() {
            return self.finish_expression(done, ctx, cont, bindings);
        }
        let child = bindings.apply_to(&items[next]);
        let child_ctx = ctx.clone();
        let frame = Frame::Args {
            items,
            done,
            next: next + 1,
            ctx,
        };
        Action::Push(Branch::eval(child, child_ctx, push_frame(frame, cont), bindings))
    }

    /// All children reduced: call a grounded operation or rewrite by rules.
    fn finish_expression(&mut self, items: Vec<Atom>, ctx: Ctx, cont: Cont, bindings: Bindings) -> Action {
        let expr = bindings.apply_to(&Atom::Expression(items));
        let op = match &expr {
            Atom::Expression(items) => match items.first() {
                Some(Atom::Grounded(Grounded::Operation(op))) => Some(Arc::clone(op)),
                _ => None,
            },
            _ => None,
        };
        let Some(op) = op else {
            return rules::apply_rules(expr, ctx, cont, bindings);
        };
        let args: &[Atom] = match &expr {
            Atom::Expression(items) => &items[1..],
            _ => &[],
        };
        match op.execute(args) {
            Ok(results) => {
                trace!(target: "mettaspace::backend::eval::grounded", op = op.name(), count = results.len(), "executed");
                let ctx = ctx.deeper();
                Action::Fork(Box::new(results.into_iter().map(move |result| {
                    Branch::eval(result, ctx.clone(), cont.clone(), bindings.clone())
                })))
            }
            Err(ExecError::NoReduce) => Action::Push(Branch::ret(expr, cont, bindings)),
            Err(err) => {
                debug!(target: "mettaspace::backend::eval::grounded", op = op.name(), %err, "grounded operation failed");
                let message = err.to_string();
                Action::Push(Branch::ret(Atom::error(expr, &message), cont, bindings))
            }
        }
    }

    /// Feed a finished value to the frame on top of the continuation.
    fn resume(&mut self, node: &Arc<ContNode>, value: Atom, bindings: Bindings) -> Result<Action, MettaError> {
        let next = node.next.clone();
        let action = match &node.frame {
            Frame::Args { items, done, next: index, ctx } => {
                if value.is_error() {
                    // an error child replaces the whole expression
                    return Ok(Action::Push(Branch::ret(value, next, bindings)));
                }
                let mut done = done.clone();
                done.push(value);
                self.continue_args(Arc::clone(items), done, *index, ctx.clone(), next, bindings)
            }
            Frame::LetBody { pattern, body, ctx } => {
                binding_forms::resume_let(pattern, body, ctx, value, next, bindings)
            }
            Frame::IfBranch {
                then,
                otherwise,
                expr,
                ctx,
            } => control_flow::resume_if(then, otherwise, expr, ctx, value, next, bindings),
            Frame::MatchSpace {
                pattern,
                template,
                expr,
                ctx,
            } => space::resume_match(&self.env, pattern, template, expr, ctx, value, next, bindings),
            Frame::SpaceOp { op, atom, expr } => {
                space::resume_space_op(&self.env, *op, atom.as_ref(), expr, value, next, bindings)
            }
        };
        Ok(action)
    }
}

impl Iterator for Interpreter {
    type Item = Result<Atom, MettaError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(branch) = self.pop_branch() {
            match self.step(branch) {
                Ok(Some(result)) => return Some(Ok(result)),
                Ok(None) => {}
                Err(err) => {
                    // fatal for the whole query
                    self.stack.clear();
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

/// Arguments handed to a special-form handler.
pub(crate) struct SpecialCall<'a> {
    /// The whole form, used in error atoms
    pub expr: &'a Atom,
    /// Everything after the head symbol, unevaluated
    pub args: &'a [Atom],
    pub ctx: Ctx,
    pub cont: Cont,
    pub bindings: Bindings,
    pub env: &'a Environment,
}

impl SpecialCall<'_> {
    /// Return `atom` to the continuation.
    pub fn ret(self, atom: Atom) -> Action {
        Action::Push(Branch::ret(atom, self.cont, self.bindings))
    }

    /// Return `(Error <form> "<message>")` to the continuation.
    pub fn error(self, message: &str) -> Action {
        let err = Atom::error(self.expr.clone(), message);
        self.ret(err)
    }
}
