//! Space management: creating spaces and adding, removing and listing atoms.

use tracing::debug;

use crate::backend::environment::Environment;
use crate::backend::models::{Atom, Bindings, SpaceHandle};

use super::super::trampoline::{push_frame, Action, Branch, Cont, Frame, SpaceOpKind, SpecialCall};
use super::helpers::not_a_space;

/// (new-space): a fresh, empty space.
pub(crate) fn eval_new_space(call: SpecialCall<'_>) -> Action {
    require_args!(call, "new-space", 0);
    let space = SpaceHandle::new("new-space");
    debug!(target: "mettaspace::backend::eval::space", space = space.id(), "new space");
    call.ret(Atom::space(space))
}

/// (add-atom SPACE ATOM): `ATOM` is stored as written, without evaluation.
pub(crate) fn eval_add_atom(call: SpecialCall<'_>) -> Action {
    require_two_args!(call, "add-atom");
    let atom = call.bindings.apply_to(&call.args[1]);
    eval_space_arg(call, SpaceOpKind::Add, Some(atom))
}

/// (remove-atom SPACE ATOM): removes the first atom equal to `ATOM`.
pub(crate) fn eval_remove_atom(call: SpecialCall<'_>) -> Action {
    require_two_args!(call, "remove-atom");
    let atom = call.bindings.apply_to(&call.args[1]);
    eval_space_arg(call, SpaceOpKind::Remove, Some(atom))
}

/// (get-atoms SPACE): one branch per atom, unevaluated.
pub(crate) fn eval_get_atoms(call: SpecialCall<'_>) -> Action {
    require_one_arg!(call, "get-atoms");
    eval_space_arg(call, SpaceOpKind::GetAtoms, None)
}

fn eval_space_arg(call: SpecialCall<'_>, op: SpaceOpKind, atom: Option<Atom>) -> Action {
    let space_arg = call.bindings.apply_to(&call.args[0]);
    let frame = Frame::SpaceOp {
        op,
        atom,
        expr: call.expr.clone(),
    };
    Action::Push(Branch::eval(
        space_arg,
        call.ctx.clone(),
        push_frame(frame, call.cont),
        call.bindings,
    ))
}

pub(crate) fn resume_space_op(
    env: &Environment,
    op: SpaceOpKind,
    atom: Option<&Atom>,
    expr: &Atom,
    value: Atom,
    next: Cont,
    bindings: Bindings,
) -> Action {
    if value.is_error() {
        return Action::Push(Branch::ret(value, next, bindings));
    }
    let name = match op {
        SpaceOpKind::Add => "add-atom",
        SpaceOpKind::Remove => "remove-atom",
        SpaceOpKind::GetAtoms => "get-atoms",
    };
    let Some(space) = env.resolve_space(&value) else {
        let message = not_a_space(name, &value);
        let err = Atom::error(bindings.apply_to(expr), &message);
        return Action::Push(Branch::ret(err, next, bindings));
    };
    match (op, atom) {
        (SpaceOpKind::Add, Some(atom)) => {
            space.add(bindings.apply_to(atom));
            Action::Push(Branch::ret(Atom::unit(), next, bindings))
        }
        (SpaceOpKind::Remove, Some(atom)) => {
            space.remove(&bindings.apply_to(atom));
            Action::Push(Branch::ret(Atom::unit(), next, bindings))
        }
        (SpaceOpKind::GetAtoms, _) => {
            let snapshot = space.snapshot();
            Action::Fork(Box::new((0..snapshot.len()).map(move |i| {
                Branch::ret(snapshot[i].clone(), next.clone(), bindings.clone())
            })))
        }
        (_, None) => {
            let err = Atom::error(expr.clone(), &format!("{} requires an atom", name));
            Action::Push(Branch::ret(err, next, bindings))
        }
    }
}
