/// Return an arity error atom from a special-form handler unless the form
/// has exactly `$expected` arguments.
macro_rules! require_args {
    ($call:expr, $op:expr, $expected:expr) => {
        if $call.args.len() != $expected {
            let message = format!(
                "{} requires exactly {} argument{}",
                $op,
                $expected,
                if $expected == 1 { "" } else { "s" }
            );
            return $call.error(&message);
        }
    };
}

macro_rules! require_one_arg {
    ($call:expr, $op:expr) => {
        require_args!($call, $op, 1)
    };
}

macro_rules! require_two_args {
    ($call:expr, $op:expr) => {
        require_args!($call, $op, 2)
    };
}

macro_rules! require_three_args {
    ($call:expr, $op:expr) => {
        require_args!($call, $op, 3)
    };
}
