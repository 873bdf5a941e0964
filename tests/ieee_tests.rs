use jitcalc::{Calculator, StackMachine};

#[test]
fn division_by_zero_is_infinite() {
    let mut calc = Calculator::new();
    assert_eq!(calc.eval("1/0").unwrap(), f64::INFINITY);
    // No unary minus: build -1 as 0-1.
    assert_eq!(calc.eval("(0-1)/0").unwrap(), f64::NEG_INFINITY);
}

#[test]
fn zero_over_zero_is_nan() {
    let mut calc = Calculator::new();
    assert!(calc.eval("0/0").unwrap().is_nan());
}

#[test]
fn infinity_propagates() {
    let mut calc = Calculator::new();
    assert_eq!(calc.eval("1/0 + 5").unwrap(), f64::INFINITY);
    assert!(calc.eval("1/0 - 1/0").unwrap().is_nan());
    assert_eq!(calc.eval("1 / (1/0)").unwrap(), 0.0);
}

#[test]
fn stack_machine_matches() {
    let mut calc = Calculator::with_backend(StackMachine::new());
    assert_eq!(calc.eval("1/0").unwrap(), f64::INFINITY);
    assert_eq!(calc.eval("(0-1)/0").unwrap(), f64::NEG_INFINITY);
    assert!(calc.eval("0/0").unwrap().is_nan());
}

#[test]
fn nan_inputs_flow_through() {
    let mut calc = Calculator::new();
    calc.set_var("x", f64::NAN);
    assert!(calc.eval("x * 0 + 1").unwrap().is_nan());
}
