use jitcalc::Calculator;

#[test]
fn arithmetic_precedence_mul_before_add() {
    // 2 + 3 * 4 = 14 (mul before add)
    let mut calc = Calculator::new();
    assert_eq!(calc.eval("2+3*4").unwrap(), 14.0);
}

#[test]
fn parentheses_override() {
    // (2 + 3) * 4 = 20 (parentheses override)
    let mut calc = Calculator::new();
    assert_eq!(calc.eval("(2+3)*4").unwrap(), 20.0);
}

#[test]
fn left_associativity_sub() {
    // A - B - C = (A - B) - C
    let mut calc = Calculator::new();
    calc.set_var("A", 10.0);
    calc.set_var("B", 2.0);
    calc.set_var("C", 3.0);
    assert_eq!(calc.eval("A - B - C").unwrap(), 5.0);
}

#[test]
fn left_associativity_div() {
    let mut calc = Calculator::new();
    // (8 / 4) / 2 = 1, not 8 / (4 / 2) = 4
    assert_eq!(calc.eval("8 / 4 / 2").unwrap(), 1.0);
}

#[test]
fn call_primary_against_mul() {
    let mut calc = Calculator::new();
    assert_eq!(calc.eval("sqrt(4) + 3 * 4").unwrap(), 14.0); // 2 + (3*4)
    assert_eq!(calc.eval("(sqrt(4) + 3) * 4").unwrap(), 20.0); // (2 + 3) * 4
}

#[test]
fn nested_groups() {
    let mut calc = Calculator::new();
    assert_eq!(calc.eval("((1 + 2) * (3 + 4)) / 7").unwrap(), 3.0);
}
