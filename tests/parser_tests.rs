use jitcalc::{parse, Ast, BinOp, Constant, Function, ParseError};

fn num(v: f64) -> Ast {
    Ast::Number(v)
}

fn var(name: &str) -> Ast {
    Ast::Variable(name.to_string())
}

#[test]
fn sub_is_left_associative() -> Result<(), ParseError> {
    // 1 - 2 - 3 = (1 - 2) - 3
    let ast = parse("1 - 2 - 3")?;
    let expected = Ast::binary(BinOp::Sub, Ast::binary(BinOp::Sub, num(1.0), num(2.0)), num(3.0));
    assert_eq!(ast, expected);
    Ok(())
}

#[test]
fn div_is_left_associative() -> Result<(), ParseError> {
    let ast = parse("8 / 4 / 2")?;
    let expected = Ast::binary(BinOp::Div, Ast::binary(BinOp::Div, num(8.0), num(4.0)), num(2.0));
    assert_eq!(ast, expected);
    Ok(())
}

#[test]
fn pow_is_right_associative() -> Result<(), ParseError> {
    // 2^3^2 = 2^(3^2)
    let ast = parse("2^3^2")?;
    let expected = Ast::binary(BinOp::Pow, num(2.0), Ast::binary(BinOp::Pow, num(3.0), num(2.0)));
    assert_eq!(ast, expected);
    Ok(())
}

#[test]
fn pow_binds_tighter_than_mul() -> Result<(), ParseError> {
    let ast = parse("2 * 3 ^ 2")?;
    let expected = Ast::binary(BinOp::Mul, num(2.0), Ast::binary(BinOp::Pow, num(3.0), num(2.0)));
    assert_eq!(ast, expected);
    Ok(())
}

#[test]
fn call_binds_tighter_than_pow() -> Result<(), ParseError> {
    let ast = parse("sqrt(x)^2")?;
    let expected = Ast::binary(BinOp::Pow, Ast::call(Function::Sqrt, var("x")), num(2.0));
    assert_eq!(ast, expected);
    Ok(())
}

#[test]
fn parens_regroup() -> Result<(), ParseError> {
    let ast = parse("(1 + 2) * 3")?;
    let expected = Ast::binary(BinOp::Mul, Ast::binary(BinOp::Add, num(1.0), num(2.0)), num(3.0));
    assert_eq!(ast, expected);
    Ok(())
}

#[test]
fn identifiers_match_whole_words() -> Result<(), ParseError> {
    assert_eq!(parse("pi")?, Ast::Constant(Constant::Pi));
    assert_eq!(parse("e")?, Ast::Constant(Constant::E));
    // Longer runs that merely start with a known name are variables.
    assert_eq!(parse("exp")?, var("exp"));
    assert_eq!(parse("pie")?, var("pie"));
    assert_eq!(parse("sqrtx")?, var("sqrtx"));
    Ok(())
}

#[test]
fn every_function_name_parses() -> Result<(), ParseError> {
    for func in Function::ALL {
        let src = format!("{}(1)", func.name());
        assert_eq!(parse(&src)?, Ast::call(func, num(1.0)), "{}", src);
    }
    Ok(())
}

#[test]
fn whitespace_is_skipped_between_tokens() -> Result<(), ParseError> {
    let ast = parse(" \t1 +\n  sqrt ( 4 )\r\n")?;
    let expected = Ast::binary(BinOp::Add, num(1.0), Ast::call(Function::Sqrt, num(4.0)));
    assert_eq!(ast, expected);
    Ok(())
}

#[test]
fn number_literals() -> Result<(), ParseError> {
    assert_eq!(parse("42")?, num(42.0));
    assert_eq!(parse("3.25")?, num(3.25));
    assert_eq!(parse("10.")?, num(10.0));
    assert_eq!(parse("007")?, num(7.0));
    Ok(())
}

#[test]
fn canonical_display() -> Result<(), ParseError> {
    assert_eq!(parse("1+2*x")?.to_string(), "(1 + (2 * x))");
    assert_eq!(parse("sqrt(2.5)^pi")?.to_string(), "(sqrt(2.5) ^ pi)");
    assert_eq!(parse("((e))")?.to_string(), "e");
    Ok(())
}

#[test]
fn variables_in_first_appearance_order() -> Result<(), ParseError> {
    let ast = parse("x + y * x + sin(z) + y")?;
    assert_eq!(ast.variables(), vec!["x", "y", "z"]);
    assert!(parse("pi * 2")?.variables().is_empty());
    Ok(())
}

#[test]
fn overflowing_literal_is_invalid_number() {
    let digits = "9".repeat(400);
    assert_eq!(
        parse(&digits).unwrap_err(),
        ParseError::InvalidNumber { text: digits.clone(), position: 0 }
    );
    assert_eq!(
        parse(&format!("2 * {}", digits)).unwrap_err(),
        ParseError::InvalidNumber { text: digits, position: 4 }
    );
}
