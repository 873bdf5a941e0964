use jitcalc::{parse, Ast, BinOp, Constant, Function};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const OPS: [BinOp; 5] = [BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div, BinOp::Pow];
const NAMES: [&str; 4] = ["x", "y", "alpha", "theta"];

fn leaf(rng: &mut StdRng) -> Ast {
    match rng.gen_range(0..4) {
        0 => Ast::Number(rng.gen_range(0..1000) as f64),
        1 => Ast::Number(rng.gen_range(0..100_000) as f64 / 100.0),
        2 => Ast::Constant(if rng.gen_bool(0.5) { Constant::Pi } else { Constant::E }),
        _ => Ast::Variable(NAMES[rng.gen_range(0..NAMES.len())].to_string()),
    }
}

fn random_ast(rng: &mut StdRng, depth: u32) -> Ast {
    if depth == 0 || rng.gen_bool(0.25) {
        return leaf(rng);
    }
    if rng.gen_bool(0.3) {
        let func = Function::ALL[rng.gen_range(0..Function::ALL.len())];
        Ast::call(func, random_ast(rng, depth - 1))
    } else {
        let op = OPS[rng.gen_range(0..OPS.len())];
        Ast::binary(op, random_ast(rng, depth - 1), random_ast(rng, depth - 1))
    }
}

#[test]
fn canonical_form_reparses_to_same_tree() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let ast = random_ast(&mut rng, 6);
        let src = ast.to_string();
        let reparsed = parse(&src).unwrap_or_else(|e| panic!("{}: {}", src, e));
        assert_eq!(reparsed, ast, "{}", src);
        assert_eq!(reparsed.to_string(), src);
    }
}

#[test]
fn reparsing_is_stable_under_extra_whitespace() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let ast = random_ast(&mut rng, 5);
        let spaced: String = ast
            .to_string()
            .chars()
            .flat_map(|c| match c {
                '(' | ')' => vec![' ', c, ' '],
                _ => vec![c],
            })
            .collect();
        assert_eq!(parse(&spaced).unwrap(), ast, "{}", spaced);
    }
}
