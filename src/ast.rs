use std::collections::HashSet;
use std::fmt;

/// 표현식을 구성하는 AST 노드들.
/// 모든 값은 f64로 표현되며, 각 복합 노드는 자식 노드를 단독으로 소유합니다.
#[derive(Clone, Debug, PartialEq)]
pub enum Ast {
    /// 숫자 리터럴 (예: 1, 3.14)
    Number(f64),
    /// 이름 있는 상수 (pi, e) — 코드 생성 시점에 값으로 치환됩니다.
    Constant(Constant),
    /// 변수 참조 (예: x) — 코드 생성 시점에 환경에서 조회됩니다.
    Variable(String),
    /// 단항 함수 호출 (예: sqrt(x))
    UnaryCall { func: Function, arg: Box<Ast> },
    /// 이항 연산 (a + b, a ^ b, ...)
    BinaryOp { op: BinOp, lhs: Box<Ast>, rhs: Box<Ast> },
}

impl Ast {
    pub fn binary(op: BinOp, lhs: Ast, rhs: Ast) -> Ast {
        Ast::BinaryOp { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn call(func: Function, arg: Ast) -> Ast {
        Ast::UnaryCall { func, arg: Box::new(arg) }
    }

    /// Distinct variable names in left-to-right first-appearance order.
    pub fn variables(&self) -> Vec<&str> {
        fn walk<'a>(node: &'a Ast, seen: &mut HashSet<&'a str>, out: &mut Vec<&'a str>) {
            match node {
                Ast::Number(_) | Ast::Constant(_) => {}
                Ast::Variable(name) => {
                    if seen.insert(name.as_str()) {
                        out.push(name.as_str());
                    }
                }
                Ast::UnaryCall { arg, .. } => walk(arg, seen, out),
                Ast::BinaryOp { lhs, rhs, .. } => {
                    walk(lhs, seen, out);
                    walk(rhs, seen, out);
                }
            }
        }
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        walk(self, &mut seen, &mut out);
        out
    }
}

/// Canonical form: binary nodes fully parenthesized, so the output of any
/// parsed tree parses back to an equal tree.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Number(v) => write!(f, "{}", v),
            Ast::Constant(c) => f.write_str(c.name()),
            Ast::Variable(name) => f.write_str(name),
            Ast::UnaryCall { func, arg } => write!(f, "{}({})", func.name(), arg),
            Ast::BinaryOp { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn from_name(name: &str) -> Option<Constant> {
        match name {
            "pi" => Some(Constant::Pi),
            "e" => Some(Constant::E),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

/// Single-argument transcendental functions. `Log` is the natural logarithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Sqrt,
    Log,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

impl Function {
    pub const ALL: [Function; 8] = [
        Function::Sqrt,
        Function::Log,
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
    ];

    pub fn from_name(name: &str) -> Option<Function> {
        Function::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Sqrt => "sqrt",
            Function::Log => "log",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
        }
    }

    /// Domain errors come back as NaN, never as an error.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Function::Sqrt => x.sqrt(),
            Function::Log => x.ln(),
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Asin => x.asin(),
            Function::Acos => x.acos(),
            Function::Atan => x.atan(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    pub fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
            BinOp::Pow => '^',
        }
    }

    /// Plain IEEE-754 arithmetic; division by zero is not guarded.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinOp::Add => a + b,
            BinOp::Sub => a - b,
            BinOp::Mul => a * b,
            BinOp::Div => a / b,
            BinOp::Pow => a.powf(b),
        }
    }
}
