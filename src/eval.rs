use crate::ast::Ast;
use crate::env::Environment;
use crate::error::GenError;

/// Evaluates `ast` directly, without producing a program.
///
/// Uses the same `f64` operations as the stack machine and the JIT shims, so
/// all three agree bit for bit.
pub fn evaluate(ast: &Ast, env: &Environment) -> Result<f64, GenError> {
    match ast {
        Ast::Number(v) => Ok(*v),
        Ast::Constant(c) => Ok(c.value()),
        Ast::Variable(name) => env
            .get(name)
            .ok_or_else(|| GenError::UnknownVariable { name: name.clone() }),
        Ast::UnaryCall { func, arg } => Ok(func.apply(evaluate(arg, env)?)),
        Ast::BinaryOp { op, lhs, rhs } => {
            let a = evaluate(lhs, env)?;
            let b = evaluate(rhs, env)?;
            Ok(op.apply(a, b))
        }
    }
}
