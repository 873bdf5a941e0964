use crate::ast::Ast;
use crate::env::Environment;
use crate::error::GenError;
use crate::program::{Instr, Program};
use log::debug;

/// Lowers `ast` to a stack program in post-order.
///
/// Variables are resolved against `env` up front, in first-appearance order,
/// so the first unbound name is the one reported. Constants are substituted
/// here and never reach the backend by name.
pub fn generate(ast: &Ast, env: &Environment) -> Result<Program, GenError> {
    let mut vars = Vec::new();
    let mut inputs = Vec::new();
    for name in ast.variables() {
        let value = env
            .get(name)
            .ok_or_else(|| GenError::UnknownVariable { name: name.to_string() })?;
        vars.push(name.to_string());
        inputs.push(value);
    }

    let mut code = Vec::new();
    emit(ast, &mut code);

    let program = Program { code, vars, inputs };
    debug!("generated program\n{}", program);
    Ok(program)
}

fn emit(ast: &Ast, code: &mut Vec<Instr>) {
    match ast {
        Ast::Number(v) => code.push(Instr::LoadConst(*v)),
        Ast::Constant(c) => code.push(Instr::LoadConst(c.value())),
        Ast::Variable(name) => code.push(Instr::LoadVar(name.clone())),
        Ast::UnaryCall { func, arg } => {
            emit(arg, code);
            code.push(Instr::CallUnary(*func));
        }
        Ast::BinaryOp { op, lhs, rhs } => {
            emit(lhs, code);
            emit(rhs, code);
            code.push(Instr::from(*op));
        }
    }
}
