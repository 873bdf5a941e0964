mod error;
mod cursor;
mod ast;
mod parser;
mod env;
mod program;
mod codegen;
mod eval;
mod backend;
mod interp;
mod jit;
mod engine;

pub use error::{BackendError, CalcError, GenError, ParseError};
pub use cursor::Cursor;
pub use ast::{Ast, BinOp, Constant, Function};
pub use parser::{parse, Parser, MAX_DEPTH};
pub use env::Environment;
pub use program::{Instr, Program};
pub use codegen::generate;
pub use eval::evaluate;
pub use backend::Backend;
pub use interp::StackMachine;
pub use jit::{CompiledProgram, JitBackend};

pub use engine::Calculator;
