use crate::ast::{BinOp, Function};
use std::fmt;

/// One step of a stack program. Every instruction pops its operands and
/// pushes exactly one `f64`.
#[derive(Clone, Debug, PartialEq)]
pub enum Instr {
    LoadConst(f64),
    LoadVar(String),
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    CallUnary(Function),
}

impl From<BinOp> for Instr {
    fn from(op: BinOp) -> Self {
        match op {
            BinOp::Add => Instr::Add,
            BinOp::Sub => Instr::Sub,
            BinOp::Mul => Instr::Mul,
            BinOp::Div => Instr::Div,
            BinOp::Pow => Instr::Pow,
        }
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::LoadConst(v) => write!(f, "load_const {:?}", v),
            Instr::LoadVar(name) => write!(f, "load_var {}", name),
            Instr::Add => f.write_str("add"),
            Instr::Sub => f.write_str("sub"),
            Instr::Mul => f.write_str("mul"),
            Instr::Div => f.write_str("div"),
            Instr::Pow => f.write_str("pow"),
            Instr::CallUnary(func) => write!(f, "call {}", func.name()),
        }
    }
}

/// Generator output handed to a [`Backend`](crate::Backend).
///
/// `vars` lists the variable slots in first-appearance order and `inputs`
/// holds the values they were bound to when the program was generated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub(crate) code: Vec<Instr>,
    pub(crate) vars: Vec<String>,
    pub(crate) inputs: Vec<f64>,
}

impl Program {
    /// Builds a program by hand. `inputs` must line up with `vars`.
    pub fn new(code: Vec<Instr>, vars: Vec<String>, inputs: Vec<f64>) -> Self {
        Self { code, vars, inputs }
    }

    pub fn code(&self) -> &[Instr] {
        &self.code
    }

    pub fn vars(&self) -> &[String] {
        &self.vars
    }

    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.vars.iter().position(|v| v == name)
    }

    /// Deepest stack the program reaches, or `None` if it would underflow.
    pub fn max_stack_depth(&self) -> Option<usize> {
        let mut depth = 0usize;
        let mut max = 0usize;
        for instr in &self.code {
            match instr {
                Instr::LoadConst(_) | Instr::LoadVar(_) => depth += 1,
                Instr::CallUnary(_) => {
                    if depth < 1 {
                        return None;
                    }
                }
                Instr::Add | Instr::Sub | Instr::Mul | Instr::Div | Instr::Pow => {
                    if depth < 2 {
                        return None;
                    }
                    depth -= 1;
                }
            }
            max = max.max(depth);
        }
        Some(max)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (slot, (name, value)) in self.vars.iter().zip(&self.inputs).enumerate() {
            writeln!(f, "; slot {} = {} ({:?})", slot, name, value)?;
        }
        for (i, instr) in self.code.iter().enumerate() {
            writeln!(f, "{:4}: {}", i, instr)?;
        }
        Ok(())
    }
}
