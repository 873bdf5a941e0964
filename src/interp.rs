use crate::backend::Backend;
use crate::error::BackendError;
use crate::program::{Instr, Program};

/// Interprets a [`Program`] on an operand stack.
#[derive(Clone, Debug, Default)]
pub struct StackMachine {
    stack: Vec<f64>,
}

impl StackMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `program` with explicit slot values instead of the captured inputs.
    pub fn run(&mut self, program: &Program, inputs: &[f64]) -> Result<f64, BackendError> {
        let needed = program.vars().len();
        if inputs.len() < needed {
            return Err(BackendError::ExecFailed(format!(
                "values length mismatch: expected at least {}, got {}",
                needed,
                inputs.len()
            )));
        }

        self.stack.clear();
        for instr in program.code() {
            let v = match instr {
                Instr::LoadConst(v) => *v,
                Instr::LoadVar(name) => {
                    let slot = program.slot_of(name).ok_or_else(|| {
                        BackendError::ExecFailed(format!("unbound variable slot: {}", name))
                    })?;
                    inputs[slot]
                }
                Instr::Add => self.binary(|a, b| a + b)?,
                Instr::Sub => self.binary(|a, b| a - b)?,
                Instr::Mul => self.binary(|a, b| a * b)?,
                Instr::Div => self.binary(|a, b| a / b)?,
                Instr::Pow => self.binary(f64::powf)?,
                Instr::CallUnary(func) => func.apply(self.pop()?),
            };
            self.stack.push(v);
        }

        let out = self.pop()?;
        if !self.stack.is_empty() {
            return Err(BackendError::ExecFailed(format!(
                "{} values left on the stack",
                self.stack.len() + 1
            )));
        }
        Ok(out)
    }

    fn pop(&mut self) -> Result<f64, BackendError> {
        self.stack
            .pop()
            .ok_or_else(|| BackendError::ExecFailed("stack underflow".into()))
    }

    fn binary<F>(&mut self, f: F) -> Result<f64, BackendError>
    where
        F: Fn(f64, f64) -> f64,
    {
        let b = self.pop()?;
        let a = self.pop()?;
        Ok(f(a, b))
    }
}

impl Backend for StackMachine {
    fn name(&self) -> &'static str {
        "stack"
    }

    fn execute(&mut self, program: &Program) -> Result<f64, BackendError> {
        self.run(program, program.inputs())
    }
}
