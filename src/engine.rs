use crate::backend::Backend;
use crate::codegen::generate;
use crate::env::Environment;
use crate::error::CalcError;
use crate::jit::JitBackend;
use crate::parser::parse;
use crate::program::Program;

/// Runs the parse, generate, execute pipeline against an owned environment.
///
/// ```
/// use jitcalc::Calculator;
/// # fn main() -> Result<(), jitcalc::CalcError> {
/// let mut calc = Calculator::new();
/// calc.set_var("r", 2.0);
/// let area = calc.eval("pi * r ^ 2")?;
/// assert!((area - 4.0 * std::f64::consts::PI).abs() < 1e-12);
/// # Ok(()) }
/// ```
pub struct Calculator<B = JitBackend> {
    env: Environment,
    backend: B,
}

impl Default for Calculator<JitBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator<JitBackend> {
    pub fn new() -> Self {
        Self::with_backend(JitBackend::new())
    }
}

impl<B: Backend> Calculator<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { env: Environment::new(), backend }
    }

    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn set_var(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.env.set(name, value)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Parses and generates without executing.
    pub fn compile(&self, expr: &str) -> Result<Program, CalcError> {
        let ast = parse(expr)?;
        Ok(generate(&ast, &self.env)?)
    }

    pub fn eval(&mut self, expr: &str) -> Result<f64, CalcError> {
        let program = self.compile(expr)?;
        Ok(self.backend.execute(&program)?)
    }
}
