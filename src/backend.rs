use crate::error::BackendError;
use crate::program::Program;

/// Turns a generated [`Program`] into a number.
///
/// Implementations may interpret the instructions or compile them; either way
/// the result must match [`evaluate`](crate::evaluate) on the same tree.
pub trait Backend {
    fn name(&self) -> &'static str;

    /// Runs `program` against the inputs captured at generation time.
    fn execute(&mut self, program: &Program) -> Result<f64, BackendError>;
}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn execute(&mut self, program: &Program) -> Result<f64, BackendError> {
        (**self).execute(program)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn execute(&mut self, program: &Program) -> Result<f64, BackendError> {
        (**self).execute(program)
    }
}
