use thiserror::Error;

/// Errors produced while turning source text into an [`Ast`](crate::Ast).
///
/// Positions are byte offsets into the input.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },
    #[error("unexpected end of input at position {position}")]
    UnexpectedEnd { position: usize },
    #[error("unmatched '(' opened at position {open}: expected ')' at position {position}")]
    UnmatchedParen { open: usize, position: usize },
    #[error("trailing input '{found}' at position {position}")]
    TrailingInput { found: char, position: usize },
    #[error("unknown function or constant '{name}' at position {position}")]
    UnknownFunctionOrConstant { name: String, position: usize },
    #[error("expression nests deeper than {limit} levels at position {position}")]
    TooDeep { limit: usize, position: usize },
    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: usize },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenError {
    #[error("unknown variable: {name}")]
    UnknownVariable { name: String },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum BackendError {
    #[error("compile failed: {0}")]
    CompileFailed(String),
    #[error("execution failed: {0}")]
    ExecFailed(String),
}

/// Any failure of the parse, generate, execute pipeline.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("generation error: {0}")]
    Gen(#[from] GenError),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}
