use crate::ast::{Ast, BinOp, Constant, Function};
use crate::cursor::Cursor;
use crate::error::ParseError;
use log::trace;

/// Parses a complete expression. Trailing characters are an error.
pub fn parse(input: &str) -> Result<Ast, ParseError> {
    Parser::new(input).parse()
}

/// Deepest nesting accepted, counting both parser recursion (groups, calls,
/// `^` chains) and the height of the tree being built. Every later pass walks
/// the tree recursively, so this bound keeps them off the end of the stack.
pub const MAX_DEPTH: usize = 256;

/// A subtree and its height.
type Parsed = (Ast, usize);

pub struct Parser<'a> {
    cur: Cursor<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { cur: Cursor::new(input), depth: 0 }
    }

    pub fn parse(mut self) -> Result<Ast, ParseError> {
        let (expr, _) = self.expression()?;
        self.cur.skip_whitespace();
        if let Some(found) = self.cur.peek() {
            return Err(ParseError::TrailingInput { found, position: self.cur.pos() });
        }
        trace!("parsed {}", expr);
        Ok(expr)
    }

    /// Skips whitespace and returns the next significant character.
    fn look(&mut self) -> Option<char> {
        self.cur.skip_whitespace();
        self.cur.peek()
    }

    fn enter(&mut self, position: usize) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep { limit: MAX_DEPTH, position });
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn join(op: BinOp, lhs: Parsed, rhs: Parsed, position: usize) -> Result<Parsed, ParseError> {
        let height = lhs.1.max(rhs.1) + 1;
        if height > MAX_DEPTH {
            return Err(ParseError::TooDeep { limit: MAX_DEPTH, position });
        }
        Ok((Ast::binary(op, lhs.0, rhs.0), height))
    }

    fn expression(&mut self) -> Result<Parsed, ParseError> {
        let mut node = self.term()?;
        loop {
            let op = match self.look() {
                Some('+') => BinOp::Add,
                Some('-') => BinOp::Sub,
                _ => break,
            };
            let position = self.cur.pos();
            self.cur.advance();
            let rhs = self.term()?;
            node = Self::join(op, node, rhs, position)?;
        }
        Ok(node)
    }

    fn term(&mut self) -> Result<Parsed, ParseError> {
        let mut node = self.power()?;
        loop {
            let op = match self.look() {
                Some('*') => BinOp::Mul,
                Some('/') => BinOp::Div,
                _ => break,
            };
            let position = self.cur.pos();
            self.cur.advance();
            let rhs = self.power()?;
            node = Self::join(op, node, rhs, position)?;
        }
        Ok(node)
    }

    // Right operand recurses into `power`, which makes `^` right-associative.
    fn power(&mut self) -> Result<Parsed, ParseError> {
        let base = self.factor()?;
        if self.look() == Some('^') {
            let position = self.cur.pos();
            self.cur.advance();
            self.enter(position)?;
            let exp = self.power();
            self.leave();
            return Self::join(BinOp::Pow, base, exp?, position);
        }
        Ok(base)
    }

    fn factor(&mut self) -> Result<Parsed, ParseError> {
        match self.look() {
            None => Err(ParseError::UnexpectedEnd { position: self.cur.pos() }),
            Some(c) if c.is_ascii_digit() => Ok((self.number()?, 1)),
            Some('(') => self.paren(),
            Some(c) if c.is_ascii_alphabetic() => self.ident_form(),
            Some(found) => Err(ParseError::UnexpectedChar { found, position: self.cur.pos() }),
        }
    }

    fn number(&mut self) -> Result<Ast, ParseError> {
        let position = self.cur.pos();
        let mut seen_dot = false;
        let text = self.cur.eat_while(|c| {
            if c.is_ascii_digit() {
                true
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                true
            } else {
                false
            }
        });
        // A run too long for f64 would become `inf`, which has no literal form.
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Ast::Number(v)),
            _ => Err(ParseError::InvalidNumber { text: text.to_string(), position }),
        }
    }

    fn paren(&mut self) -> Result<Parsed, ParseError> {
        let open = self.cur.pos();
        self.cur.advance();
        self.enter(open)?;
        let inner = self.expression();
        self.leave();
        let inner = inner?;
        if self.look() == Some(')') {
            self.cur.advance();
            Ok(inner)
        } else {
            Err(ParseError::UnmatchedParen { open, position: self.cur.pos() })
        }
    }

    fn ident_form(&mut self) -> Result<Parsed, ParseError> {
        let position = self.cur.pos();
        let name = self.cur.eat_while(|c| c.is_ascii_alphabetic());

        if let Some(func) = Function::from_name(name) {
            return match self.look() {
                Some('(') => {
                    let (arg, height) = self.paren()?;
                    if height + 1 > MAX_DEPTH {
                        return Err(ParseError::TooDeep { limit: MAX_DEPTH, position });
                    }
                    Ok((Ast::call(func, arg), height + 1))
                }
                Some(found) => Err(ParseError::UnexpectedChar { found, position: self.cur.pos() }),
                None => Err(ParseError::UnexpectedEnd { position: self.cur.pos() }),
            };
        }
        if self.look() == Some('(') {
            return Err(ParseError::UnknownFunctionOrConstant { name: name.to_string(), position });
        }
        match Constant::from_name(name) {
            Some(c) => Ok((Ast::Constant(c), 1)),
            None => Ok((Ast::Variable(name.to_string()), 1)),
        }
    }
}
