//! Recursive-descent parser: token stream -> list of AST statements.
//!
//! Grammar (top-down):
//!
//! ```text
//! program    ::= stmt*
//! stmt       ::= "return" expr ";"
//!              | "if" "(" expr ")" stmt ("else" stmt)?
//!              | "for" "(" expr? ";" expr? ";" expr? ")" stmt
//!              | "while" "(" expr ")" stmt
//!              | "{" stmt* "}"
//!              | expr ";"
//! expr       ::= assign
//! assign     ::= equality ("=" assign)?            -- right-associative
//! equality   ::= relational (("==" | "!=") relational)*
//! relational ::= add (("<" | "<=" | ">" | ">=") add)*
//! add        ::= mul (("+" | "-") mul)*
//! mul        ::= unary (("*" | "/") unary)*
//! unary      ::= "+" primary | "-" primary | primary
//! primary    ::= ident | number | "(" expr ")"
//! ```

use crate::ast::{BinOp, Node};
use crate::error::ParseError;
use crate::lexer::TokenStream;
use crate::symbol_table::{LabelGen, SymbolTable};

pub struct Parser {
    tokens: TokenStream,
    symbols: SymbolTable,
    labels: LabelGen,
}

impl Parser {
    pub fn new(tokens: TokenStream) -> Self {
        Parser {
            tokens,
            symbols: SymbolTable::new(),
            labels: LabelGen::new(),
        }
    }

    /// Parses the whole token stream into an ordered list of top-level
    /// statements, consuming tokens until `at_eof()`.
    pub fn parse(mut self) -> Result<Vec<Node>, ParseError> {
        let mut program = Vec::new();
        while !self.tokens.at_eof() {
            program.push(self.stmt()?);
        }
        Ok(program)
    }

    /// Like [`parse`](Self::parse), but also returns the frame size (in
    /// bytes) the parsed locals occupy, for the code generator's prologue.
    pub fn parse_program(mut self) -> Result<(Vec<Node>, u32), ParseError> {
        let mut program = Vec::new();
        while !self.tokens.at_eof() {
            program.push(self.stmt()?);
        }
        let tail_offset = self.symbols.tail_offset();
        Ok((program, tail_offset))
    }

    fn stmt(&mut self) -> Result<Node, ParseError> {
        if self.tokens.consume("return") {
            let value = self.expr()?;
            self.tokens.expect(";")?;
            return Ok(Node::Return {
                value: Box::new(value),
            });
        }

        if self.tokens.consume("if") {
            self.tokens.expect("(")?;
            let n = self.labels.reserve_if();
            let cond = self.expr()?;
            self.tokens.expect(")")?;
            let then = self.stmt()?;

            let end_label = LabelGen::end_label(n);
            if self.tokens.consume("else") {
                let els = self.stmt()?;
                return Ok(Node::If {
                    cond: Box::new(cond),
                    then: Box::new(then),
                    els: Some(Box::new(els)),
                    end_label,
                    else_label: Some(LabelGen::else_label(n)),
                });
            }

            return Ok(Node::If {
                cond: Box::new(cond),
                then: Box::new(then),
                els: None,
                end_label,
                else_label: None,
            });
        }

        if self.tokens.consume("for") {
            self.tokens.expect("(")?;
            let (begin_label, end_label) = self.labels.loop_labels();

            let init = if !self.tokens.consume(";") {
                let e = self.expr()?;
                self.tokens.expect(";")?;
                Some(Box::new(e))
            } else {
                None
            };

            let cond = if !self.tokens.consume(";") {
                let e = self.expr()?;
                self.tokens.expect(";")?;
                Some(Box::new(e))
            } else {
                None
            };

            let inc = if !self.tokens.consume(")") {
                let e = self.expr()?;
                self.tokens.expect(")")?;
                Some(Box::new(e))
            } else {
                None
            };

            let then = self.stmt()?;
            return Ok(Node::For {
                init,
                cond,
                inc,
                then: Box::new(then),
                begin_label,
                end_label,
            });
        }

        if self.tokens.consume("while") {
            self.tokens.expect("(")?;
            let (begin_label, end_label) = self.labels.loop_labels();
            let cond = self.expr()?;
            self.tokens.expect(")")?;
            let then = self.stmt()?;
            return Ok(Node::For {
                init: None,
                cond: Some(Box::new(cond)),
                inc: None,
                then: Box::new(then),
                begin_label,
                end_label,
            });
        }

        if self.tokens.consume("{") {
            let mut stmts = Vec::new();
            while !self.tokens.consume("}") {
                stmts.push(self.stmt()?);
            }
            return Ok(Node::Block { stmts });
        }

        let node = self.expr()?;
        self.tokens.expect(";")?;
        Ok(node)
    }

    fn expr(&mut self) -> Result<Node, ParseError> {
        self.assign()
    }

    fn assign(&mut self) -> Result<Node, ParseError> {
        let node = self.equality()?;
        if self.tokens.consume("=") {
            let rhs = self.assign()?;
            return Ok(Node::Assign {
                lhs: Box::new(node),
                rhs: Box::new(rhs),
            });
        }
        Ok(node)
    }

    fn equality(&mut self) -> Result<Node, ParseError> {
        let mut node = self.relational()?;
        loop {
            if self.tokens.consume("==") {
                node = Node::binary(BinOp::Eq, node, self.relational()?);
            } else if self.tokens.consume("!=") {
                node = Node::binary(BinOp::Neq, node, self.relational()?);
            } else {
                break;
            }
        }
        Ok(node)
    }

    fn relational(&mut self) -> Result<Node, ParseError> {
        let mut node = self.add()?;
        loop {
            if self.tokens.consume("<") {
                node = Node::binary(BinOp::Lt, node, self.add()?);
            } else if self.tokens.consume("<=") {
                node = Node::binary(BinOp::Le, node, self.add()?);
            } else if self.tokens.consume(">") {
                // a > b  ==  b < a
                node = Node::binary(BinOp::Lt, self.add()?, node);
            } else if self.tokens.consume(">=") {
                // a >= b  ==  b <= a
                node = Node::binary(BinOp::Le, self.add()?, node);
            } else {
                break;
            }
        }
        Ok(node)
    }

    fn add(&mut self) -> Result<Node, ParseError> {
        let mut node = self.mul()?;
        loop {
            if self.tokens.consume("+") {
                node = Node::binary(BinOp::Add, node, self.mul()?);
            } else if self.tokens.consume("-") {
                node = Node::binary(BinOp::Sub, node, self.mul()?);
            } else {
                break;
            }
        }
        Ok(node)
    }

    fn mul(&mut self) -> Result<Node, ParseError> {
        let mut node = self.unary()?;
        loop {
            if self.tokens.consume("*") {
                node = Node::binary(BinOp::Mul, node, self.unary()?);
            } else if self.tokens.consume("/") {
                node = Node::binary(BinOp::Div, node, self.unary()?);
            } else {
                break;
            }
        }
        Ok(node)
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        if self.tokens.consume("+") {
            return self.primary();
        }
        if self.tokens.consume("-") {
            // -x desugars to 0 - x
            return Ok(Node::binary(BinOp::Sub, Node::Num(0), self.primary()?));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        if let Some(tok) = self.tokens.consume_ident() {
            let offset = self.symbols.offset_of(&tok.lexeme);
            return Ok(Node::LVar { offset });
        }

        if self.tokens.consume("(") {
            let node = self.expr()?;
            self.tokens.expect(")")?;
            return Ok(node);
        }

        Ok(Node::Num(self.tokens.expect_number()?))
    }
}
