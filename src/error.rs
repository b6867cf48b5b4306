//! Error types for the compiler pipeline
//!
//! Each stage of the pipeline (lexer, parser, code generator, assembler)
//! has its own error type. All of them are fatal: there is no recovery,
//! and callers are expected to print the `Display` impl and exit non-zero.

use std::fmt;

/// Errors raised while tokenizing source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No tokenizer rule matched at the given source suffix.
    Unrecognized { rest: String },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::Unrecognized { rest } => write!(f, "Failed to tokenize: {rest}"),
        }
    }
}

impl std::error::Error for LexError {}

/// Errors raised while parsing a token stream into an AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `expect(op)` saw a different token.
    Expected { expected: String, found: String },
    /// `expect_number()` saw a non-number token.
    ExpectedNumber { found: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Expected { expected, found } => {
                write!(f, "Expected {expected} but got {found}.")
            }
            ParseError::ExpectedNumber { found } => {
                write!(f, "Expected a number but got {found}.")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while generating assembly from the AST.
///
/// These represent violations of invariants the parser is supposed to
/// guarantee (e.g. the left-hand side of an assignment always being an
/// `LVar`); seeing one means the compiler itself has a bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// `Assign.lhs` was not an `LVar` node.
    AssignTargetNotLVar,
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::AssignTargetNotLVar => {
                write!(f, "left-hand side of assignment is not a variable")
            }
        }
    }
}

impl std::error::Error for CodegenError {}

/// Errors raised while assembling RISC-V assembly text into machine code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    /// Neither a base instruction nor a recognized pseudo-instruction.
    UnknownMnemonic { mnemonic: String },
    /// A pseudo-instruction or base instruction saw the wrong number of
    /// operands.
    WrongOperandCount {
        mnemonic: String,
        expected: usize,
        found: usize,
    },
    /// An operand that should name a register didn't.
    UnknownRegister { name: String },
    /// An operand that should be an integer literal didn't parse as one.
    MalformedImmediate { text: String },
    /// A branch or jump referenced a label that was never defined.
    UndefinedLabel { name: String },
    /// An immediate did not fit in its instruction field's bit width.
    ImmediateOutOfRange { value: i32, bits: u32 },
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssembleError::UnknownMnemonic { mnemonic } => {
                write!(f, "unknown instruction mnemonic `{mnemonic}`")
            }
            AssembleError::WrongOperandCount {
                mnemonic,
                expected,
                found,
            } => write!(
                f,
                "`{mnemonic}` expects {expected} operand(s), found {found}"
            ),
            AssembleError::UnknownRegister { name } => {
                write!(f, "`{name}` is not a register name")
            }
            AssembleError::MalformedImmediate { text } => {
                write!(f, "`{text}` is not a valid immediate")
            }
            AssembleError::UndefinedLabel { name } => {
                write!(f, "label `{name}` is never defined")
            }
            AssembleError::ImmediateOutOfRange { value, bits } => {
                write!(f, "immediate {value} does not fit in {bits} bits")
            }
        }
    }
}

impl std::error::Error for AssembleError {}

/// Top-level error for the `rvcc` binary, unifying all pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    Lex(LexError),
    Parse(ParseError),
    Codegen(CodegenError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(e) => e.fmt(f),
            CompileError::Parse(e) => e.fmt(f),
            CompileError::Codegen(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<LexError> for CompileError {
    fn from(e: LexError) -> Self {
        CompileError::Lex(e)
    }
}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        CompileError::Parse(e)
    }
}

impl From<CodegenError> for CompileError {
    fn from(e: CodegenError) -> Self {
        CompileError::Codegen(e)
    }
}
