//! A tiny C-like compiler and RV32I/M assembler toolchain.
//!
//! The pipeline is split into the stages a reader would expect from a
//! textbook compiler: [`lexer`] turns source text into [`token`]s,
//! [`parser`] turns tokens into an [`ast`], [`codegen`] turns the AST into
//! RISC-V assembly text, and [`assembler`] turns assembly text into raw
//! machine code words. Each stage has its own error type in [`error`];
//! nothing here recovers from a bad input, every error is meant to be
//! printed and the process exited.

pub mod ast;
pub mod assembler;
pub mod char_util;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod symbol_table;
pub mod token;

pub use error::{AssembleError, CodegenError, CompileError, LexError, ParseError};

/// Runs the full front-end-to-codegen pipeline and returns the generated
/// assembly text.
pub fn compile(source: &str) -> Result<String, CompileError> {
    let tokens = lexer::tokenize(source)?;
    let stream = lexer::TokenStream::new(tokens);
    let (program, tail_offset) = parser::Parser::new(stream).parse_program()?;
    let asm = codegen::CodeGen::new().generate(&program, tail_offset)?;
    Ok(asm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_smoke_test() {
        let asm = compile("a = 3; b = 5; return a + b * 2;").unwrap();
        assert!(asm.contains("main:"));
        assert!(asm.contains("ret"));
    }

    #[test]
    fn compile_propagates_lex_errors() {
        let err = compile("a = 1 @ 2;").unwrap_err();
        assert!(matches!(err, CompileError::Lex(_)));
    }

    #[test]
    fn compile_propagates_parse_errors() {
        let err = compile("return 1").unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
    }
}
