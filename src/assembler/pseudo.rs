//! Expansion of pseudo-mnemonics into their underlying base instructions.
//!
//! Mirrors the shape of the teacher's `PseudoInstruction::expand`: a
//! mnemonic plus its operand tokens goes in, zero or more base-instruction
//! lines come out. Lines that are already base instructions pass through
//! `mod.rs` untouched and never reach this module.

use crate::error::AssembleError;

/// One lowered instruction, still in textual `(mnemonic, operands)` form so
/// it can be re-tokenized by the normal encode path.
pub struct Lowered {
    pub mnemonic: String,
    pub operands: Vec<String>,
}

impl Lowered {
    fn new(mnemonic: &str, operands: Vec<String>) -> Self {
        Lowered {
            mnemonic: mnemonic.to_string(),
            operands,
        }
    }
}

/// Returns `Some(expansion)` if `mnemonic` is a recognized pseudo-op,
/// `None` if the caller should treat it as a base instruction.
pub fn expand(mnemonic: &str, operands: &[String]) -> Option<Result<Vec<Lowered>, AssembleError>> {
    let arity_err = |want: usize| {
        Err(AssembleError::WrongOperandCount {
            mnemonic: mnemonic.to_string(),
            expected: want,
            found: operands.len(),
        })
    };

    match mnemonic {
        "li" => Some(if operands.len() != 2 {
            arity_err(2)
        } else {
            // li rd, imm  =>  addi rd, zero, imm
            Ok(vec![Lowered::new(
                "addi",
                vec![operands[0].clone(), "zero".to_string(), operands[1].clone()],
            )])
        }),
        "mv" => Some(if operands.len() != 2 {
            arity_err(2)
        } else {
            // mv rd, rs  =>  addi rd, rs, 0
            Ok(vec![Lowered::new(
                "addi",
                vec![operands[0].clone(), operands[1].clone(), "0".to_string()],
            )])
        }),
        "seqz" => Some(if operands.len() != 2 {
            arity_err(2)
        } else {
            // seqz rd, rs  =>  sltiu rd, rs, 1
            // (the real rs, not a hardcoded zero register)
            Ok(vec![Lowered::new(
                "sltiu",
                vec![operands[0].clone(), operands[1].clone(), "1".to_string()],
            )])
        }),
        "snez" => Some(if operands.len() != 2 {
            arity_err(2)
        } else {
            // snez rd, rs  =>  sltu rd, zero, rs
            Ok(vec![Lowered::new(
                "sltu",
                vec![operands[0].clone(), "zero".to_string(), operands[1].clone()],
            )])
        }),
        "ret" => Some(if !operands.is_empty() {
            arity_err(0)
        } else {
            // ret is dropped entirely: it always sits at the very end of
            // `main`'s instruction stream, so there is nothing left to
            // jump back to. Execution simply runs off the end.
            Ok(vec![])
        }),
        "j" => Some(if operands.len() != 1 {
            arity_err(1)
        } else {
            // j label  =>  jal zero, label
            Ok(vec![Lowered::new(
                "jal",
                vec!["zero".to_string(), operands[0].clone()],
            )])
        }),
        "beqz" => Some(if operands.len() != 2 {
            arity_err(2)
        } else {
            // beqz rs, label  =>  beq rs, zero, label
            Ok(vec![Lowered::new(
                "beq",
                vec![operands[0].clone(), "zero".to_string(), operands[1].clone()],
            )])
        }),
        _ => None,
    }
}
