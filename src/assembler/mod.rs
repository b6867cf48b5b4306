//! Two-pass assembler: RV32I/M assembly text in, a flat stream of
//! big-endian 32-bit instruction words out.
//!
//! Pass 1 walks the source once, expanding pseudo-instructions and
//! recording the index of every label *relative to the instructions that
//! actually emit a word*. Label-definition lines and comments consume no
//! index. Pass 2 re-walks the same expanded instruction list and encodes
//! each one, resolving any label operand against the Pass 1 map.

mod encode;
mod line;
mod pseudo;
mod registers;

use crate::error::AssembleError;
use indexmap::IndexMap;
use line::Line;
use pseudo::Lowered;

/// One base instruction ready for Pass 2, with its final (pseudo-expanded)
/// mnemonic and operand tokens.
struct Emit {
    mnemonic: String,
    operands: Vec<String>,
}

/// Runs both passes and returns the assembled program as big-endian words.
pub fn assemble(source: &str) -> Result<Vec<u32>, AssembleError> {
    let (emits, labels) = first_pass(source)?;
    second_pass(&emits, &labels)
}

fn first_pass(source: &str) -> Result<(Vec<Emit>, IndexMap<String, u32>), AssembleError> {
    let mut emits = Vec::new();
    let mut labels = IndexMap::new();

    for raw_line in source.lines() {
        match line::parse_line(raw_line) {
            None => continue,
            Some(Line::Label(name)) => {
                labels.insert(name, emits.len() as u32);
            }
            Some(Line::Instruction { mnemonic, operands }) => {
                match pseudo::expand(&mnemonic, &operands) {
                    Some(result) => {
                        for Lowered { mnemonic, operands } in result? {
                            emits.push(Emit { mnemonic, operands });
                        }
                    }
                    None => emits.push(Emit { mnemonic, operands }),
                }
            }
        }
    }

    Ok((emits, labels))
}

fn second_pass(
    emits: &[Emit],
    labels: &IndexMap<String, u32>,
) -> Result<Vec<u32>, AssembleError> {
    emits
        .iter()
        .enumerate()
        .map(|(index, emit)| encode_one(index as u32, emit, labels))
        .collect()
}

fn reg(operands: &[String], at: usize, mnemonic: &str) -> Result<u8, AssembleError> {
    let name = operands
        .get(at)
        .ok_or_else(|| AssembleError::WrongOperandCount {
            mnemonic: mnemonic.to_string(),
            expected: at + 1,
            found: operands.len(),
        })?;
    registers::register_index(name).ok_or_else(|| AssembleError::UnknownRegister {
        name: name.clone(),
    })
}

fn imm(operands: &[String], at: usize, mnemonic: &str) -> Result<i32, AssembleError> {
    let text = operands
        .get(at)
        .ok_or_else(|| AssembleError::WrongOperandCount {
            mnemonic: mnemonic.to_string(),
            expected: at + 1,
            found: operands.len(),
        })?;
    text.parse::<i32>()
        .map_err(|_| AssembleError::MalformedImmediate { text: text.clone() })
}

fn branch_offset(
    operands: &[String],
    at: usize,
    mnemonic: &str,
    my_index: u32,
    labels: &IndexMap<String, u32>,
) -> Result<i32, AssembleError> {
    let name = operands
        .get(at)
        .ok_or_else(|| AssembleError::WrongOperandCount {
            mnemonic: mnemonic.to_string(),
            expected: at + 1,
            found: operands.len(),
        })?;
    let target = *labels
        .get(name)
        .ok_or_else(|| AssembleError::UndefinedLabel { name: name.clone() })?;
    Ok(4 * (target as i64 - my_index as i64) as i32)
}

fn check_arity(mnemonic: &str, operands: &[String], expected: usize) -> Result<(), AssembleError> {
    if operands.len() != expected {
        return Err(AssembleError::WrongOperandCount {
            mnemonic: mnemonic.to_string(),
            expected,
            found: operands.len(),
        });
    }
    Ok(())
}

fn encode_one(
    index: u32,
    emit: &Emit,
    labels: &IndexMap<String, u32>,
) -> Result<u32, AssembleError> {
    let m = emit.mnemonic.as_str();
    let ops = &emit.operands;

    // R-type arithmetic/RV32M: mnemonic rd, rs1, rs2
    let r = |funct3: u8, funct7: u8| -> Result<u32, AssembleError> {
        check_arity(m, ops, 3)?;
        Ok(encode::r_type(
            0b0110011,
            reg(ops, 0, m)?,
            funct3,
            reg(ops, 1, m)?,
            reg(ops, 2, m)?,
            funct7,
        ))
    };

    // I-type arithmetic immediate: mnemonic rd, rs1, imm
    let i_arith = |funct3: u8| -> Result<u32, AssembleError> {
        check_arity(m, ops, 3)?;
        encode::i_type(0b0010011, reg(ops, 0, m)?, funct3, reg(ops, 1, m)?, imm(ops, 2, m)?)
    };

    // I-type shift immediate: funct7 goes in the top bits of the imm field.
    let shift = |funct3: u8, funct7: u8| -> Result<u32, AssembleError> {
        check_arity(m, ops, 3)?;
        let shamt = imm(ops, 2, m)? & 0x1f;
        let packed = ((funct7 as i32) << 5) | shamt;
        encode::i_type(0b0010011, reg(ops, 0, m)?, funct3, reg(ops, 1, m)?, packed)
    };

    // Load: mnemonic rd, imm, rs1 (after line.rs splits `imm(rs1)`)
    let load = |funct3: u8| -> Result<u32, AssembleError> {
        check_arity(m, ops, 3)?;
        encode::i_type(0b0000011, reg(ops, 0, m)?, funct3, reg(ops, 2, m)?, imm(ops, 1, m)?)
    };

    // Store: mnemonic rs2, imm, rs1
    let store = |funct3: u8| -> Result<u32, AssembleError> {
        check_arity(m, ops, 3)?;
        encode::s_type(0b0100011, reg(ops, 2, m)?, reg(ops, 0, m)?, funct3, imm(ops, 1, m)?)
    };

    // Branch: mnemonic rs1, rs2, label
    let branch = |funct3: u8| -> Result<u32, AssembleError> {
        check_arity(m, ops, 3)?;
        let offset = branch_offset(ops, 2, m, index, labels)?;
        encode::b_type(0b1100011, reg(ops, 0, m)?, reg(ops, 1, m)?, funct3, offset)
    };

    match m {
        "add" => r(0b000, 0b0000000),
        "sub" => r(0b000, 0b0100000),
        "sll" => r(0b001, 0b0000000),
        "slt" => r(0b010, 0b0000000),
        "sltu" => r(0b011, 0b0000000),
        "xor" => r(0b100, 0b0000000),
        "srl" => r(0b101, 0b0000000),
        "sra" => r(0b101, 0b0100000),
        "or" => r(0b110, 0b0000000),
        "and" => r(0b111, 0b0000000),

        "mul" => r(0b000, 0b0000001),
        "mulh" => r(0b001, 0b0000001),
        "mulhsu" => r(0b010, 0b0000001),
        "mulhu" => r(0b011, 0b0000001),
        "div" => r(0b100, 0b0000001),
        "divu" => r(0b101, 0b0000001),
        "rem" => r(0b110, 0b0000001),
        "remu" => r(0b111, 0b0000001),

        "addi" => i_arith(0b000),
        "slti" => i_arith(0b010),
        "sltiu" => i_arith(0b011),
        "xori" => i_arith(0b100),
        "ori" => i_arith(0b110),
        "andi" => i_arith(0b111),

        "slli" => shift(0b001, 0b0000000),
        "srli" => shift(0b101, 0b0000000),
        "srai" => shift(0b101, 0b0100000),

        "lb" => load(0b000),
        "lh" => load(0b001),
        "lw" => load(0b010),
        "lbu" => load(0b100),
        "lhu" => load(0b101),

        "sb" => store(0b000),
        "sh" => store(0b001),
        "sw" => store(0b010),

        "beq" => branch(0b000),
        "bne" => branch(0b001),
        "blt" => branch(0b100),
        "bge" => branch(0b101),
        "bltu" => branch(0b110),
        "bgeu" => branch(0b111),

        "jalr" => {
            check_arity(m, ops, 3)?;
            encode::i_type(0b1100111, reg(ops, 0, m)?, 0b000, reg(ops, 1, m)?, imm(ops, 2, m)?)
        }
        "jal" => {
            check_arity(m, ops, 2)?;
            let offset = branch_offset(ops, 1, m, index, labels)?;
            encode::j_type(0b1101111, reg(ops, 0, m)?, offset)
        }
        "lui" => {
            check_arity(m, ops, 2)?;
            encode::u_type(0b0110111, reg(ops, 0, m)?, imm(ops, 1, m)?)
        }
        "auipc" => {
            check_arity(m, ops, 2)?;
            encode::u_type(0b0010111, reg(ops, 0, m)?, imm(ops, 1, m)?)
        }

        other => Err(AssembleError::UnknownMnemonic {
            mnemonic: other.to_string(),
        }),
    }
}
