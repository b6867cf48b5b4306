//! AST -> RISC-V assembly text.
//!
//! The generator is a stack virtual machine over the real RISC-V stack,
//! with one strict invariant: evaluating any expression node pushes
//! exactly one 16-byte-aligned slot containing the 32-bit result at
//! `0(sp)` and decrements `sp` by 16 (only the low word is meaningful;
//! the oversized slot is a deliberate alignment choice). Evaluating a
//! statement node leaves the stack as it found it.
//!
//! Control-flow statements (`If`/`For`/`Block`) and `Return` are
//! self-balancing: they never leave a residual pushed slot, so nesting
//! them doesn't require a caller-side cleanup pop. A bare expression used
//! in statement position (`expr;`) does leave one, so whichever driver
//! calls it -- `Block`'s loop or the top-level program driver -- cleans
//! it up itself.

use std::fmt::Write as _;

use crate::ast::{BinOp, Node};
use crate::error::CodegenError;

/// Frame size granularity; the evaluation stack uses 16-byte slots even
/// though only the low 4 bytes of each slot are meaningful.
const SLOT: u32 = 16;

pub struct CodeGen {
    out: String,
}

impl CodeGen {
    pub fn new() -> Self {
        CodeGen { out: String::new() }
    }

    fn emit(&mut self, line: impl AsRef<str>) {
        let _ = writeln!(self.out, "    {}", line.as_ref());
    }

    fn label(&mut self, name: &str) {
        let _ = writeln!(self.out, "{name}:");
    }

    fn push_t0(&mut self) {
        self.emit("addi sp, sp, -16");
        self.emit("sw t0, 0(sp)");
    }

    /// rhs -> t0, lhs -> t1.
    fn pop_two(&mut self) {
        self.emit("lw t0, 0(sp)");
        self.emit("lw t1, 16(sp)");
        self.emit("addi sp, sp, 32");
    }

    fn addr_of(&mut self, offset: u32) {
        self.emit(format!("addi t0, fp, -{offset}"));
        self.push_t0();
    }

    /// Generates the compiler's fixed prologue: `main:`, the 64 KiB frame
    /// setup, and the locals allocation (rounded up to 16 bytes, at least
    /// 16 bytes even with no locals).
    fn prologue(&mut self, tail_offset: u32) {
        self.label("main");
        self.emit("lui t0, 16");
        self.emit("add sp, sp, t0");
        self.emit("add fp, fp, t0");

        let locals = round_up_16(tail_offset).max(SLOT);
        self.emit(format!("addi sp, sp, -{locals}"));
    }

    /// Generates the full program: prologue, then each top-level
    /// statement via the top-level driver.
    pub fn generate(mut self, program: &[Node], tail_offset: u32) -> Result<String, CodegenError> {
        self.prologue(tail_offset);
        for node in program {
            self.gen_top_level(node)?;
        }
        Ok(self.out)
    }

    /// Top-level statements differ from `Block`'s inner statements only in
    /// what happens to a bare expression-statement's leftover value: it is
    /// loaded into `a0` (becoming the program's implicit return value) and
    /// discarded, rather than just discarded.
    fn gen_top_level(&mut self, node: &Node) -> Result<(), CodegenError> {
        if is_expr_stmt(node) {
            self.gen_expr(node)?;
            self.emit("lw a0, 0(sp)");
            self.emit("addi sp, sp, 16");
            Ok(())
        } else {
            self.gen_stmt(node)
        }
    }

    fn gen_stmt(&mut self, node: &Node) -> Result<(), CodegenError> {
        match node {
            Node::Return { value } => {
                self.gen_expr(value)?;
                self.emit("lw a0, 0(sp)");
                self.emit("addi sp, sp, 16");
                self.emit("mv sp, fp");
                self.emit("lw fp, 0(sp)");
                self.emit("addi sp, sp, 16");
                self.emit("ret");
                Ok(())
            }

            Node::If {
                cond,
                then,
                els,
                end_label,
                else_label,
            } => {
                self.gen_expr(cond)?;
                self.emit("lw t0, 0(sp)");
                self.emit("addi sp, sp, 16");

                match (els, else_label) {
                    (Some(els), Some(else_label)) => {
                        self.emit(format!("beqz t0, {else_label}"));
                        self.gen_stmt(then)?;
                        self.emit(format!("j {end_label}"));
                        self.label(else_label);
                        self.gen_stmt(els)?;
                        self.label(end_label);
                    }
                    _ => {
                        self.emit(format!("beqz t0, {end_label}"));
                        self.gen_stmt(then)?;
                        self.label(end_label);
                    }
                }
                Ok(())
            }

            Node::For {
                init,
                cond,
                inc,
                then,
                begin_label,
                end_label,
            } => {
                if let Some(init) = init {
                    self.gen_expr(init)?;
                    self.emit("addi sp, sp, 16");
                }

                self.label(begin_label);

                if let Some(cond) = cond {
                    self.gen_expr(cond)?;
                    self.emit("lw t0, 0(sp)");
                    self.emit("addi sp, sp, 16");
                    self.emit(format!("beqz t0, {end_label}"));
                }

                self.gen_stmt(then)?;

                if let Some(inc) = inc {
                    self.gen_expr(inc)?;
                    self.emit("addi sp, sp, 16");
                }

                self.emit(format!("j {begin_label}"));
                self.label(end_label);
                Ok(())
            }

            Node::Block { stmts } => {
                for stmt in stmts {
                    self.gen_stmt(stmt)?;
                }
                Ok(())
            }

            // A bare expression used in statement position: evaluate it,
            // then discard the one slot it left behind.
            _ => {
                self.gen_expr(node)?;
                self.emit("lw t0, 0(sp)");
                self.emit("addi sp, sp, 16");
                Ok(())
            }
        }
    }

    fn gen_expr(&mut self, node: &Node) -> Result<(), CodegenError> {
        match node {
            Node::Num(val) => {
                self.emit(format!("li t0, {val}"));
                self.push_t0();
                Ok(())
            }

            Node::LVar { offset } => {
                self.addr_of(*offset);
                self.emit("lw t0, 0(sp)");
                self.emit("lw t0, 0(t0)");
                self.emit("sw t0, 0(sp)");
                Ok(())
            }

            Node::Assign { lhs, rhs } => {
                let offset = match lhs.as_ref() {
                    Node::LVar { offset } => *offset,
                    _ => return Err(CodegenError::AssignTargetNotLVar),
                };
                self.addr_of(offset);
                self.gen_expr(rhs)?;
                self.pop_two();
                self.emit("sw t0, 0(t1)");
                self.push_t0();
                Ok(())
            }

            Node::Binary { op, lhs, rhs } => {
                self.gen_expr(lhs)?;
                self.gen_expr(rhs)?;
                self.pop_two();

                match op {
                    BinOp::Add => self.emit("add t0, t1, t0"),
                    BinOp::Sub => self.emit("sub t0, t1, t0"),
                    BinOp::Mul => self.emit("mul t0, t1, t0"),
                    BinOp::Div => self.emit("div t0, t1, t0"),
                    BinOp::Eq => {
                        self.emit("xor t0, t1, t0");
                        self.emit("seqz t0, t0");
                    }
                    BinOp::Neq => {
                        self.emit("xor t0, t1, t0");
                        self.emit("snez t0, t0");
                    }
                    BinOp::Lt => self.emit("slt t0, t1, t0"),
                    BinOp::Le => {
                        self.emit("slt t2, t1, t0");
                        self.emit("xor t3, t1, t0");
                        self.emit("seqz t3, t3");
                        self.emit("or t0, t2, t3");
                    }
                }
                self.push_t0();
                Ok(())
            }

            // Statement-only kinds never appear where an expression is expected.
            Node::Return { .. } | Node::If { .. } | Node::For { .. } | Node::Block { .. } => {
                unreachable!("statement node in expression position")
            }
        }
    }
}

impl Default for CodeGen {
    fn default() -> Self {
        Self::new()
    }
}

fn is_expr_stmt(node: &Node) -> bool {
    matches!(
        node,
        Node::Num(_) | Node::LVar { .. } | Node::Binary { .. } | Node::Assign { .. }
    )
}

fn round_up_16(n: u32) -> u32 {
    (n + 15) / 16 * 16
}
