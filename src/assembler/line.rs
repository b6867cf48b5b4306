//! Splits one line of assembly text into a label definition, an
//! instruction (mnemonic + operands), or nothing (blank/comment-only).

/// A line after stripping comments and whitespace.
pub enum Line {
    /// `name:` on its own.
    Label(String),
    /// `mnemonic op, op, ...`. Memory operands of the form `imm(reg)` are
    /// split into two operands, `imm` then `reg`, in their original order.
    Instruction { mnemonic: String, operands: Vec<String> },
}

/// Parses one source line. Returns `None` for blank or comment-only lines.
pub fn parse_line(raw: &str) -> Option<Line> {
    let without_comment = match raw.find('#') {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    let trimmed = without_comment.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(name) = trimmed.strip_suffix(':') {
        return Some(Line::Label(name.trim().to_string()));
    }

    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let mnemonic = parts.next().unwrap().to_string();
    let rest = parts.next().unwrap_or("").trim();

    let operands = rest
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .flat_map(split_memory_operand)
        .collect();

    Some(Line::Instruction { mnemonic, operands })
}

/// Splits `imm(reg)` into `["imm", "reg"]`; passes any other token through
/// unchanged as a single-element iterator.
fn split_memory_operand(token: &str) -> Vec<String> {
    if let Some(open) = token.find('(') {
        if let Some(close) = token.rfind(')') {
            if close > open {
                let imm = token[..open].trim();
                let reg = token[open + 1..close].trim();
                let imm = if imm.is_empty() { "0" } else { imm };
                return vec![imm.to_string(), reg.to_string()];
            }
        }
    }
    vec![token.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instruction(raw: &str) -> (String, Vec<String>) {
        match parse_line(raw).unwrap() {
            Line::Instruction { mnemonic, operands } => (mnemonic, operands),
            Line::Label(_) => panic!("expected instruction, got label"),
        }
    }

    #[test]
    fn blank_and_comment_only_lines_are_none() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
        assert!(parse_line("# just a comment").is_none());
    }

    #[test]
    fn label_definition_is_recognized() {
        match parse_line("main:").unwrap() {
            Line::Label(name) => assert_eq!(name, "main"),
            _ => panic!("expected label"),
        }
    }

    #[test]
    fn label_with_trailing_comment() {
        match parse_line(".Lend000:  # loop exit").unwrap() {
            Line::Label(name) => assert_eq!(name, ".Lend000"),
            _ => panic!("expected label"),
        }
    }

    #[test]
    fn simple_r_type_operands_split_on_comma() {
        let (mnemonic, operands) = instruction("add a0, a1, a2");
        assert_eq!(mnemonic, "add");
        assert_eq!(operands, vec!["a0", "a1", "a2"]);
    }

    #[test]
    fn memory_operand_splits_into_imm_then_reg() {
        let (mnemonic, operands) = instruction("sw t0, 0(sp)");
        assert_eq!(mnemonic, "sw");
        assert_eq!(operands, vec!["t0", "0", "sp"]);
    }

    #[test]
    fn memory_operand_with_negative_offset() {
        let (_, operands) = instruction("lw t1, -4(fp)");
        assert_eq!(operands, vec!["t1", "-4", "fp"]);
    }

    #[test]
    fn memory_operand_with_no_explicit_offset_defaults_to_zero() {
        let (_, operands) = instruction("lw t0, (sp)");
        assert_eq!(operands, vec!["t0", "0", "sp"]);
    }

    #[test]
    fn no_operand_instruction_has_empty_list() {
        let (mnemonic, operands) = instruction("ret");
        assert_eq!(mnemonic, "ret");
        assert!(operands.is_empty());
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        let (mnemonic, operands) = instruction("  addi   sp,   sp,   -16   ");
        assert_eq!(mnemonic, "addi");
        assert_eq!(operands, vec!["sp", "sp", "-16"]);
    }
}
