//! Register-name -> 5-bit index mapping for the 32 standard RV32 ABI names,
//! plus the raw `x0`..`x31` forms.
//!
//! The source this assembler's behavior was distilled from mapped `tp` to
//! the 6-bit string `"000100"`, almost certainly a typo for the 5-bit
//! value `00100` (decimal 4) -- every other entry in that table is 5 bits
//! wide. We use the corrected 5-bit value here.

/// Returns the 5-bit register index for an ABI or `xN` register name, or
/// `None` if `name` isn't a recognized register.
pub fn register_index(name: &str) -> Option<u8> {
    let idx = match name {
        "zero" => 0,
        "ra" => 1,
        "sp" => 2,
        "gp" => 3,
        "tp" => 4,
        "t0" => 5,
        "t1" => 6,
        "t2" => 7,
        "fp" | "s0" => 8,
        "s1" => 9,
        "a0" => 10,
        "a1" => 11,
        "a2" => 12,
        "a3" => 13,
        "a4" => 14,
        "a5" => 15,
        "a6" => 16,
        "a7" => 17,
        "s2" => 18,
        "s3" => 19,
        "s4" => 20,
        "s5" => 21,
        "s6" => 22,
        "s7" => 23,
        "s8" => 24,
        "s9" => 25,
        "s10" => 26,
        "s11" => 27,
        "t3" => 28,
        "t4" => 29,
        "t5" => 30,
        "t6" => 31,
        other => {
            if let Some(n) = other.strip_prefix('x') {
                return n.parse::<u8>().ok().filter(|&i| i < 32);
            }
            return None;
        }
    };
    Some(idx)
}
