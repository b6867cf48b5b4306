//! Append-only ordered map from local-variable name to frame offset.

use indexmap::IndexMap;

/// The n-th unique identifier encountered gets offset `4 * n` (1-indexed,
/// so the first variable lives at offset 4). Entries are never removed or
/// reordered, so a variable's offset is stable for the whole translation
/// unit.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    offsets: IndexMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            offsets: IndexMap::new(),
        }
    }

    /// Looks up `name`, inserting it with the next monotonic offset if it
    /// has not been seen before. Returns the (old or new) offset.
    pub fn offset_of(&mut self, name: &str) -> u32 {
        if let Some(&offset) = self.offsets.get(name) {
            return offset;
        }
        let offset = (self.offsets.len() as u32 + 1) * 4;
        self.offsets.insert(name.to_string(), offset);
        offset
    }

    /// The byte offset one past the last assigned local, i.e. the size in
    /// bytes the locals currently occupy.
    pub fn tail_offset(&self) -> u32 {
        self.offsets.values().copied().max().unwrap_or(0)
    }
}

/// Mints globally unique, monotonically increasing label names of the
/// form `.Lend###`, `.Lelse###`, `.Lbegin###`, 3-digit zero-padded.
#[derive(Debug, Default, Clone)]
pub struct LabelGen {
    counter: u32,
}

impl LabelGen {
    pub fn new() -> Self {
        LabelGen { counter: 0 }
    }

    /// Reserves the counter value an `if` uses for both its `.Lend{n}` and,
    /// if present, `.Lelse{n}` label. The value is captured once, up front,
    /// so nested statements parsed in between (inside `then`) that mint
    /// their own labels can never shift it.
    pub fn reserve_if(&mut self) -> u32 {
        let n = self.counter;
        self.counter += 1;
        n
    }

    pub fn end_label(n: u32) -> String {
        format!(".Lend{n:03}")
    }

    pub fn else_label(n: u32) -> String {
        format!(".Lelse{n:03}")
    }

    /// Allocates `.Lbegin{n}` and `.Lend{n}` together for a `for`/`while`
    /// loop, using the same counter value for both (advances by 2).
    pub fn loop_labels(&mut self) -> (String, String) {
        let n = self.counter;
        self.counter += 2;
        (format!(".Lbegin{n:03}"), format!(".Lend{n:03}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_stable_and_monotonic() {
        let mut table = SymbolTable::new();
        assert_eq!(table.offset_of("a"), 4);
        assert_eq!(table.offset_of("b"), 8);
        assert_eq!(table.offset_of("a"), 4);
        assert_eq!(table.tail_offset(), 8);
    }

    #[test]
    fn if_without_else_mints_one_label() {
        let mut gen = LabelGen::new();
        assert_eq!(LabelGen::end_label(gen.reserve_if()), ".Lend000");
        assert_eq!(LabelGen::end_label(gen.reserve_if()), ".Lend001");
    }

    #[test]
    fn if_with_else_shares_counter() {
        let mut gen = LabelGen::new();
        let n = gen.reserve_if();
        let end = LabelGen::end_label(n);
        let els = LabelGen::else_label(n);
        assert_eq!(end, ".Lend000");
        assert_eq!(els, ".Lelse000");
        // next allocation continues from the next counter value
        assert_eq!(LabelGen::end_label(gen.reserve_if()), ".Lend001");
    }

    #[test]
    fn nested_if_between_end_and_else_does_not_shift_shared_n() {
        let mut gen = LabelGen::new();
        let outer_n = gen.reserve_if();
        // a nested if parsed inside `then` mints its own label
        let inner_n = gen.reserve_if();
        assert_eq!(LabelGen::end_label(inner_n), ".Lend001");
        // the outer if's else label still uses its own reserved n
        assert_eq!(LabelGen::else_label(outer_n), ".Lelse000");
    }

    #[test]
    fn loop_labels_share_counter_and_advance_by_two() {
        let mut gen = LabelGen::new();
        let (begin, end) = gen.loop_labels();
        assert_eq!(begin, ".Lbegin000");
        assert_eq!(end, ".Lend000");
        let (begin2, end2) = gen.loop_labels();
        assert_eq!(begin2, ".Lbegin002");
        assert_eq!(end2, ".Lend002");
    }
}
