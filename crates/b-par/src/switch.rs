use b_sem::SymbolId;

/// One live `switch` while its body is being parsed (`spec.md` §4.3). The
/// parser keeps a stack of these so `case` statements inside nested
/// switches attach to the innermost one.
pub struct SwitchFrame {
    /// Index in the fragment right after the discriminant was evaluated;
    /// the case-comparison table is spliced in right after this position
    /// once the whole switch body has been parsed.
    pub eval_position: usize,
    /// `(K, label)` pairs appended as each `case K:` is parsed.
    pub cases: Vec<(i64, SymbolId)>,
}

impl SwitchFrame {
    pub fn new(eval_position: usize) -> Self {
        Self { eval_position, cases: Vec::new() }
    }
}
