//! Diagnostic codes for the conditions `spec.md` §7 enumerates as
//! "Diagnostics" (report and continue, as opposed to "Fatal").

/// A stable identifier for a diagnostic message (`E0001` style).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    pub prefix: &'static str,
    pub number: u32,
}

impl DiagnosticCode {
    #[inline]
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    pub fn as_str(&self) -> String {
        format!("{}{:04}", self.prefix, self.number)
    }

    // Lexer
    pub const UNTERMINATED_COMMENT: Self = Self::new("E", 1001);
    pub const NAME_TOO_LONG: Self = Self::new("E", 1002);
    pub const INVALID_OCTAL_DIGIT: Self = Self::new("E", 1003);
    pub const EMPTY_CHAR_CONSTANT: Self = Self::new("E", 1004);
    pub const CHAR_CONSTANT_TOO_LONG: Self = Self::new("E", 1005);
    pub const UNTERMINATED_CHAR: Self = Self::new("E", 1006);
    pub const STRING_TOO_LONG: Self = Self::new("E", 1007);
    pub const UNTERMINATED_STRING: Self = Self::new("E", 1008);
    pub const INVALID_ESCAPE: Self = Self::new("E", 1009);
    pub const INVALID_TOKEN_CHAR: Self = Self::new("E", 1010);

    // Parser
    pub const EXPECTED_TOKEN: Self = Self::new("E", 2001);
    pub const INTEGER_CONSTANT_EXPECTED: Self = Self::new("E", 2002);
    pub const LVALUE_EXPECTED: Self = Self::new("E", 2003);
    pub const CASE_OUTSIDE_SWITCH: Self = Self::new("E", 2004);
    pub const TOO_MANY_ARGUMENTS: Self = Self::new("E", 2005);

    // Symbol table / semantics
    pub const DUPLICATE_DEFINITION: Self = Self::new("E", 3001);
    pub const UNDEFINED_NAME: Self = Self::new("E", 3002);
    pub const UNDEFINED_LABEL: Self = Self::new("E", 3003);
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DiagnosticCode({})", self.as_str())
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(DiagnosticCode::DUPLICATE_DEFINITION.as_str(), "E3001");
    }
}
