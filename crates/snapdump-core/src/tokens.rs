use std::borrow::Cow;

/// One immutable value-to-label mapping entry.
#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub value: u32,
    pub label: &'static str,
}

/// Numeric base used when rendering values with no matching entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenBase {
    Decimal,
    Hex,
}

/// Static value-to-label table for rendering enum and bitmask fields.
///
/// Tables are read-only, process-lifetime data; lookups never mutate them
/// and always return owned or `'static` text.
#[derive(Debug, Clone, Copy)]
pub struct TokenTable {
    entries: &'static [Token],
    base: TokenBase,
}

impl TokenTable {
    pub const fn new(entries: &'static [Token], base: TokenBase) -> Self {
        Self { entries, base }
    }

    /// Label for an exact value match, or the value rendered in the
    /// table's base when no entry matches.
    pub fn lookup(&self, value: u32) -> Cow<'static, str> {
        for entry in self.entries {
            if entry.value == value {
                return Cow::Borrowed(entry.label);
            }
        }
        match self.base {
            TokenBase::Decimal => Cow::Owned(value.to_string()),
            TokenBase::Hex => Cow::Owned(format!("0x{value:x}")),
        }
    }

    /// Joined labels for every single-bit entry set in `value`, in table
    /// order; bits with no entry are skipped. Returns `"none"` when no
    /// entry matches.
    pub fn lookup_bits(&self, value: u32, separator: &str) -> String {
        let mut out = String::new();
        for entry in self.entries {
            if value & entry.value != 0 {
                if !out.is_empty() {
                    out.push_str(separator);
                }
                out.push_str(entry.label);
            }
        }
        if out.is_empty() {
            out.push_str("none");
        }
        out
    }
}
