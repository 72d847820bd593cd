use std::fmt;

/// What went wrong while expanding a WGSL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateErrorKind {
    /// `${` without a closing `}`.
    Unterminated,
    /// `${NAME}` where `NAME` is not a known binding constant.
    UnknownName(String),
}

/// An error from [`crate::wgsl::expand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateError {
    pub kind: TemplateErrorKind,
    /// Byte offset of the offending `${` in the template.
    pub offset: usize,
}

impl TemplateError {
    pub(crate) fn new(kind: TemplateErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TemplateErrorKind::Unterminated => {
                write!(f, "wgsl template error at byte {}: unterminated placeholder", self.offset)
            }
            TemplateErrorKind::UnknownName(name) => {
                write!(
                    f,
                    "wgsl template error at byte {}: unknown binding constant `{name}`",
                    self.offset
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// A raw integer that does not name any member of a binding family.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UnknownIndex {
    pub family: &'static str,
    pub value: u32,
}

impl fmt::Display for UnknownIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} has no member with index {}", self.family, self.value)
    }
}

impl std::error::Error for UnknownIndex {}
