use core::fmt;

/// Structured error for model parsing and list-markup extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrandifyError {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: Box<str>,
    /// Optional source context (selector kind, tokenizer phase).
    pub source: Option<Box<str>>,
    /// Optional tokenizer/read offset in bytes.
    pub token_offset: Option<usize>,
}

impl BrandifyError {
    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into().into_boxed_str(),
            source: None,
            token_offset: None,
        }
    }

    pub(crate) fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into().into_boxed_str());
        self
    }

    pub(crate) fn with_token_offset(mut self, offset: usize) -> Self {
        self.token_offset = Some(offset);
        self
    }
}

impl fmt::Display for BrandifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(source) = self.source.as_deref() {
            write!(f, " [source={}]", source)?;
        }
        if let Some(offset) = self.token_offset {
            write!(f, " [offset={}]", offset)?;
        }
        Ok(())
    }
}

impl std::error::Error for BrandifyError {}
