use thiserror::Error;

pub type Result<T> = std::result::Result<T, ColorError>;

/// Rejection of a color string at the parsing boundary.
///
/// Once a [`crate::Color`] exists, no derived operation can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("empty color string")]
    Empty,

    #[error("invalid color format: {input:?}")]
    InvalidColorFormat { input: String },
}

impl ColorError {
    #[must_use]
    pub fn invalid(input: impl Into<String>) -> Self {
        Self::InvalidColorFormat {
            input: input.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ColorError;

    #[test]
    fn invalid_constructor_keeps_input_in_message() {
        let error = ColorError::invalid("#zzz");
        assert_eq!(error.to_string(), "invalid color format: \"#zzz\"");
    }

    #[test]
    fn empty_has_stable_message() {
        assert_eq!(ColorError::Empty.to_string(), "empty color string");
    }
}
