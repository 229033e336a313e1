use thiserror::Error;

/// Canonical result for core and codec.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Text that claims to be a structured pack but does not parse.
    #[error("cannot decode pack {input:?}: {detail}")]
    Decode { input: String, detail: String },

    #[error("operator '{operator}': missing required argument '{key}'")]
    MissingArgument { operator: String, key: String },

    #[error("{function}: expected {expected} element, found {found}")]
    TypeMismatch {
        function: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{function}: unsupported element: {detail}")]
    UnsupportedElement {
        function: &'static str,
        detail: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn decode(input: impl Into<String>, detail: impl ToString) -> Self {
        Error::Decode {
            input: input.into(),
            detail: detail.to_string(),
        }
    }

    pub fn missing_argument(operator: impl Into<String>, key: impl Into<String>) -> Self {
        Error::MissingArgument {
            operator: operator.into(),
            key: key.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode {
            input: String::new(),
            detail: e.to_string(),
        }
    }
}
