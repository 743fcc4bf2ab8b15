use crate::expr::ExprError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Expr(#[from] ExprError),

    #[error("Invalid color: {value}")]
    InvalidColor { value: String },

    #[error("Invalid format string {fmt:?}: {message}")]
    InvalidFormat { fmt: String, message: String },

    #[error("Invalid diagram name ({component}): {value:?}")]
    InvalidName {
        component: &'static str,
        value: String,
    },

    #[error("Invalid figure: {message}")]
    InvalidFigure { message: String },

    #[error("Unknown document format: {hint}")]
    UnknownDocumentFormat { hint: String },

    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid document YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid document JSON5: {0}")]
    Json5(#[from] json5::Error),
}
