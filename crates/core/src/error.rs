#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid configuration: {var} = '{value}' ({reason})")]
    Config {
        var: &'static str,
        value: String,
        reason: String,
    },
}
