use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures at the construction boundary. Gameplay clicks never error; an
/// illegal click is simply ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("unknown rule variant: {0:?} (expected \"strict\" or \"forced\")")]
    UnknownVariant(String),
    #[error("invalid game config: {0}")]
    InvalidConfig(String),
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = EngineError::UnknownVariant("italian".to_string());
        assert_eq!(
            err.to_string(),
            "unknown rule variant: \"italian\" (expected \"strict\" or \"forced\")"
        );
        assert_eq!(
            EngineError::InvalidConfig("missing field".to_string()).to_string(),
            "invalid game config: missing field"
        );
    }
}
