use thiserror::Error;

use crate::engine::animation::AnimationName;

/// Setup-time failures. These indicate a data/template mismatch and abort
/// match construction; they never surface for ordinary gameplay input.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Animation {animation} does not exist for {agent}")]
    MissingAnimation { agent: String, animation: AnimationName },

    #[error("Animation {animation} for {agent} has a non-positive loop duration")]
    InvalidClip { agent: String, animation: AnimationName },

    #[error("Invalid engine config: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum MatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl MatchError {
    /// Configuration problems are fatal; everything else is a caller error.
    pub fn is_config(&self) -> bool {
        matches!(self, MatchError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_animation_message() {
        let err = ConfigError::MissingAnimation {
            agent: "home goalie".to_string(),
            animation: AnimationName::HeartEyes,
        };
        assert_eq!(err.to_string(), "Animation HeartEyes does not exist for home goalie");
    }

    #[test]
    fn test_config_error_is_config() {
        let err: MatchError = ConfigError::MissingAnimation {
            agent: "referee".to_string(),
            animation: AnimationName::Punch,
        }
        .into();
        assert!(err.is_config());
        assert!(!MatchError::InvalidRequest("dt".into()).is_config());
    }
}
