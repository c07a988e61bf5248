use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - ffmpeg path is not empty
/// - diagnostic tail and description limit are not 0
/// - manifest suffix names a JSON file
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.transcoder.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "transcoder.ffmpeg_path cannot be empty".to_string(),
        ));
    }

    if config.transcoder.diagnostic_tail_chars == 0 {
        return Err(ConfigError::ValidationError(
            "transcoder.diagnostic_tail_chars cannot be 0".to_string(),
        ));
    }

    if config.tagging.description_max_chars == 0 {
        return Err(ConfigError::ValidationError(
            "tagging.description_max_chars cannot be 0".to_string(),
        ));
    }

    if !config.recovery.manifest_suffix.ends_with(".json") {
        return Err(ConfigError::ValidationError(format!(
            "recovery.manifest_suffix must end with .json, got {:?}",
            config.recovery.manifest_suffix
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RecoveryConfig, TranscoderConfig};
    use std::path::PathBuf;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_empty_ffmpeg_path_fails() {
        let config = Config {
            transcoder: TranscoderConfig {
                ffmpeg_path: PathBuf::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_zero_tail_fails() {
        let mut config = Config::default();
        config.transcoder.diagnostic_tail_chars = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_manifest_suffix() {
        let config = Config {
            recovery: RecoveryConfig {
                recursive: false,
                manifest_suffix: ".info".to_string(),
            },
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("manifest_suffix"));
    }
}
