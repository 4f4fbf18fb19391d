use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Referenced file does not exist.
    #[error("Fichier introuvable : {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// Post-processing preset name not known to the registry.
    #[error("Preset inconnu : {name}")]
    UnknownPreset {
        /// The requested preset name.
        name: String,
    },

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err = CoreError::UnknownPreset { name: "noir".into() };
        assert!(err.to_string().contains("noir"));

        let err = CoreError::InvalidDimensions { width: 0, height: 720 };
        assert_eq!(err.to_string(), "Dimensions invalides : 0×720");
    }
}
