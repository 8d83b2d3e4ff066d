//! Configuration parameters for key estimation

use crate::error::KeyError;
use crate::templates::{profiles, KeyProfile, KeyTransition};

/// Key estimation configuration parameters
///
/// Template selections are by name, matching the registered constants;
/// selecting `"custom"` for a slot requires the corresponding weight
/// vector to be present (12 entries per profile, 24 for the
/// transition). Validation happens when the templates are built, before
/// any decoding starts.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Major-mode key profile name (default: "temperley")
    pub major_profile: String,

    /// Minor-mode key profile name (default: "sapp")
    pub minor_profile: String,

    /// Key transition template name (default: "exponential10")
    ///
    /// Controls how strongly the local pass prefers staying in one
    /// key; the default makes a distant jump many orders of magnitude
    /// less likely than holding still.
    pub key_transition: String,

    /// Custom major-profile weights, used when `major_profile` is "custom"
    pub custom_major_profile: Option<Vec<f64>>,

    /// Custom minor-profile weights, used when `minor_profile` is "custom"
    pub custom_minor_profile: Option<Vec<f64>>,

    /// Custom transition weights, used when `key_transition` is "custom"
    pub custom_key_transition: Option<Vec<f64>>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            major_profile: "temperley".to_string(),
            minor_profile: "sapp".to_string(),
            key_transition: "exponential10".to_string(),
            custom_major_profile: None,
            custom_minor_profile: None,
            custom_key_transition: None,
        }
    }
}

impl EstimatorConfig {
    /// Resolve the configured key profile
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidTemplate`] for an unknown profile
    /// name, a missing custom weight vector, or custom weights of the
    /// wrong length.
    pub fn key_profile(&self) -> Result<KeyProfile, KeyError> {
        let major = self.resolve_profile(&self.major_profile, &self.custom_major_profile, true)?;
        let minor = self.resolve_profile(&self.minor_profile, &self.custom_minor_profile, false)?;
        Ok(KeyProfile::from_arrays(major, minor))
    }

    /// Resolve the configured key transition
    ///
    /// # Errors
    ///
    /// Same failure modes as [`EstimatorConfig::key_profile`].
    pub fn key_transition(&self) -> Result<KeyTransition, KeyError> {
        if self.key_transition == "custom" {
            let weights = self.custom_key_transition.as_deref().ok_or_else(|| {
                KeyError::InvalidTemplate(
                    "key transition \"custom\" selected without custom weights".to_string(),
                )
            })?;
            KeyTransition::custom(weights)
        } else {
            KeyTransition::new(&self.key_transition)
        }
    }

    fn resolve_profile(
        &self,
        name: &str,
        custom: &Option<Vec<f64>>,
        major: bool,
    ) -> Result<[f64; 12], KeyError> {
        let mode = if major { "major" } else { "minor" };
        if name == "custom" {
            let weights = custom.as_deref().ok_or_else(|| {
                KeyError::InvalidTemplate(format!(
                    "{} profile \"custom\" selected without custom weights",
                    mode
                ))
            })?;
            return profiles::profile_array(weights, mode);
        }
        let named = if major {
            profiles::major_template(name)
        } else {
            profiles::minor_template(name)
        };
        named.copied().ok_or_else(|| {
            KeyError::InvalidTemplate(format!("unknown {} key profile: \"{}\"", mode, name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_resolves() {
        let config = EstimatorConfig::default();
        assert!(config.key_profile().is_ok());
        assert!(config.key_transition().is_ok());
    }

    #[test]
    fn test_unknown_names_rejected() {
        let config = EstimatorConfig {
            major_profile: "nope".to_string(),
            ..EstimatorConfig::default()
        };
        assert!(config.key_profile().is_err());

        let config = EstimatorConfig {
            key_transition: "nope".to_string(),
            ..EstimatorConfig::default()
        };
        assert!(config.key_transition().is_err());
    }

    #[test]
    fn test_custom_without_weights_rejected() {
        let config = EstimatorConfig {
            minor_profile: "custom".to_string(),
            ..EstimatorConfig::default()
        };
        assert!(config.key_profile().is_err());

        let config = EstimatorConfig {
            key_transition: "custom".to_string(),
            ..EstimatorConfig::default()
        };
        assert!(config.key_transition().is_err());
    }

    #[test]
    fn test_custom_with_weights() {
        let config = EstimatorConfig {
            major_profile: "custom".to_string(),
            custom_major_profile: Some(vec![1.0; 12]),
            ..EstimatorConfig::default()
        };
        assert!(config.key_profile().is_ok());

        let config = EstimatorConfig {
            key_transition: "custom".to_string(),
            custom_key_transition: Some(vec![1.0; 24]),
            ..EstimatorConfig::default()
        };
        assert!(config.key_transition().is_ok());
    }

    #[test]
    fn test_custom_wrong_length_rejected() {
        let config = EstimatorConfig {
            major_profile: "custom".to_string(),
            custom_major_profile: Some(vec![1.0; 13]),
            ..EstimatorConfig::default()
        };
        assert!(config.key_profile().is_err());
    }
}
