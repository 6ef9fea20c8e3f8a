use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::options::HeaderImageOptions;
use crate::ConfigError;

/// A named set of header-image options, e.g. one per feed source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(flatten)]
    pub options: HeaderImageOptions,
}

#[derive(Debug, Deserialize)]
pub struct PresetsFile {
    pub presets: Vec<Preset>,
}

impl PresetsFile {
    /// Look up a preset by name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Load and validate header-image presets from a YAML file.
///
/// ```yaml
/// presets:
///   - name: pixiv
///     image_size: 300
///     image_duration: 0.6
/// ```
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_presets(path: &Path) -> Result<PresetsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PresetsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let presets_file: PresetsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::PresetsFileParse)?;

    validate_presets(&presets_file)?;

    Ok(presets_file)
}

fn validate_presets(presets_file: &PresetsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for preset in &presets_file.presets {
        if preset.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "preset name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(preset.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate preset name: '{}'",
                preset.name
            )));
        }

        preset.options.validate().map_err(|e| match e {
            ConfigError::Validation(msg) => {
                ConfigError::Validation(format!("preset '{}': {msg}", preset.name))
            }
            other => other,
        })?;
    }

    Ok(())
}
