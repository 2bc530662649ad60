use serde::Deserialize;

/// Input configuration
#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    /// Name of the field that tells the baseline run (`0`) from the
    /// TFO-enabled run (`1`)
    /// Older campaigns use "config", newer ones "tfostate"
    /// Default: "config"
    #[serde(default = "default_config_column")]
    pub config_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { config_column: default_config_column() }
    }
}

fn default_config_column() -> String {
    "config".to_string()
}
