use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Configuration from tidemark.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub canvas: CanvasConfig,
}

/// The title/year service. Any OpenAI-style chat-completions endpoint works.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        InferenceConfig {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_timeout_ms() -> u64 {
    8000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Color overrides by theme key, e.g. `highlight = "#60A5FA"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Dot-grid background on the canvas
    #[serde(default = "default_true")]
    pub show_grid: bool,
    /// Horizontal gap used by the add-adjacent affordance, in canvas cells
    #[serde(default = "default_adjacent_offset")]
    pub adjacent_offset: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            show_grid: true,
            adjacent_offset: default_adjacent_offset(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_adjacent_offset() -> f64 {
    32.0
}
