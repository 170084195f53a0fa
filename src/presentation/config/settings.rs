use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use crate::application::services::ActionBudgets;

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub extraction: ExtractionSettings,
    pub actions: ActionSettings,
    pub models: ModelsSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_upload_mb: 25,
        }
    }
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    pub pdf_timeout_secs: u64,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            pdf_timeout_secs: 30,
        }
    }
}

/// Character budgets the document text is truncated to per action.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActionSettings {
    pub summarize_max_chars: usize,
    pub ask_max_chars: usize,
    pub grammar_max_chars: usize,
}

impl Default for ActionSettings {
    fn default() -> Self {
        let budgets = ActionBudgets::default();
        Self {
            summarize_max_chars: budgets.summarize_max_chars,
            ask_max_chars: budgets.ask_max_chars,
            grammar_max_chars: budgets.grammar_max_chars,
        }
    }
}

impl From<&ActionSettings> for ActionBudgets {
    fn from(settings: &ActionSettings) -> Self {
        Self {
            summarize_max_chars: settings.summarize_max_chars,
            ask_max_chars: settings.ask_max_chars,
            grammar_max_chars: settings.grammar_max_chars,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsSettings {
    /// Load every pipeline at startup instead of on the first action.
    pub preload: bool,
    pub summarizer: GeneratorModelSettings,
    pub grammar: GeneratorModelSettings,
    pub qa: QaModelSettings,
}

impl Default for ModelsSettings {
    fn default() -> Self {
        Self {
            preload: false,
            summarizer: GeneratorModelSettings {
                max_length: 150,
                min_length: 50,
                ..GeneratorModelSettings::default()
            },
            grammar: GeneratorModelSettings::default(),
            qa: QaModelSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorModelSettings {
    pub model: String,
    pub revision: Option<String>,
    pub max_length: usize,
    pub min_length: usize,
}

impl Default for GeneratorModelSettings {
    fn default() -> Self {
        Self {
            model: "t5-small".to_string(),
            revision: None,
            max_length: 256,
            min_length: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QaModelSettings {
    pub model: String,
    pub revision: Option<String>,
    /// Repository to take `tokenizer.json` from when the model repo lacks one.
    pub tokenizer: Option<String>,
    pub max_seq_len: usize,
    pub doc_stride: usize,
    pub max_answer_len: usize,
}

impl Default for QaModelSettings {
    fn default() -> Self {
        Self {
            model: "deepset/roberta-base-squad2".to_string(),
            revision: None,
            tokenizer: Some("FacebookAI/roberta-base".to_string()),
            max_seq_len: 384,
            doc_stride: 128,
            max_answer_len: 15,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
    #[error("models.{0}.min_length exceeds max_length")]
    MinLengthAboveMax(&'static str),
    #[error("models.qa.doc_stride must be smaller than max_seq_len")]
    StrideTooLarge,
}

impl Settings {
    /// Layers `appsettings.toml`, `appsettings.{Environment}.toml` and
    /// `APP_`-prefixed variables (`__` between sections), later sources
    /// winning. Missing files are fine; every field has a default.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .add_source(File::with_name("appsettings").required(false))
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = configuration.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("actions.summarize_max_chars", self.actions.summarize_max_chars),
            ("actions.ask_max_chars", self.actions.ask_max_chars),
            ("actions.grammar_max_chars", self.actions.grammar_max_chars),
            ("models.summarizer.max_length", self.models.summarizer.max_length),
            ("models.grammar.max_length", self.models.grammar.max_length),
            ("models.qa.max_seq_len", self.models.qa.max_seq_len),
            ("models.qa.max_answer_len", self.models.qa.max_answer_len),
            ("server.max_upload_mb", self.server.max_upload_mb),
        ];

        if let Some(&(name, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(SettingsError::ZeroValue(name));
        }

        if self.models.summarizer.min_length > self.models.summarizer.max_length {
            return Err(SettingsError::MinLengthAboveMax("summarizer"));
        }
        if self.models.grammar.min_length > self.models.grammar.max_length {
            return Err(SettingsError::MinLengthAboveMax("grammar"));
        }
        if self.models.qa.doc_stride >= self.models.qa.max_seq_len {
            return Err(SettingsError::StrideTooLarge);
        }

        Ok(())
    }
}
