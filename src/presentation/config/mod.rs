mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    ActionSettings, ExtractionSettings, GeneratorModelSettings, LoggingSettings, ModelsSettings,
    QaModelSettings, ServerSettings, Settings, SettingsError,
};
