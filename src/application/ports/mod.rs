mod file_loader;
mod model_error;
mod model_loader;
mod question_answerer;
mod text_generator;

pub use file_loader::{FileLoader, FileLoaderError};
pub use model_error::ModelError;
pub use model_loader::{ModelHandles, ModelLoader};
pub use question_answerer::QuestionAnswerer;
pub use text_generator::TextGenerator;
