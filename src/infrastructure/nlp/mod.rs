mod candle_model_loader;
mod candle_roberta_qa;
mod candle_t5_generator;
mod generation;
mod hub;
mod span_selection;

pub use candle_model_loader::CandleModelLoader;
pub use candle_roberta_qa::CandleRobertaQa;
pub use candle_t5_generator::CandleT5Generator;
pub use generation::{GenerationPolicy, greedy_next_token};
pub use hub::{ModelFiles, select_device, select_dtype};
pub use span_selection::{SpanCandidate, best_span};
