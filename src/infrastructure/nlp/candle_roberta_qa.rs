use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::xlm_roberta::{Config as RobertaConfig, XLMRobertaModel};
use tokenizers::{Encoding, Tokenizer, TruncationDirection, TruncationStrategy};

use crate::application::ports::{ModelError, QuestionAnswerer};
use crate::domain::Answer;
use crate::presentation::config::QaModelSettings;

use super::hub::{ModelFiles, hub_api, inference_error, read_config, select_device, select_dtype};
use super::span_selection::{SpanCandidate, best_span};

/// Extractive question answering: a RoBERTa encoder with a start/end span
/// head, scored over overlapping windows of the context.
pub struct CandleRobertaQa {
    model: XLMRobertaModel,
    qa_outputs: Linear,
    tokenizer: Tokenizer,
    device: Device,
    max_answer_len: usize,
}

struct WindowAnswer {
    span: SpanCandidate,
    byte_start: usize,
    byte_end: usize,
}

impl CandleRobertaQa {
    pub fn new(settings: &QaModelSettings) -> Result<Self, ModelError> {
        let device = select_device();

        tracing::info!(
            device = ?device,
            model = %settings.model,
            "Initializing Candle question-answering pipeline"
        );

        let api = hub_api()?;
        let files = ModelFiles::fetch(
            &api,
            &settings.model,
            settings.revision.as_deref(),
            settings.tokenizer.as_deref(),
        )?;

        let config: RobertaConfig = read_config(&files.config)?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| ModelError::LoadFailed(format!("tokenizer: {e}")))?;

        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: settings.max_seq_len,
                stride: settings.doc_stride,
                strategy: TruncationStrategy::OnlySecond,
                direction: TruncationDirection::Right,
            }))
            .map_err(|e| ModelError::LoadFailed(format!("truncation config: {e}")))?;
        tokenizer.with_padding(None);

        let dtype = select_dtype(&device);

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights], dtype, &device)
                .map_err(|e| ModelError::LoadFailed(format!("weights: {e}")))?
        };

        let model = XLMRobertaModel::new(&config, vb.pp("roberta"))
            .map_err(|e| ModelError::LoadFailed(format!("model: {e}")))?;
        let qa_outputs = candle_nn::linear(config.hidden_size, 2, vb.pp("qa_outputs"))
            .map_err(|e| ModelError::LoadFailed(format!("qa head: {e}")))?;

        tracing::info!("Candle question-answering pipeline loaded successfully");

        Ok(Self {
            model,
            qa_outputs,
            tokenizer,
            device,
            max_answer_len: settings.max_answer_len,
        })
    }

    fn score_window(&self, encoding: &Encoding) -> Result<Option<WindowAnswer>, ModelError> {
        let ids = encoding.get_ids();
        let seq_len = ids.len();

        let input_ids = Tensor::new(ids, &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(inference_error)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(inference_error)?;
        let token_type_ids = Tensor::zeros((1, seq_len), DType::U32, &self.device)
            .map_err(inference_error)?;

        let hidden = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids, None, None, None)
            .map_err(inference_error)?;

        let logits: Vec<Vec<f32>> = self
            .qa_outputs
            .forward(&hidden)
            .and_then(|t| t.squeeze(0))
            .and_then(|t| t.to_dtype(DType::F32))
            .and_then(|t| t.to_vec2())
            .map_err(inference_error)?;

        let start_logits: Vec<f32> = logits.iter().map(|pair| pair[0]).collect();
        let end_logits: Vec<f32> = logits.iter().map(|pair| pair[1]).collect();
        let context_mask: Vec<bool> = encoding
            .get_sequence_ids()
            .iter()
            .map(|sequence| *sequence == Some(1))
            .collect();

        let Some(span) = best_span(&start_logits, &end_logits, &context_mask, self.max_answer_len)
        else {
            return Ok(None);
        };

        let offsets = encoding.get_offsets();
        Ok(Some(WindowAnswer {
            span,
            byte_start: offsets[span.start].0,
            byte_end: offsets[span.end].1,
        }))
    }
}

#[async_trait]
impl QuestionAnswerer for CandleRobertaQa {
    async fn answer(&self, question: &str, context: &str) -> Result<Answer, ModelError> {
        let encoding = self
            .tokenizer
            .encode((question, context), true)
            .map_err(|e| ModelError::TokenizationFailed(e.to_string()))?;

        let windows: Vec<&Encoding> = std::iter::once(&encoding)
            .chain(encoding.get_overflowing().iter())
            .collect();

        tracing::debug!(windows = windows.len(), "Scoring context windows");

        let mut best: Option<WindowAnswer> = None;
        for window in windows {
            if let Some(candidate) = self.score_window(window)? {
                if best
                    .as_ref()
                    .is_none_or(|b| candidate.span.score > b.span.score)
                {
                    best = Some(candidate);
                }
            }
        }

        let Some(best) = best else {
            return Ok(Answer {
                text: String::new(),
                score: 0.0,
                start: 0,
                end: 0,
            });
        };

        let text = context
            .get(best.byte_start..best.byte_end)
            .ok_or_else(|| {
                ModelError::InferenceFailed(format!(
                    "answer offsets {}..{} fall outside the context",
                    best.byte_start, best.byte_end
                ))
            })?
            .to_string();

        let start = context[..best.byte_start].chars().count();
        let end = start + text.chars().count();

        Ok(Answer {
            text,
            score: best.span.score,
            start,
            end,
        })
    }
}
