use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5::{Config as T5Config, T5ForConditionalGeneration};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{ModelError, TextGenerator};
use crate::presentation::config::GeneratorModelSettings;

use super::generation::{GenerationPolicy, greedy_next_token};
use super::hub::{ModelFiles, hub_api, inference_error, read_config};

const MAX_INPUT_TOKENS: usize = 512;

/// Text-to-text pipeline over a T5 checkpoint with greedy decoding.
pub struct CandleT5Generator {
    model: Mutex<T5ForConditionalGeneration>,
    tokenizer: Tokenizer,
    config: T5Config,
    device: Device,
    policy: GenerationPolicy,
}

impl CandleT5Generator {
    pub fn new(settings: &GeneratorModelSettings, task: &str) -> Result<Self, ModelError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = %settings.model,
            task,
            "Initializing Candle T5 pipeline"
        );

        let api = hub_api()?;
        let files = ModelFiles::fetch(&api, &settings.model, settings.revision.as_deref(), None)?;

        let config: T5Config = read_config(&files.config)?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| ModelError::LoadFailed(format!("tokenizer: {e}")))?;

        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length: MAX_INPUT_TOKENS,
                ..Default::default()
            }))
            .map_err(|e| ModelError::LoadFailed(format!("truncation config: {e}")))?;

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights], DType::F32, &device)
                .map_err(|e| ModelError::LoadFailed(format!("weights: {e}")))?
        };

        let model = T5ForConditionalGeneration::load(vb, &config)
            .map_err(|e| ModelError::LoadFailed(format!("model: {e}")))?;

        tracing::info!(task, "Candle T5 pipeline loaded successfully");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            policy: GenerationPolicy {
                max_length: settings.max_length,
                min_length: settings.min_length,
            },
        })
    }
}

#[async_trait]
impl TextGenerator for CandleT5Generator {
    async fn generate(&self, input: &str) -> Result<String, ModelError> {
        let encoding = self
            .tokenizer
            .encode(input, true)
            .map_err(|e| ModelError::TokenizationFailed(e.to_string()))?;

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(inference_error)?;

        let mut model = self.model.lock().await;
        let output_ids = decode_greedy(
            &mut model,
            &self.config,
            &self.device,
            &input_ids,
            &self.policy,
        );
        model.clear_kv_cache();
        let output_ids = output_ids?;

        tracing::debug!(
            input_tokens = encoding.get_ids().len(),
            output_tokens = output_ids.len(),
            "Generation finished"
        );

        self.tokenizer
            .decode(&output_ids, true)
            .map(|text| text.trim().to_string())
            .map_err(|e| ModelError::TokenizationFailed(e.to_string()))
    }
}

/// Greedy decode; returns the generated ids without the decoder start token.
fn decode_greedy(
    model: &mut T5ForConditionalGeneration,
    config: &T5Config,
    device: &Device,
    input_ids: &Tensor,
    policy: &GenerationPolicy,
) -> Result<Vec<u32>, ModelError> {
    let encoder_output = model.encode(input_ids).map_err(inference_error)?;

    let start_token = config
        .decoder_start_token_id
        .unwrap_or(config.pad_token_id) as u32;
    let eos_token = config.eos_token_id as u32;
    let mut decoded = vec![start_token];

    while decoded.len() < policy.max_length {
        let step: &[u32] = if decoded.len() == 1 || !config.use_cache {
            &decoded
        } else {
            &decoded[decoded.len() - 1..]
        };

        let decoder_ids = Tensor::new(step, device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(inference_error)?;

        let logits: Vec<f32> = model
            .decode(&decoder_ids, &encoder_output)
            .and_then(|t| t.squeeze(0))
            .and_then(|t| t.to_dtype(DType::F32))
            .and_then(|t| t.to_vec1())
            .map_err(inference_error)?;

        let next_token = greedy_next_token(&logits, eos_token, decoded.len(), policy)
            .ok_or_else(|| ModelError::InferenceFailed("decoder returned no logits".to_string()))?;

        if next_token == eos_token {
            break;
        }

        decoded.push(next_token);
    }

    Ok(decoded.split_off(1))
}
