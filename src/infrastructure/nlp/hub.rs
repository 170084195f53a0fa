use std::path::{Path, PathBuf};

use candle_core::{DType, Device};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use serde::de::DeserializeOwned;

use crate::application::ports::ModelError;

/// Local paths of the files a pipeline needs, resolved through the hub cache.
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
}

impl ModelFiles {
    pub fn fetch(
        api: &Api,
        model_id: &str,
        revision: Option<&str>,
        tokenizer_id: Option<&str>,
    ) -> Result<Self, ModelError> {
        let repo = match revision {
            Some(rev) => api.repo(Repo::with_revision(
                model_id.to_string(),
                RepoType::Model,
                rev.to_string(),
            )),
            None => api.repo(Repo::new(model_id.to_string(), RepoType::Model)),
        };

        let config = repo
            .get("config.json")
            .map_err(|e| ModelError::LoadFailed(format!("{model_id} config.json: {e}")))?;
        let weights = repo
            .get("model.safetensors")
            .map_err(|e| ModelError::LoadFailed(format!("{model_id} model.safetensors: {e}")))?;

        let tokenizer = match tokenizer_id {
            Some(id) => api
                .repo(Repo::new(id.to_string(), RepoType::Model))
                .get("tokenizer.json")
                .map_err(|e| ModelError::LoadFailed(format!("{id} tokenizer.json: {e}")))?,
            None => repo
                .get("tokenizer.json")
                .map_err(|e| ModelError::LoadFailed(format!("{model_id} tokenizer.json: {e}")))?,
        };

        Ok(Self {
            config,
            tokenizer,
            weights,
        })
    }
}

pub fn hub_api() -> Result<Api, ModelError> {
    Api::new().map_err(|e| ModelError::LoadFailed(e.to_string()))
}

pub fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ModelError::LoadFailed(format!("read config: {e}")))?;
    serde_json::from_str(&contents).map_err(|e| ModelError::LoadFailed(format!("parse config: {e}")))
}

pub fn select_device() -> Device {
    Device::new_metal(0).unwrap_or(Device::Cpu)
}

pub fn select_dtype(device: &Device) -> DType {
    if device.is_cpu() {
        DType::F32
    } else {
        DType::F16
    }
}

pub(crate) fn inference_error(e: candle_core::Error) -> ModelError {
    ModelError::InferenceFailed(e.to_string())
}
