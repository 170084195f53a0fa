use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::application::ports::{ModelError, ModelHandles, ModelLoader};

/// Lazily loads the model pipelines once and hands the same instances to
/// every caller. Concurrent first callers wait on the single in-flight load.
/// A failed load leaves the cell empty, so the next call tries again.
///
/// The load itself runs in a spawned task that owns the init permit, so a
/// caller dropping its future (a client disconnect) does not abandon the
/// load halfway and let the next request start another one.
pub struct ModelGateway {
    loader: Arc<dyn ModelLoader>,
    handles: Arc<OnceCell<Arc<ModelHandles>>>,
}

impl ModelGateway {
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            loader,
            handles: Arc::new(OnceCell::new()),
        }
    }

    pub async fn load(&self) -> Result<Arc<ModelHandles>, ModelError> {
        if let Some(handles) = self.handles.get() {
            return Ok(Arc::clone(handles));
        }

        let cell = Arc::clone(&self.handles);
        let loader = Arc::clone(&self.loader);

        tokio::spawn(async move {
            cell.get_or_try_init(|| load_handles(loader))
                .await
                .map(Arc::clone)
        })
        .await
        .map_err(|e| ModelError::LoadFailed(format!("task join error: {e}")))?
    }

    pub fn is_loaded(&self) -> bool {
        self.handles.initialized()
    }
}

async fn load_handles(loader: Arc<dyn ModelLoader>) -> Result<Arc<ModelHandles>, ModelError> {
    tracing::info!("Loading model pipelines");

    let handles = tokio::task::spawn_blocking(move || loader.load())
        .await
        .map_err(|e| ModelError::LoadFailed(format!("task join error: {e}")))??;

    tracing::info!("Model pipelines ready");
    Ok(Arc::new(handles))
}
