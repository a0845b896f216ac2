use std::sync::Arc;

use crate::services::Pipeline;
use crate::store::Store;

/// Shared application state
///
/// The dataset and every derived matrix are built once at startup and only
/// read afterwards, so no lock is needed.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub pipeline: Arc<Pipeline>,
    pub default_top_k: usize,
}

impl AppState {
    /// Builds the recommendation pipeline for a loaded store
    pub fn new(store: Store, default_top_k: usize) -> Self {
        let pipeline = Pipeline::build(&store);
        Self {
            store: Arc::new(store),
            pipeline: Arc::new(pipeline),
            default_top_k,
        }
    }
}
