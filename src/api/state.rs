use std::sync::Arc;

use crate::logos::LogoResolver;
use crate::storage::{DataSet, StorageConfig};

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub data: Arc<DataSet>,
    pub logos: Arc<LogoResolver>,
}

impl AppState {
    pub fn new(storage: StorageConfig, data: DataSet, logos: LogoResolver) -> Self {
        Self {
            storage: Arc::new(storage),
            data: Arc::new(data),
            logos: Arc::new(logos),
        }
    }
}
