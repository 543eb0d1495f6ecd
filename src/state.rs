use crate::config::AppConfig;
use crate::store::{mongo::MongoUserStore, UserStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let store = Arc::new(MongoUserStore::connect(&config).await?) as Arc<dyn UserStore>;
        Ok(Self::from_parts(store, Arc::new(config)))
    }

    pub fn from_parts(store: Arc<dyn UserStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    #[cfg(test)]
    pub fn fake() -> (Self, Arc<crate::store::memory::MemoryUserStore>) {
        let store = Arc::new(crate::store::memory::MemoryUserStore::default());
        let config = Arc::new(AppConfig {
            connection_string: "mongodb://localhost:27017/test".into(),
            database: None,
            host: "127.0.0.1".into(),
            port: 0,
            environment: "test".into(),
            fail_fast_on_connect_error: false,
        });
        let state = Self::from_parts(store.clone() as Arc<dyn UserStore>, config);
        (state, store)
    }
}
