//! Shared application state

use crate::auth::AuthKeys;
use crate::files::FileStore;
use crate::rate_limit::RateLimiter;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub files: Arc<FileStore>,
    pub keys: Arc<AuthKeys>,
    pub login_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, files: FileStore, keys: AuthKeys) -> Self {
        Self {
            store,
            files: Arc::new(files),
            keys: Arc::new(keys),
            login_limiter: Arc::new(RateLimiter::new()),
        }
    }
}
