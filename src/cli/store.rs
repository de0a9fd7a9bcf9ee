use crate::{error, management::StoreManager, success};

pub async fn clear_store() {
    let mut store = StoreManager::open().await;
    match store.clear().await {
        Ok(()) => success!("Cleared local state at {}", store.path().display()),
        Err(e) => error!("Failed to clear local state. Err: {}", e),
    }
}
