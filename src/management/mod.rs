mod store;
mod tracks;
mod uploads;

pub use store::LibraryState;
pub use store::STORE_KEY;
pub use store::StoreError;
pub use store::StoreManager;
pub use tracks::TrackStore;
pub use uploads::UploadStore;
