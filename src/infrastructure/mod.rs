pub mod json_store;
pub mod storage;
pub mod upload_store;

pub use json_store::JsonCollection;
pub use storage::Storage;
pub use upload_store::{DocumentContent, Upload, UploadKind, UploadStore};
