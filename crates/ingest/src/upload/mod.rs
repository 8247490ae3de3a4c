pub mod client;
pub mod pool;
pub mod traits;

pub use client::EmbeddingsApiClient;
pub use pool::{upload_all, UploadFailure, UploadReport};
pub use traits::{ChunkSink, UploadError};
