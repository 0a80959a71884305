pub mod ai;
pub mod blob;
pub mod error;
pub mod http;
pub mod image;
pub mod pipeline;

pub use blob::{BlobError, BlobStore, MemoryBlobStore};
pub use error::FetchError;
pub use http::{HttpClient, MockClient, MockResponse, ReqwestClient};
pub use self::image::{fetch_and_validate_image, validate_image, FetchedImage, MAX_FILE_SIZE};
pub use pipeline::{
    run_generation, DishImageOutcome, GenerationOutcome, GenerationRequest, PipelineError,
};
