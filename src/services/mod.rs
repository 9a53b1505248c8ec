pub mod codec;
pub mod fetcher;
pub mod processor;

pub use codec::{DecodeError, EncodeError};
pub use fetcher::{FetchError, HttpFetcher, ImageFetch};
pub use processor::{ImageProcessor, Operation, ProcessError};
