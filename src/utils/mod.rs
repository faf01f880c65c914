pub mod error;
pub mod logger;
pub mod prompt_similarity;

pub use error::{AppError, Result};
pub use logger::init_logger;
pub use prompt_similarity::{similarity, SimilarityEngine};
