pub mod config;
pub mod routes;
pub mod utils;

pub use config::Settings;
pub use utils::prompt_similarity::similarity;
