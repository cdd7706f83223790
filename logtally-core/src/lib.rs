pub mod aggregate;
pub mod config;
pub mod enrich;
pub mod error;
pub mod field;
pub mod logging;
pub mod parse;
pub mod pipeline;
pub mod render;

pub use config::RunConfig;
pub use error::TallyError;
pub use pipeline::{process, run};
