pub mod error;
pub mod traits;
pub mod types;

pub use error::SolveError;
pub use traits::{CompletionRequest, TextModel, VisionModel, VisionRequest};
pub use types::{ErrorBody, SolveRequest, SolveResponse};
