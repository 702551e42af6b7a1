//! Public types for the Diagnos API.

mod model;
mod request;
mod response;

pub use model::{Endpoints, ModelInfo, ModelListing};
pub use request::PredictRequest;
pub use response::{ErrorBody, ErrorDetails, Prediction, PredictionResult, Source};
