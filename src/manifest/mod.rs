//! Model manifest: which models exist and what their inputs look like.

pub mod descriptor;
pub mod registry;

pub use descriptor::{
    DEFAULT_INPUT_NAME, Manifest, ManifestEntry, ModelDescriptor, ModelFamily, SYMPTOM_MODEL_KEY,
};
pub use registry::ManifestRegistry;
