//! Device configuration for local inference.

use crate::error::{DiagnosError, Result};

/// Compute device for local inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    /// CPU execution (default).
    #[default]
    Cpu,

    /// CUDA GPU execution.
    #[cfg(feature = "cuda")]
    Cuda {
        /// GPU device ID (0-indexed).
        device_id: u32,
    },
}

impl Device {
    /// Parse a configured device name ("cpu" or "cuda").
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            #[cfg(feature = "cuda")]
            "cuda" => Ok(Self::Cuda { device_id: 0 }),
            other => Err(DiagnosError::Configuration(format!(
                "Unsupported inference device: {other}"
            ))),
        }
    }

    /// Get the device name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            #[cfg(feature = "cuda")]
            Self::Cuda { .. } => "CUDA",
        }
    }
}
