use candle_core::Device;
use tracing::{info, warn};

use super::error::EmbeddingError;

/// Picks the accelerator enabled at compile time, falling back to CPU.
///
/// Models are loaded once per process, so the device is chosen once per model load.
pub fn select_device() -> Result<Device, EmbeddingError> {
    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            info!("Using Metal GPU acceleration");
            return Ok(device);
        }
        Err(e) => warn!(error = %e, "Metal device unavailable"),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            info!("Using CUDA GPU acceleration");
            return Ok(device);
        }
        Err(e) => warn!(error = %e, "CUDA device unavailable"),
    }

    if cfg!(any(feature = "metal", feature = "cuda")) {
        warn!("Falling back to CPU device");
    } else {
        info!("No GPU backend compiled, using CPU device");
    }
    Ok(Device::Cpu)
}
