use thiserror::Error;

/// Failures while bringing up the GPU for a window.
///
/// All of these are fatal: the runtime releases the window and stops.
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("window has zero size")]
    ZeroSize,

    #[error("failed to create wgpu surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to acquire a GPU adapter: {0}")]
    AdapterUnavailable(String),

    #[error("failed to acquire a GPU device: {0}")]
    DeviceUnavailable(String),
}

/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM); terminate gracefully.
    Fatal,
}

impl SurfaceErrorAction {
    /// Maps an acquisition error to the action the frame loop should take.
    ///
    /// `Lost`/`Outdated` ask for a reconfigure; the caller performs it.
    pub fn from_error(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => Self::Reconfigured,
            wgpu::SurfaceError::OutOfMemory => Self::Fatal,
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => Self::SkipFrame,
        }
    }

    #[inline]
    pub fn is_fatal(self) -> bool {
        self == Self::Fatal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_and_outdated_reconfigure() {
        assert_eq!(
            SurfaceErrorAction::from_error(&wgpu::SurfaceError::Lost),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            SurfaceErrorAction::from_error(&wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigured
        );
    }

    #[test]
    fn timeout_skips_frame() {
        assert_eq!(
            SurfaceErrorAction::from_error(&wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
        assert!(!SurfaceErrorAction::SkipFrame.is_fatal());
    }

    #[test]
    fn out_of_memory_is_fatal() {
        let action = SurfaceErrorAction::from_error(&wgpu::SurfaceError::OutOfMemory);
        assert!(action.is_fatal());
    }

    #[test]
    fn messages_name_the_failed_step() {
        let e = GpuError::AdapterUnavailable("no backend".into());
        assert_eq!(e.to_string(), "failed to acquire a GPU adapter: no backend");
        let e = GpuError::DeviceUnavailable("limits".into());
        assert!(e.to_string().contains("device"));
    }
}
