use winit::dpi::PhysicalSize;

/// Platform events the frame loop reacts to.
///
/// The runtime translates winit events into these; everything else is ignored.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopEvent {
    /// Drawable size changed (resize or scale-factor change).
    Resized(PhysicalSize<u32>),
    /// The user asked to close the window.
    CloseRequested,
}

/// Control directive returned by the frame loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// What happened to a single frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// Drawn, submitted and presented.
    Presented,
    /// Acquisition failed transiently; retry on the next tick.
    Skipped,
    /// Acquisition failed unrecoverably.
    Fatal,
}

/// Running frame counters, logged at shutdown.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub presented: u64,
    pub skipped: u64,
    pub reconfigured: u64,
}
