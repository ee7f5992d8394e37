//! Time subsystem.
//!
//! Frame pacing without coupling to the runtime:
//! - one `FramePacer` per render loop
//! - `poll()` from the event loop's idle hook, `frame_done()` after each frame
//! - `deadline()` feeds `ControlFlow::WaitUntil`

mod pacer;

pub use pacer::{FramePacer, DEFAULT_FRAME_INTERVAL};
