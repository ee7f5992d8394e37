use winit::dpi::PhysicalSize;

use super::control::{FrameOutcome, FrameStats, LoopControl, LoopEvent};
use super::target::FrameTarget;

/// Per-window frame driver.
///
/// Handles resize/quit events and runs the acquire → render → present
/// sequence against a [`FrameTarget`]. Resizes are applied synchronously, so
/// the next frame always sees a surface configured at the latest size.
pub struct FrameLoop<T> {
    target: T,
    configured: PhysicalSize<u32>,
    minimized: bool,
    stats: FrameStats,
}

impl<T: FrameTarget> FrameLoop<T> {
    pub fn new(target: T) -> Self {
        let configured = target.size();
        Self {
            target,
            configured,
            minimized: false,
            stats: FrameStats::default(),
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Applies a platform event.
    pub fn handle_event(&mut self, event: LoopEvent) -> LoopControl {
        match event {
            LoopEvent::CloseRequested => LoopControl::Exit,
            LoopEvent::Resized(size) => {
                self.resize(size);
                LoopControl::Continue
            }
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            // Minimized: keep the old configuration until a real size arrives.
            self.minimized = true;
            return;
        }
        self.minimized = false;

        // Resize and scale-factor events often report the same size twice.
        if size == self.configured {
            return;
        }

        self.target.reconfigure(size);
        self.configured = size;
        self.stats.reconfigured += 1;
    }

    /// Draws one frame.
    ///
    /// Every per-frame object is released before this returns, whatever the
    /// outcome.
    pub fn redraw(&mut self) -> FrameOutcome {
        if self.minimized {
            self.stats.skipped += 1;
            return FrameOutcome::Skipped;
        }

        let mut frame = match self.target.acquire() {
            Ok(frame) => frame,
            Err(action) if action.is_fatal() => return FrameOutcome::Fatal,
            Err(_) => {
                self.stats.skipped += 1;
                return FrameOutcome::Skipped;
            }
        };

        self.target.render(&mut frame);
        self.target.pre_present();
        self.target.present(frame);

        self.stats.presented += 1;
        FrameOutcome::Presented
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::*;
    use crate::device::SurfaceErrorAction;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Reconfigure(u32, u32),
        Acquire,
        Render,
        PrePresent,
        Present,
    }

    #[derive(Default)]
    struct Counters {
        created: Cell<u32>,
        released: Cell<u32>,
    }

    impl Counters {
        fn live(&self) -> u32 {
            self.created.get() - self.released.get()
        }
    }

    struct MockFrame {
        counters: Rc<Counters>,
        rendered: bool,
    }

    impl Drop for MockFrame {
        fn drop(&mut self) {
            self.counters.released.set(self.counters.released.get() + 1);
        }
    }

    struct MockTarget {
        size: PhysicalSize<u32>,
        calls: Rc<RefCell<Vec<Call>>>,
        counters: Rc<Counters>,
        acquire_errors: VecDeque<SurfaceErrorAction>,
    }

    impl MockTarget {
        fn new(width: u32, height: u32) -> Self {
            Self {
                size: PhysicalSize::new(width, height),
                calls: Rc::default(),
                counters: Rc::default(),
                acquire_errors: VecDeque::new(),
            }
        }
    }

    impl FrameTarget for MockTarget {
        type Frame = MockFrame;

        fn size(&self) -> PhysicalSize<u32> {
            self.size
        }

        fn reconfigure(&mut self, size: PhysicalSize<u32>) {
            assert!(size.width > 0 && size.height > 0);
            self.calls.borrow_mut().push(Call::Reconfigure(size.width, size.height));
            self.size = size;
        }

        fn acquire(&mut self) -> Result<MockFrame, SurfaceErrorAction> {
            self.calls.borrow_mut().push(Call::Acquire);
            if let Some(action) = self.acquire_errors.pop_front() {
                return Err(action);
            }
            self.counters.created.set(self.counters.created.get() + 1);
            Ok(MockFrame {
                counters: self.counters.clone(),
                rendered: false,
            })
        }

        fn render(&mut self, frame: &mut MockFrame) {
            self.calls.borrow_mut().push(Call::Render);
            frame.rendered = true;
        }

        fn pre_present(&mut self) {
            self.calls.borrow_mut().push(Call::PrePresent);
        }

        fn present(&mut self, frame: MockFrame) {
            assert!(frame.rendered, "presented a frame that was never rendered");
            self.calls.borrow_mut().push(Call::Present);
        }
    }

    fn setup() -> (FrameLoop<MockTarget>, Rc<RefCell<Vec<Call>>>, Rc<Counters>) {
        let target = MockTarget::new(640, 480);
        let calls = target.calls.clone();
        let counters = target.counters.clone();
        (FrameLoop::new(target), calls, counters)
    }

    fn resized(w: u32, h: u32) -> LoopEvent {
        LoopEvent::Resized(PhysicalSize::new(w, h))
    }

    // ── events ────────────────────────────────────────────────────────────

    #[test]
    fn close_requested_exits() {
        let (mut fl, calls, _) = setup();
        assert_eq!(fl.handle_event(LoopEvent::CloseRequested), LoopControl::Exit);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn resize_reconfigures_once_before_next_draw() {
        let (mut fl, calls, _) = setup();
        assert_eq!(fl.handle_event(resized(800, 600)), LoopControl::Continue);
        assert_eq!(fl.redraw(), FrameOutcome::Presented);

        assert_eq!(
            *calls.borrow(),
            [
                Call::Reconfigure(800, 600),
                Call::Acquire,
                Call::Render,
                Call::PrePresent,
                Call::Present,
            ]
        );
        assert_eq!(fl.stats().reconfigured, 1);
        assert_eq!(fl.target().size(), PhysicalSize::new(800, 600));
    }

    #[test]
    fn duplicate_resize_reconfigures_once() {
        let (mut fl, calls, _) = setup();
        fl.handle_event(resized(1024, 768));
        fl.handle_event(resized(1024, 768));
        let reconfigures = calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Reconfigure(..)))
            .count();
        assert_eq!(reconfigures, 1);
    }

    #[test]
    fn resize_to_current_size_is_ignored() {
        let (mut fl, calls, _) = setup();
        fl.handle_event(resized(640, 480));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn zero_dimension_does_not_reconfigure() {
        let (mut fl, calls, _) = setup();
        fl.handle_event(resized(0, 480));
        fl.handle_event(resized(640, 0));
        fl.handle_event(resized(0, 0));
        assert!(calls.borrow().is_empty());
        assert_eq!(fl.stats().reconfigured, 0);
    }

    #[test]
    fn minimized_window_skips_frames_until_restored() {
        let (mut fl, calls, _) = setup();
        fl.handle_event(resized(0, 0));
        assert_eq!(fl.redraw(), FrameOutcome::Skipped);
        assert!(calls.borrow().is_empty());

        fl.handle_event(resized(320, 240));
        assert_eq!(fl.redraw(), FrameOutcome::Presented);
        assert_eq!(calls.borrow()[0], Call::Reconfigure(320, 240));
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn frames_release_everything_they_create() {
        let (mut fl, _, counters) = setup();
        for _ in 0..120 {
            assert_eq!(fl.redraw(), FrameOutcome::Presented);
            assert_eq!(counters.live(), 0);
        }
        assert_eq!(counters.created.get(), 120);
        assert_eq!(counters.released.get(), 120);
        assert_eq!(fl.stats().presented, 120);
    }

    #[test]
    fn transient_acquire_failure_skips_frame_then_recovers() {
        let (mut fl, calls, counters) = setup();
        fl.target.acquire_errors.push_back(SurfaceErrorAction::Reconfigured);
        fl.target.acquire_errors.push_back(SurfaceErrorAction::SkipFrame);

        assert_eq!(fl.redraw(), FrameOutcome::Skipped);
        assert_eq!(fl.redraw(), FrameOutcome::Skipped);
        assert_eq!(fl.redraw(), FrameOutcome::Presented);

        assert_eq!(
            *calls.borrow(),
            [
                Call::Acquire,
                Call::Acquire,
                Call::Acquire,
                Call::Render,
                Call::PrePresent,
                Call::Present,
            ]
        );
        assert_eq!(counters.live(), 0);
        assert_eq!(fl.stats().skipped, 2);
        assert_eq!(fl.stats().presented, 1);
    }

    #[test]
    fn skipped_and_minimized_frames_never_reach_presentation() {
        let (mut fl, calls, _) = setup();
        fl.target.acquire_errors.push_back(SurfaceErrorAction::Reconfigured);
        fl.target.acquire_errors.push_back(SurfaceErrorAction::SkipFrame);
        assert_eq!(fl.redraw(), FrameOutcome::Skipped);
        assert_eq!(fl.redraw(), FrameOutcome::Skipped);

        fl.handle_event(resized(0, 0));
        assert_eq!(fl.redraw(), FrameOutcome::Skipped);

        let count = |wanted: Call| calls.borrow().iter().filter(|c| **c == wanted).count();
        assert_eq!(count(Call::PrePresent), 0);
        assert_eq!(count(Call::Present), 0);

        fl.handle_event(resized(640, 480));
        assert_eq!(fl.redraw(), FrameOutcome::Presented);
        assert_eq!(count(Call::PrePresent), 1);
        assert_eq!(count(Call::Present), 1);
    }

    #[test]
    fn fatal_acquire_failure_is_reported() {
        let (mut fl, _, counters) = setup();
        fl.target.acquire_errors.push_back(SurfaceErrorAction::Fatal);
        assert_eq!(fl.redraw(), FrameOutcome::Fatal);
        assert_eq!(counters.created.get(), 0);
    }
}
