//! The animation driver.  Owns the frame counter, and on a fixed
//! cadence turns it into a fresh index array and hands that to the
//! renderer.  One tick at a time; the only waiting is for the next
//! tick's deadline.

use std::thread;
use std::time::{Duration, Instant};

use cycle::ColorCycler;
use errors::FieldError;
use render::{Control, Renderer};

/// How many frames to show.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Frames {
    /// Frames `0..n`, then stop.
    Count(u64),
    /// Until the renderer asks to stop.  The counter keeps growing;
    /// since frames repeat with the palette period this looks the same
    /// as restarting it.
    Forever,
}

impl Frames {
    fn includes(&self, frame_counter: u64) -> bool {
        match *self {
            Frames::Count(n) => frame_counter < n,
            Frames::Forever => true,
        }
    }
}

/// Drives a `ColorCycler` into a `Renderer`.
#[derive(Debug)]
pub struct Animator {
    cycler: ColorCycler,
    frames: Frames,
    interval: Duration,
}

impl Animator {
    /// `interval` is the target delay between the starts of
    /// successive frames.
    pub fn new(cycler: ColorCycler, frames: Frames, interval: Duration) -> Self {
        Animator {
            cycler,
            frames,
            interval,
        }
    }

    /// The colour cycler being animated.
    pub fn cycler(&self) -> &ColorCycler {
        &self.cycler
    }

    /// Runs until the frame count is exhausted, the renderer asks to
    /// stop, or the renderer fails.  The renderer is always finished
    /// before returning.  Returns the number of frames shown.
    pub fn run<R: Renderer>(&self, renderer: &mut R) -> Result<u64, FieldError> {
        info!(
            "animating {:?} at {}ms per frame, period {}",
            self.frames,
            self.interval.as_millis(),
            self.cycler.period()
        );
        let result = self.tick_loop(renderer);
        let finished = renderer.finish();
        let shown = result?;
        finished?;
        info!("animation stopped after {} frames", shown);
        Ok(shown)
    }

    fn tick_loop<R: Renderer>(&self, renderer: &mut R) -> Result<u64, FieldError> {
        let start = Instant::now();
        let mut frame_counter: u64 = 0;
        while self.frames.includes(frame_counter) {
            renderer.set_array(&self.cycler.frame(frame_counter))?;
            let control = renderer.redraw()?;
            trace!("frame {} drawn", frame_counter);
            frame_counter += 1;
            if control == Control::Stop || !self.frames.includes(frame_counter) {
                break;
            }
            self.wait_for(start, frame_counter);
        }
        Ok(frame_counter)
    }

    // Deadlines are measured from the start so that slow frames do
    // not accumulate drift.
    fn wait_for(&self, start: Instant, frame_counter: u64) {
        if self.interval == Duration::from_millis(0) {
            return;
        }
        let ticks = frame_counter.min(u64::from(::std::u32::MAX)) as u32;
        let deadline = start + self.interval * ticks;
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
    }
}
