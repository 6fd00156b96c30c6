//! Time subsystem.
//!
//! Frame pacing independent of the runtime. Callers pass `Instant`s in, so
//! tests can drive a throttle with a simulated clock.

mod throttle;

pub use throttle::{FrameThrottle, FRAME_INTERVAL_60HZ};
