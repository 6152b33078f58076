//! Cook-timer jog dial.
//!
//! [`DialController`] owns one dial: it turns rotate/press/aux inputs into a
//! bounded temperature or duration, runs the cook cycle
//! (setup → starting → preheat → cooking → complete) on wall-clock time and
//! produces a [`RenderFrame`] describing every tick of the ring.

pub mod animation;
pub mod config;
pub mod dial;
pub mod error;

pub use config::Config;
pub use dial::{Action, DialController, InputOutcome, Lifecycle, Mode, RenderFrame};
pub use error::{DialError, DialResult};
