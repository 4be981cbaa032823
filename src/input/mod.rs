pub mod handler;

pub use handler::{DEFAULT_SWIPE_THRESHOLD, InputHandler, KeyAction, SwipeTracker};
