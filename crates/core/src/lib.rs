//! Core simulator primitives and traits.

pub mod clock;
pub mod console;
pub mod logging;

use serde_json::Value;

/// A high-level System trait tying a simulated machine to a frontend.
pub trait System {
    type Error: std::error::Error + Send + Sync + 'static;

    /// What a single frame step reports back to the caller.
    type Frame;

    /// Reset to initial power-on state
    fn reset(&mut self);

    /// Advance exactly one frame.
    fn step_frame(&mut self) -> Result<Self::Frame, Self::Error>;

    /// Return a JSON snapshot of the machine for debugging.
    /// This is a read-only view; it is never loaded back.
    fn debug_state(&self) -> Value;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockSystem {
        frames: u32,
    }

    impl System for MockSystem {
        type Error = std::convert::Infallible;
        type Frame = u32;

        fn reset(&mut self) {
            self.frames = 0;
        }

        fn step_frame(&mut self) -> Result<u32, Self::Error> {
            self.frames += 1;
            Ok(self.frames)
        }

        fn debug_state(&self) -> serde_json::Value {
            serde_json::json!({"mock": true, "frames": self.frames})
        }
    }

    #[test]
    fn mock_system_steps_and_resets() {
        let mut sys = MockSystem { frames: 0 };
        assert_eq!(sys.step_frame().unwrap(), 1);
        assert_eq!(sys.step_frame().unwrap(), 2);
        sys.reset();
        assert_eq!(sys.step_frame().unwrap(), 1);
    }

    #[test]
    fn mock_system_debug_state_is_json() {
        let mut sys = MockSystem { frames: 0 };
        sys.step_frame().unwrap();
        let v = sys.debug_state();
        let s = serde_json::to_string(&v).expect("serialize");
        let v2: serde_json::Value = serde_json::from_str(&s).expect("deserialize");
        assert_eq!(v2["frames"], 1);
    }
}
