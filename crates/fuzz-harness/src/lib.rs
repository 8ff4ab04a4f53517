//! Climate Planner Fuzz Harness
//!
//! Reusable proptest strategies for scores, level strings and backend wire
//! objects. Integration tests across the workspace pull them in through the
//! prelude.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fuzz_harness::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_property(wire in full_assessment()) {
//!         // Your test here
//!     }
//! }
//! ```

pub mod generators;

pub mod prelude {
    pub use crate::generators::*;
    pub use proptest::prelude::*;
}

// Re-export proptest for convenience
pub use proptest;
