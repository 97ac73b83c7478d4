//! Random Adapters - `RandomSource` implementations.
//!
//! - `ThreadRandomSource` - thread-local generator, the production default
//! - `SeededRandomSource` - reproducible draws from a configured seed
//! - `FixedRandomSource` - always returns the same index (tests and demos)

mod fixed;
mod seeded;
mod thread;

pub use fixed::FixedRandomSource;
pub use seeded::SeededRandomSource;
pub use thread::ThreadRandomSource;
