//! Pure data structures (DTOs) for the magazine domain.

pub mod category;

pub use category::*;
