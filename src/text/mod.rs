//! Pure text helpers shared by the FAQ matcher and the intent rules.

pub mod distance;
pub mod normalize;

pub use distance::{distance, within};
pub use normalize::normalize;
