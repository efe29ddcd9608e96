//! Animation state for turns in progress.

mod interpolate;
mod turn;

pub use interpolate::InterpolateFn;
pub use turn::{TurnAnimation, TurnAnimationState};
