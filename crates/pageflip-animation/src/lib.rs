//! Tick-driven animation math for the page-flip engine.
//!
//! These animations own no clock: the engine advances them with explicit
//! `tick(dt_ms)` calls and reads the produced flip-distance value, which
//! keeps every animation resumable, cancelable, and unit-testable without
//! a frame scheduler.

pub mod easing;
pub mod peek;
pub mod settle;

pub use easing::Easing;
pub use peek::PeekAnimation;
pub use settle::SettleAnimation;
