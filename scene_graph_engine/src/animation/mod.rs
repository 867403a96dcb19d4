//! Animation module
//!
//! Bindings registered at setup and run once per tick by the
//! AnimationDriver, independent rules first, dependent rules second.

mod animation_binding;
mod animation_driver;

pub use animation_binding::{NodeRef, MutationRule, Spin, DependentRule};
pub use animation_driver::{AnimationDriver, BindingKey, TickReport, DEFAULT_TIME_SCALE};
