//! Value resolution services
//!
//! The read-path pipeline: fetch raw XML, extract the value node, apply
//! the unit conversion policy, and schedule the whole thing per sensor.

pub mod convert;
pub mod poller;
pub mod value_resolution;
pub mod xml;

pub use poller::PollScheduler;
pub use value_resolution::{Reading, StateValue, ValueResolver};
