#![doc = include_str!("../README.md")]

pub mod controller;
pub mod error;
pub mod tracing_observer;

pub use controller::*;
pub use error::*;
pub use tracing_observer::*;
