//! Calendar use cases over a stored event collection

pub mod ports;
pub mod service;

pub use ports::*;
pub use service::*;
