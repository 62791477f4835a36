pub mod config;
pub mod ports;
pub mod result;
pub mod session;
pub mod signal;
