pub mod channel;
pub mod correlator;
pub mod watchdog;
