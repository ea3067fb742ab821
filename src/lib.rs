// Vital Feed - simulated vital-signs telemetry
// Library surface; the vitalfeed binary wires these modules together

pub mod cli;
pub mod config;
pub mod credentials;
pub mod feed;
pub mod observability;
pub mod signals;
pub mod sink;
pub mod vitals;
