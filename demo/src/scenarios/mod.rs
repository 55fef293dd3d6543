//! Demo scenarios exercising the CURA components end to end.

pub mod adaptor;
pub mod station;
