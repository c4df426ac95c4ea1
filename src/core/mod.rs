// Core module - Dataset policies and the remote query client
pub mod dataset;
pub mod socrata;
