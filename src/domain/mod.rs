// Domain layer: records, statistics types and the ports the pipeline is built on.

pub mod model;
pub mod ports;
