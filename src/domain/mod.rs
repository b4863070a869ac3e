// Domain layer: period model, month values and ports. Nothing here performs I/O.

pub mod bounds;
pub mod model;
pub mod month;
pub mod ports;
