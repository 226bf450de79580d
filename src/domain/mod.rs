// Domain layer: records, star references, operations and the ports (traits)
// the client is built on. No transport code here.

pub mod model;
pub mod operation;
pub mod ports;
pub mod reference;
