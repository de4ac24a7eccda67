// Domain layer: core models and ports (interfaces) towards the geodata providers.

pub mod model;
pub mod ports;
