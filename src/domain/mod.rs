// Domain layer: core models and ports (interfaces). No browser dependencies here.

pub mod model;
pub mod ports;
