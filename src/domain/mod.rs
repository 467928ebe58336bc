// Domain layer: models and ports (interfaces) shared by the parser core and the intake pipeline.

pub mod model;
pub mod ports;
