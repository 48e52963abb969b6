// Domain layer: input/output models, the per-seller accumulator and ports (policy traits, storage, config).

pub mod model;
pub mod ports;
pub mod stats;
