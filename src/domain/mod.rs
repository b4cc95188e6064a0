// Domain layer: models, the call context and the collaborator ports.

pub mod context;
pub mod model;
pub mod ports;
