// Application layer: pipelines wiring ports to the pricing core.

pub mod pipelines;
