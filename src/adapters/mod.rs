// Adapters layer: concrete implementations for external systems (http backend, result output).

pub mod http;
pub mod output;
