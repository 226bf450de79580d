pub mod facade;
pub mod resolver;
