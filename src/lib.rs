pub mod manifest;
pub mod registry;
pub mod resolver;
pub mod runtime;
pub mod update;
