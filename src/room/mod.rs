pub mod namer;
pub mod registry;
