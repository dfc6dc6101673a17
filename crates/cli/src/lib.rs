pub mod commands;
pub mod variant;

pub use variant::Variant;
