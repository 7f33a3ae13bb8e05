pub mod revision;
pub mod syntax;
