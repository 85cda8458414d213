//! Foundation types shared across the domain layer.

mod errors;
mod persona;

pub use errors::ValidationError;
pub use persona::Persona;
