//! UserService and request validation.

mod crud;
mod validation;
pub use crud::UserService;
pub use validation::{as_integer, FieldKind, RequestValidator, ValidationRule};
