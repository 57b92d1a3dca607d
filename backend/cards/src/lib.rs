//! Types to handle card masking and validation.

mod validate;

pub use validate::{CardNumber, CardNumberStrategy, CardNumberValidationErr};
