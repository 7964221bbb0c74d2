mod investment;
mod validation;

pub use investment::{Investment, InvestmentInput, InvestmentType, TypeCount};
pub use validation::{ErrorBody, FieldError, ValidationErrorBody};
