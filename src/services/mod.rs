pub mod investment_service;
pub mod validation;
