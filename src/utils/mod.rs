pub mod address_validator;
pub mod units;

pub use address_validator::AddressValidator;
