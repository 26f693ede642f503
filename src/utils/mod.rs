pub mod digest;
pub mod validate;

pub use digest::md5_hex;
pub use validate::{EmailAddress, PhoneNumber};
