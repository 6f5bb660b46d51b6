pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::Token;
pub use errors::DecodeError;
pub use errors::EncodingError;
pub use errors::ValidationError;
