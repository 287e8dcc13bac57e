// Internal modules
mod encode;
mod header;
mod parsed;
mod raw;
#[allow(clippy::module_inception)]
mod token;

// Public API exports
pub use encode::new_token;
pub use header::TokenHeader;
pub use parsed::parse_raw_token;
pub use raw::RawToken;
pub use token::Token;
