//! Bearer token verification.
//!
//! Tokens are HS256 JWTs whose `sub` claim is the acting user's ID.
//! PixelHub only verifies them; [`JwtEncoder`] exists for operators and
//! tests that need to mint one.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
