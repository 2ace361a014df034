//! Authentication infrastructure

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtTokenSigner, TokenSigner};
