//! Cryptographic adapters: password hashing and session token signing.

mod argon2_hasher;
mod hmac_tokens;

pub use argon2_hasher::Argon2PasswordHasher;
pub use hmac_tokens::HmacTokenService;
