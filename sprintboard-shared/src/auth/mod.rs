//! Authentication utilities: Argon2id password hashing and HS256 session
//! tokens.

pub mod jwt;
pub mod password;
