pub mod auth_gate;
pub mod hashing;
pub mod jwt;
pub mod security;
