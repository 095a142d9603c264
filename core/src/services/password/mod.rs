//! Password hashing service (bcrypt)

mod hasher;

pub use hasher::PasswordHasher;
