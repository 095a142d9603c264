//! Tests for the OAuth client

#[cfg(test)]
mod client_tests;
