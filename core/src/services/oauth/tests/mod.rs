//! Tests for OAuth sign-in service
