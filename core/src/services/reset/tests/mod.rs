//! Tests for password-reset service
