//! Tests for content service
