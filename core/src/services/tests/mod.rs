//! Cross-service scenarios
