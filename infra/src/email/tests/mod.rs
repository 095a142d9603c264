//! Tests for email notifiers
