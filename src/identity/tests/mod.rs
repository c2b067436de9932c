//! Tests for channel classification and canonical code assignment

mod rules_tests;
