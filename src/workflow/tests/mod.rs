//! Unit tests for the workflow context.

mod audit_tests;
