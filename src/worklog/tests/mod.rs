//! Unit tests for the work-log context.
