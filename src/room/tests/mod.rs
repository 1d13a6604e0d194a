//! Unit tests for the room context.
