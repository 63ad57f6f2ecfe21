//! Unit tests for project ownership and membership.
