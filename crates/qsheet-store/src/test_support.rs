//! Shared test utilities for qsheet-store unit tests.
