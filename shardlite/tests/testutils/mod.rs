//! Test utilities for ShardLite integration tests
//!
//! `TestFixture` builds a fresh database with one session and a uniquely
//! named schema, so tests stay independent when run in parallel.

pub mod test_fixture;
