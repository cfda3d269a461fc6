//! Test harness for the Launchpad server.
//!
//! Provides an in-memory SQLite database, a memory-backed session, table
//! creation macros, and fixture factories for the entities tests lean on
//! most (users and the project graph). Kept in its own crate so both unit
//! tests inside the server crate and integration tests under `tests/` share
//! one setup path.

pub mod error;
pub mod fixtures;
pub mod setup;

pub use error::TestError;
pub use setup::{TestAppState, TestSetup};

pub mod prelude {
    pub use crate::{
        test_setup, test_setup_with_core_tables, test_setup_with_tables, TestError, TestSetup,
    };
}
