//! Crate-level tests and test doubles for the external services.

pub(crate) mod mocks;

mod pipeline;
