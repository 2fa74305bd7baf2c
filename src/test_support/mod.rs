//! Shared helpers for unit tests.

pub(crate) mod socket_guard;
