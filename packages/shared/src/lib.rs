//! Shared utilities for the Parley workspace.
//!
//! Logging bootstrap and the JST clock helpers used by every binary.

pub mod logger;
pub mod time;
