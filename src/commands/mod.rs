//! # CLI Command Implementations
//!
//! The tool has a single operation, `deploy`, driven by flat flags that CI
//! fills in from its predefined variables. The module keeps an `Args` struct
//! derived with `clap` and an `execute` function that calls into the
//! `ontest_deploy` library.

pub mod deploy;
