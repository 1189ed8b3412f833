//! Inbound adapters that translate user requests into use-case calls while
//! keeping presentation details at the edge.
//!
//! The `taskctl` command line lives under [`cli`].

pub mod cli;
