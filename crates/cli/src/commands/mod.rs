//! Subcommand implementations. Each prints to stdout and logs to stderr.

#![allow(clippy::print_stdout)]

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod products;
pub mod seller;
pub mod session;
