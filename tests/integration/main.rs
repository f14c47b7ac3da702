//! Integration tests for subcue

mod cli_test;
mod helpers;
mod timeline_test;
