//! Unit tests for SMS module

#[cfg(test)]
pub mod aws_sns_tests;
