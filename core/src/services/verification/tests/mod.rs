//! Tests for the verification service

pub mod mocks;

mod service_tests;
