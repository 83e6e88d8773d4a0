//! Tests for the authentication service

pub mod mocks;
