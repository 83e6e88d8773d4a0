//! Response building helpers shared by all routes

pub mod error;
