//! QIT: Quality Inspection Toolkit
//!
//! A Unix-style toolkit for managing inspection records as plain text
//! files and deriving multi-dimensional quality reports from them.

pub mod analytics;
pub mod cli;
pub mod core;
pub mod entities;
pub mod yaml;
