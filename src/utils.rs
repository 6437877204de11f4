//! Utility functions shared across the detector pipeline.

pub mod safe_cast;
