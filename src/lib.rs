//! Shift pay engine for hourly work under Japanese premium rules
//!
//! This crate prices a single shift: worked minutes are split into day and
//! night time, the unpaid break is deducted, minutes past the daily overtime
//! threshold are separated out, and the 25% overtime and night premiums are
//! added to base pay. Every calculation carries an audit trail.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
