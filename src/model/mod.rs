//! Input types of a rating calculation.

/// Tuning constants and policies of a skill axis.
pub mod config;

/// The timed object stream.
pub mod object;
