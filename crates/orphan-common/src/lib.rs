//! Common types and utilities for the orphan analyzer.
//!
//! This crate provides foundational types used across all orphan crates:
//! - String interning (`Atom`, `Interner`)
//! - Source spans (`Span`)
//! - Line/column positions (`LineMap`, `Position`)
//! - Diagnostic severity (`Severity`)
//! - Analysis limits and thresholds

// String interning for identifier deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// Severity shared by rule configuration and reporting
pub mod severity;
pub use severity::Severity;

// Centralized limits and thresholds
pub mod limits;
