// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Laws of the dashboard aggregation: conservation of revenue across the
//! sales series, range independence of global sections, determinism, and
//! the shape of period-over-period changes.

mod engine_laws;
