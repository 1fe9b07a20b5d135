// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Laws of behaviors and of the behavior/series bridge.

mod behavior_laws;
mod bridge_laws;
