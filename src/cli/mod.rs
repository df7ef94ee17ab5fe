//! CLI infrastructure for questlearn
//!
//! This module provides the command-line interface for training agents on
//! table-driven worlds and evaluating saved models.

pub mod commands;
pub mod output;
