//! Core types and definitions for the LASERWING simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, input, state snapshots, events, constants and
//! tunable configuration. It has no dependency on any runtime.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod state;
pub mod types;
