//! Testing infrastructure for chatlog integration tests.
//!
//! This crate provides utilities for writing end-to-end tests:
//! - `TestWorld`: isolated environment wired to a fake API
//! - `api`: the fake GenAI management API
//! - `fixtures`: agent and session payload builders
//! - `assertions`: checks over exported tables

pub mod api;
pub mod assertions;
pub mod fixtures;
pub mod world;

pub use api::FakeApi;
pub use fixtures::{AgentFixture, SessionFixture};
pub use world::{CliResult, TestWorld};
