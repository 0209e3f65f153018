//! Command-line monitor for the voice radio status SDK.

pub mod cli;
pub mod sdk_client;
