//! Client for the backend telemetry source.
//!
//! Used when a caller asks for an evaluation without supplying component
//! data: the service pulls the most recent readings from the backend
//! instead. Fetch failures are soft and surface as an empty batch.

pub mod client;

pub use client::{BackendDataClient, TelemetryClientError, TelemetryEnvelope};
