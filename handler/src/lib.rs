//! # Custom Message Sender Handler
//!
//! Entry point for the identity provider's custom sender trigger: event
//! decoding, channel routing, error-class enforcement and one-shot service
//! initialization.

pub mod app;
pub mod boundary;
pub mod event;
pub mod telemetry;


pub use app::{App, AwsSenderFactory, EnvSource, SenderFactory};
pub use boundary::{TriggerBoundary, TriggerRoute};
pub use event::CustomSenderEvent;
