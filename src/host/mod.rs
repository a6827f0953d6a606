//! Host-facing interfaces.
//!
//! The hosting voice framework owns the request lifecycle. This module only
//! describes what the notifier needs from it:
//! - `RequestContext`: per-request accessors implemented by each platform adapter
//! - `HostEnvironment`: where the app runs (serverless or generic)
//! - `RawRequestEnvelope`: typed, all-optional view of the raw platform request
//! - `Plugin`: the hook surface the host calls into

pub mod context;
pub mod environment;
pub mod payload;
pub mod plugin;

pub use context::{PlatformKind, RequestContext, RequestSnapshot};
pub use environment::{HostEnvironment, LambdaContext};
pub use payload::{RawRequestBody, RawRequestEnvelope, RawRequestError};
pub use plugin::{ErrorClassification, ErrorReport, HandleRequest, Middleware, Plugin};
