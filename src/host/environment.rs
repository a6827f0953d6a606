//! Host environment descriptor

use serde::{Deserialize, Serialize};

/// Identifiers an AWS Lambda invocation exposes through its context object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LambdaContext {
    pub aws_request_id: String,
    /// e.g. `arn:aws:lambda:eu-west-1:123456789012:function:my-skill`
    pub invoked_function_arn: String,
    pub log_group_name: String,
    pub log_stream_name: String,
}

impl LambdaContext {
    /// Region component of the function ARN (fourth `:`-separated element)
    pub fn region(&self) -> Option<&str> {
        self.invoked_function_arn
            .split(':')
            .nth(3)
            .filter(|region| !region.is_empty())
    }
}

/// Where the voice app is running.
///
/// The host adapter supplies the tag explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostEnvironment {
    /// AWS Lambda, with the invocation's identifiers
    Lambda(LambdaContext),
    /// Any other host (express server, local webhook, tests)
    #[default]
    Generic,
}

impl HostEnvironment {
    pub fn as_lambda(&self) -> Option<&LambdaContext> {
        match self {
            HostEnvironment::Lambda(context) => Some(context),
            HostEnvironment::Generic => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HostEnvironment::Lambda(_) => "Lambda",
            HostEnvironment::Generic => "Generic",
        }
    }
}
