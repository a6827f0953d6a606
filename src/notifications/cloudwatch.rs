//! CloudWatch deep links for Lambda-hosted apps.
//!
//! The console's `logsV2` fragment double-encodes reserved characters with
//! `$25` in place of `%`, so the link is assembled with literal replacements
//! rather than a URI encoder.

use super::message::{Field, NotificationMessage};
use crate::host::{HostEnvironment, LambdaContext};

pub const CLOUDWATCH_FIELD_TITLE: &str = "Cloudwatch URL";

const SLASH: &str = "$252F";
const DOLLAR: &str = "$2524";
const LEFT_BRACKET: &str = "$255B";
const RIGHT_BRACKET: &str = "$255D";

/// Log-events URL filtered on the invocation's request id.
///
/// Returns `None` when the function ARN carries no region.
pub fn cloudwatch_url(context: &LambdaContext) -> Option<String> {
    let region = context.region()?;

    let base_url = format!(
        "https://{region}.console.aws.amazon.com/cloudwatch/home?region={region}#logsV2:log-groups/log-group/"
    );
    let log_group = format!("{}/log-events/", context.log_group_name.replace('/', SLASH));
    // Only the first occurrence of `$`, `[` and `]` is escaped
    let log_stream = context
        .log_stream_name
        .replacen('$', DOLLAR, 1)
        .replacen('[', LEFT_BRACKET, 1)
        .replacen(']', RIGHT_BRACKET, 1)
        .replace('/', SLASH);
    let filter_pattern = format!("$3Ffilterpattern$3D$252{}", context.aws_request_id);

    Some(base_url + &log_group + &log_stream + &filter_pattern)
}

/// Appends the `Cloudwatch URL` field when running on Lambda.
///
/// Any other host, or a Lambda context without a usable region, leaves the
/// message unchanged.
pub fn enrich_with_execution_log_link(
    mut message: NotificationMessage,
    host: &HostEnvironment,
) -> NotificationMessage {
    let Some(context) = host.as_lambda() else {
        return message;
    };

    match cloudwatch_url(context) {
        Some(url) => {
            message.push_field(Field::short(
                CLOUDWATCH_FIELD_TITLE,
                Some(format!("<{}|Cloudwatch Log URL>", url)),
            ));
        }
        None => {
            tracing::warn!(
                arn = %context.invoked_function_arn,
                "Function ARN has no region, skipping Cloudwatch link"
            );
        }
    }

    message
}
