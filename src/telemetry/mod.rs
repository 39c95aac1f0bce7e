//! Telemetry initialization: structured logging and metric descriptions

use crate::config::TelemetryConfig;
use metrics::{counter, describe_counter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. Call once per process; hosts
/// with their own subscriber should skip this.
pub fn init(config: &TelemetryConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "otp_mail_node=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.log_format == "json" {
        // Flatten event fields so `message` is top-level
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true);
        registry.with(fmt_layer).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    describe_metrics();
}

/// Register metric descriptions and emit initial zero values so exporters
/// list the node's counters before the first delivery.
pub fn describe_metrics() {
    describe_counter!(
        "otp_mail_deliveries_total",
        "OTP email deliveries by result (success or failure kind)"
    );
    describe_counter!(
        "otp_mail_content_probe_total",
        "Reachability probes of file based email content by result"
    );

    counter!("otp_mail_deliveries_total", "result" => "success").absolute(0);
    counter!("otp_mail_content_probe_total", "result" => "reachable").absolute(0);
}
