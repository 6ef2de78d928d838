use serde_json::json;
use stackweave_core::{AddonUnit, Document, GlobalSettings, MarkerPair, ToggleDirective};

/// Collector configuration with optional scrape jobs and pipeline sections
#[allow(dead_code)]
pub const COLLECTOR_TEMPLATE: &str = r#"receivers:
  prometheus:
    config:
      scrape_configs:
        - job_name: kubelet
{{ start enableJavaMonJob }}
        - job_name: java
          static_configs: [{ targets: ["java:9404"] }]
{{ stop enableJavaMonJob }}
{{ start enableNginxMonJob }}
        - job_name: nginx
{{ stop enableNginxMonJob }}
{{ start enableAdotContainerLogsReceiver }}
  filelog:
    include: [/var/log/pods/*/*/*.log]
{{ stop enableAdotContainerLogsReceiver }}
exporters:
  awscloudwatchlogs:
    log_group_name: "{{logGroupName}}"
    log_stream_name: "{{logStreamName}}"
    log_retention: {{logRetentionDays}}
    region: {{awsRegion}}
"#;

#[allow(dead_code)]
pub fn collector_template() -> Document {
    Document::from(COLLECTOR_TEMPLATE)
}

/// Directives with per-marker keep policy
#[allow(dead_code)]
pub fn collector_directives() -> Vec<ToggleDirective> {
    vec![
        ToggleDirective::remove(MarkerPair::named("enableJavaMonJob")),
        ToggleDirective::remove(MarkerPair::named("enableNginxMonJob")),
        ToggleDirective::keep(MarkerPair::named("enableAdotContainerLogsReceiver")),
    ]
}

#[allow(dead_code)]
pub fn settings() -> GlobalSettings {
    GlobalSettings::new("111122223333", "us-west-2", "1.31")
}

/// Unit with an empty structured payload
#[allow(dead_code)]
pub fn unit(name: &str) -> AddonUnit {
    AddonUnit::with_values(name, json!({}))
}
