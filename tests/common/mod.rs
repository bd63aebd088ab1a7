//! Shared helpers for integration tests

use std::sync::{Arc, Mutex};

use custodia::application::{Report, ReportSink};
use custodia::config::AzureConfig;
use custodia::infrastructure::{AzureResourceClient, StaticTokenProvider};

/// Sink that records everything the audit emits.
#[derive(Default)]
pub struct RecordingSink {
    pub lines: Mutex<Vec<String>>,
    pub reports: Mutex<Vec<Report>>,
}

impl ReportSink for RecordingSink {
    fn line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }

    fn deliver(&self, report: &Report) {
        self.reports.lock().unwrap().push(report.clone());
    }
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn sole_report(&self) -> Report {
        let reports = self.reports.lock().unwrap();
        assert_eq!(reports.len(), 1, "expected exactly one delivered report");
        reports[0].clone()
    }
}

/// Resource Manager client pointed at a mock ARM server, with a
/// pre-acquired token so no token endpoint is needed.
pub fn arm_client(base_url: String) -> Arc<AzureResourceClient> {
    let config = AzureConfig {
        management_url: base_url,
        tenant_id: "tenant".to_string(),
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        ..AzureConfig::default()
    };
    Arc::new(
        AzureResourceClient::new(&config, Arc::new(StaticTokenProvider::new("test-token")))
            .expect("client should build"),
    )
}
