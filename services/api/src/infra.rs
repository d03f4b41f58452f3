use career_compass::assessments::TestType;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_test_type(raw: &str) -> Result<TestType, String> {
    raw.trim().parse::<TestType>().map_err(|err| err.to_string())
}
