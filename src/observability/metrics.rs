use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use crate::domain::{ErrorKind, Outcome};
use crate::interpreter::{AuditRecord, AuditSink};

/// Evaluation counters, fed as an audit sink.
#[derive(Debug, Default)]
pub struct EvalMetrics {
    /// Root rule evaluations
    pub evaluations_total: AtomicU64,
    pub evaluations_failed: AtomicU64,

    /// Operator applications at any depth
    pub operator_calls_total: AtomicU64,
    pub operator_calls_failed: AtomicU64,

    /// Failed root evaluations by error kind, indexed as `ErrorKind::ALL`
    failures_by_kind: [AtomicU64; ErrorKind::COUNT],
}

impl EvalMetrics {
    /// Create a new metrics registry.
    pub fn new() -> Self {
        EvalMetrics::default()
    }

    /// Failed root evaluations of one kind.
    pub fn failures(&self, kind: ErrorKind) -> u64 {
        self.failures_by_kind[kind_index(kind)].load(Ordering::Relaxed)
    }

    /// Export metrics in Prometheus format.
    pub fn to_prometheus(&self) -> String {
        let mut out = format!(
            r#"# HELP offerule_evaluations_total Total rule evaluations
# TYPE offerule_evaluations_total counter
offerule_evaluations_total {}

# HELP offerule_evaluations_failed_total Rule evaluations ending in an error
# TYPE offerule_evaluations_failed_total counter
offerule_evaluations_failed_total {}

# HELP offerule_operator_calls_total Operator applications at any depth
# TYPE offerule_operator_calls_total counter
offerule_operator_calls_total {}

# HELP offerule_operator_calls_failed_total Operator applications returning an error
# TYPE offerule_operator_calls_failed_total counter
offerule_operator_calls_failed_total {}

# HELP offerule_evaluation_failures Failed evaluations by error kind
# TYPE offerule_evaluation_failures counter
"#,
            self.evaluations_total.load(Ordering::Relaxed),
            self.evaluations_failed.load(Ordering::Relaxed),
            self.operator_calls_total.load(Ordering::Relaxed),
            self.operator_calls_failed.load(Ordering::Relaxed),
        );

        for kind in ErrorKind::ALL {
            let _ = writeln!(
                out,
                "offerule_evaluation_failures{{kind=\"{}\"}} {}",
                kind,
                self.failures(kind)
            );
        }

        out
    }
}

impl AuditSink for EvalMetrics {
    fn wants_operands(&self) -> bool {
        false
    }

    fn record(&self, record: &AuditRecord<'_>) {
        self.operator_calls_total.fetch_add(1, Ordering::Relaxed);
        if record.result.is_err() {
            self.operator_calls_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn evaluated(&self, result: &Outcome<Value>) {
        self.evaluations_total.fetch_add(1, Ordering::Relaxed);
        if let Err(e) = result {
            self.evaluations_failed.fetch_add(1, Ordering::Relaxed);
            self.failures_by_kind[kind_index(e.kind())].fetch_add(1, Ordering::Relaxed);
        }
    }
}

fn kind_index(kind: ErrorKind) -> usize {
    ErrorKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::FunctionRegistry;
    use crate::interpreter::Interpreter;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_counts_from_interpreter() {
        let registry = FunctionRegistry::standard().unwrap();
        let metrics = Arc::new(EvalMetrics::new());
        let interpreter = Interpreter::new(&registry).with_audit(metrics.clone());

        let ctx = json!({"bag": {"a": 2, "b": 1}});
        interpreter
            .evaluate(&json!({"inrange": [1, 4, {"sum": ["!bag"]}]}), &ctx)
            .unwrap();
        interpreter.evaluate(&json!({"lte": [1, "hi"]}), &ctx).unwrap_err();

        assert_eq!(metrics.evaluations_total.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.evaluations_failed.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.operator_calls_total.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.operator_calls_failed.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.failures(ErrorKind::TypeValidationFailure), 1);
        assert_eq!(metrics.failures(ErrorKind::UnknownOperator), 0);
    }

    #[test]
    fn test_unknown_operator_counts_as_evaluation() {
        let registry = FunctionRegistry::standard().unwrap();
        let metrics = Arc::new(EvalMetrics::new());
        let interpreter = Interpreter::new(&registry).with_audit(metrics.clone());

        interpreter.evaluate(&json!({"foo": []}), &json!({})).unwrap_err();

        // Lookup failures happen before any operator runs
        assert_eq!(metrics.evaluations_total.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.operator_calls_total.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.failures(ErrorKind::UnknownOperator), 1);
    }

    #[test]
    fn test_prometheus_export() {
        let metrics = EvalMetrics::new();
        metrics.evaluations_total.fetch_add(5, Ordering::Relaxed);

        let output = metrics.to_prometheus();

        assert!(output.contains("offerule_evaluations_total 5"));
        assert!(output.contains("offerule_evaluation_failures{kind=\"path_resolution_failure\"} 0"));
    }
}
