use serde_json::Value;
use std::fmt::Debug;
use tracing::{debug, Level};

use crate::domain::Outcome;

/// One operator application, reported after the call returns.
#[derive(Debug, Clone, Copy)]
pub struct AuditRecord<'a> {
    /// Operator name
    pub operator: &'a str,

    /// Resolved operands, in order, before type validation. Empty when no
    /// installed sink asked for them.
    pub operands: &'a [Outcome<Value>],

    /// What the operator call produced
    pub result: &'a Outcome<Value>,

    /// Nesting depth of the operator node; the rule root is 1
    pub depth: usize,
}

impl AuditRecord<'_> {
    /// True for the outermost operator of an evaluation.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.depth == 1
    }
}

/// Observer of operator applications.
///
/// Sinks see every record but cannot change the result.
pub trait AuditSink: Send + Sync + Debug {
    fn record(&self, record: &AuditRecord<'_>);

    /// Whether `record` reads the operands. When no sink does, the
    /// interpreter skips copying them.
    fn wants_operands(&self) -> bool {
        true
    }

    /// Called once per `evaluate` with its final result, including failures
    /// raised before any operator ran.
    fn evaluated(&self, _result: &Outcome<Value>) {}
}

/// Emits each record as a `debug` tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAudit;

impl AuditSink for TracingAudit {
    fn wants_operands(&self) -> bool {
        tracing::enabled!(Level::DEBUG)
    }

    fn record(&self, record: &AuditRecord<'_>) {
        match record.result {
            Ok(value) => debug!(
                operator = record.operator,
                depth = record.depth,
                operands = ?record.operands,
                result = %value,
                "Operator evaluated"
            ),
            Err(e) => debug!(
                operator = record.operator,
                depth = record.depth,
                operands = ?record.operands,
                error = %e,
                kind = %e.kind(),
                "Operator failed"
            ),
        }
    }
}
