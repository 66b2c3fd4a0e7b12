/// Metric names used when recording a timed transaction.
#[derive(Copy, Clone, Debug)]
pub struct TransactionLabels {
    pub success: &'static str,
    pub error: &'static str,
    pub latency: &'static str,
}

/// Labels for the built-in HTTP transaction.
pub const HTTP_LABELS: TransactionLabels = TransactionLabels {
    success: "http_req_success",
    error: "http_req_error",
    latency: "http_req_latency",
};
