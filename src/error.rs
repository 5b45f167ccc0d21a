use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("vertex {vertex} is out of range for a network of {num_nodes} vertices")]
    InvalidVertex { vertex: usize, num_nodes: usize },

    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },

    // field names avoid `source`, which thiserror reserves for the cause
    #[error("unbounded edges connect vertex {from} to vertex {to}, the maximum flow is infinite")]
    UnboundedFlow { from: usize, to: usize },

    #[error("capacities and flows do not fit in the flow type")]
    CapacityOverflow,

    #[error("failed to read records: {0}")]
    Io(#[from] std::io::Error),
}

impl FlowError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        FlowError::MalformedRecord { reason: reason.into() }
    }
}
