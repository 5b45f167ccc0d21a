pub mod assignment;
pub mod error;
pub mod maximum_flow;

pub use error::FlowError;
