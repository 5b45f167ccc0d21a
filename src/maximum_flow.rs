pub mod capacity;
mod csr;
pub mod dinic;
pub mod edmonds_karp;
pub mod ford_fulkerson;
pub mod graph;

use crate::error::FlowError;
use crate::maximum_flow::graph::FlowNetwork;
use num_traits::NumAssign;

/// An augmenting-path style maximum flow algorithm.
///
/// `solve` continues from the flow already stored in `graph`, writes the final
/// flow of every edge back into it and returns the flow leaving `source`.
pub trait MaximumFlowSolver<Flow> {
    fn solve(&mut self, source: usize, sink: usize, graph: &mut FlowNetwork<Flow>) -> Result<Flow, FlowError>;
}

pub(crate) fn check_network<Flow>(source: usize, sink: usize, graph: &FlowNetwork<Flow>) -> Result<(), FlowError>
where
    Flow: NumAssign + Ord + Copy,
{
    let num_nodes = graph.num_nodes();
    for vertex in [source, sink] {
        if vertex >= num_nodes {
            return Err(FlowError::InvalidVertex { vertex, num_nodes });
        }
    }
    if source != sink && graph.has_unbounded_path(source, sink) {
        return Err(FlowError::UnboundedFlow { from: source, to: sink });
    }
    Ok(())
}
