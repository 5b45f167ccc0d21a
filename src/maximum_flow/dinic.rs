use crate::error::FlowError;
use crate::maximum_flow::csr::CSR;
use crate::maximum_flow::graph::FlowNetwork;
use crate::maximum_flow::{check_network, MaximumFlowSolver};
use log::{debug, info};
use num_traits::{CheckedAdd, NumAssign};
use std::fmt::Display;

#[derive(Default)]
pub struct Dinic<Flow> {
    csr: CSR<Flow>,
    current_edge: Vec<usize>,
}

impl<Flow> MaximumFlowSolver<Flow> for Dinic<Flow>
where
    Flow: NumAssign + Ord + Copy + CheckedAdd + Display,
{
    fn solve(&mut self, source: usize, sink: usize, graph: &mut FlowNetwork<Flow>) -> Result<Flow, FlowError> {
        check_network(source, sink, graph)?;
        if source == sink {
            return Ok(Flow::zero());
        }

        self.csr.build(graph)?;
        self.current_edge.resize(graph.num_nodes(), 0);

        let mut added = Flow::zero();
        let mut phases = 0;
        loop {
            self.csr.update_distances(source, sink);

            // no s-t path
            if self.csr.distances[source] >= self.csr.num_nodes {
                break;
            }

            self.current_edge.copy_from_slice(&self.csr.start[..self.csr.num_nodes]);
            let blocking = self.blocking_flow(source, sink, self.csr.infinity);
            if blocking == Flow::zero() {
                break;
            }
            phases += 1;
            debug!("phase {}: blocking flow of {} units", phases, blocking);
            added += blocking;
        }

        self.csr.set_flow(graph);
        let flow = graph.maximum_flow(source);
        info!("dinic added {} units in {} phases, total flow {}", added, phases, flow);
        Ok(flow)
    }
}

impl<Flow> Dinic<Flow>
where
    Flow: NumAssign + Ord + Copy + CheckedAdd,
{
    // sends at most `limit` units from u towards the sink along admissible edges
    fn blocking_flow(&mut self, u: usize, sink: usize, limit: Flow) -> Flow {
        if u == sink {
            return limit;
        }

        let mut pushed = Flow::zero();
        while self.current_edge[u] < self.csr.start[u + 1] {
            let i = self.current_edge[u];
            if self.csr.is_admissible_edge(u, i) {
                let edge = &self.csr.inside_edge_list[i];
                let (to, residual) = (edge.to, edge.residual_capacity());
                let d = self.blocking_flow(to, sink, residual.min(limit - pushed));
                if d > Flow::zero() {
                    self.csr.push_flow(i, d);
                    pushed += d;
                    // the edge may still have residual capacity
                    if pushed == limit {
                        return pushed;
                    }
                }
            }
            self.current_edge[u] += 1;
        }

        // dead end for the rest of this phase
        self.csr.distances[u] = self.csr.num_nodes;
        pushed
    }
}
