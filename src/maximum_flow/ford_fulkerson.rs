use crate::error::FlowError;
use crate::maximum_flow::csr::CSR;
use crate::maximum_flow::graph::FlowNetwork;
use crate::maximum_flow::{check_network, MaximumFlowSolver};
use log::{debug, info};
use num_traits::{CheckedAdd, NumAssign};
use std::fmt::Display;

#[derive(Default)]
pub struct FordFulkerson<Flow> {
    csr: CSR<Flow>,
}

impl<Flow> MaximumFlowSolver<Flow> for FordFulkerson<Flow>
where
    Flow: NumAssign + Ord + Copy + CheckedAdd + Display,
{
    fn solve(&mut self, source: usize, sink: usize, graph: &mut FlowNetwork<Flow>) -> Result<Flow, FlowError> {
        check_network(source, sink, graph)?;
        if source == sink {
            return Ok(Flow::zero());
        }

        self.csr.build(graph)?;
        let mut visited = vec![false; self.csr.num_nodes];

        let mut added = Flow::zero();
        loop {
            visited.fill(false);
            let Some(bottleneck) = self.augment(source, sink, self.csr.infinity, &mut visited) else {
                break;
            };
            debug!("augmenting path carries {} units", bottleneck);
            added += bottleneck;
        }

        self.csr.set_flow(graph);
        let flow = graph.maximum_flow(source);
        info!("ford-fulkerson added {} units, total flow {}", added, flow);
        Ok(flow)
    }
}

impl<Flow> FordFulkerson<Flow>
where
    Flow: NumAssign + Ord + Copy + CheckedAdd,
{
    // pushes one path found depth-first and returns its bottleneck
    fn augment(&mut self, u: usize, sink: usize, bound: Flow, visited: &mut [bool]) -> Option<Flow> {
        if u == sink {
            return Some(bound);
        }
        visited[u] = true;

        (self.csr.start[u]..self.csr.start[u + 1]).find_map(|i| {
            let edge = &self.csr.inside_edge_list[i];
            let (to, residual) = (edge.to, edge.residual_capacity());
            if visited[to] || residual == Flow::zero() {
                return None;
            }

            let bottleneck = self.augment(to, sink, bound.min(residual), visited)?;
            self.csr.push_flow(i, bottleneck);
            Some(bottleneck)
        })
    }
}
