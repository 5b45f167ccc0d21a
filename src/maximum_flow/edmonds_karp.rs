use crate::error::FlowError;
use crate::maximum_flow::csr::CSR;
use crate::maximum_flow::graph::FlowNetwork;
use crate::maximum_flow::{check_network, MaximumFlowSolver};
use log::{debug, info};
use num_traits::{CheckedAdd, NumAssign};
use std::collections::VecDeque;
use std::fmt::Display;

/// Shortest augmenting paths found by breadth-first search.
/// Among equally short paths the one through lower vertex indices wins.
#[derive(Default)]
pub struct EdmondsKarp<Flow> {
    csr: CSR<Flow>,
}

impl<Flow> MaximumFlowSolver<Flow> for EdmondsKarp<Flow>
where
    Flow: NumAssign + Ord + Copy + CheckedAdd + Display,
{
    fn solve(&mut self, source: usize, sink: usize, graph: &mut FlowNetwork<Flow>) -> Result<Flow, FlowError> {
        check_network(source, sink, graph)?;
        if source == sink {
            return Ok(Flow::zero());
        }

        self.csr.build(graph)?;
        let mut prev = vec![(usize::MAX, usize::MAX); self.csr.num_nodes];
        let mut visited = vec![false; self.csr.num_nodes];
        let mut augmentations = 0;

        loop {
            prev.fill((usize::MAX, usize::MAX));
            visited.fill(false);

            // bfs
            visited[source] = true;
            let mut queue = VecDeque::from([source]);
            while let Some(u) = queue.pop_front() {
                if u == sink {
                    break;
                }

                for edge_id in self.csr.start[u]..self.csr.start[u + 1] {
                    let edge = &self.csr.inside_edge_list[edge_id];
                    if visited[edge.to] || edge.residual_capacity() == Flow::zero() {
                        continue;
                    }

                    visited[edge.to] = true;
                    queue.push_back(edge.to);
                    prev[edge.to] = (u, edge_id);
                }
            }

            // no augmenting path left
            if !visited[sink] {
                break;
            }

            // calculate delta
            let mut delta = self.csr.inside_edge_list[prev[sink].1].residual_capacity();
            let mut v = sink;
            while v != source {
                let (u, edge_id) = prev[v];
                delta = delta.min(self.csr.inside_edge_list[edge_id].residual_capacity());
                v = u;
            }

            // update flow
            let mut v = sink;
            while v != source {
                let (u, edge_id) = prev[v];
                self.csr.push_flow(edge_id, delta);
                v = u;
            }

            augmentations += 1;
            debug!("augmentation {}: pushed {} units", augmentations, delta);
        }

        self.csr.set_flow(graph);
        let flow = graph.maximum_flow(source);
        info!("edmonds-karp finished after {} augmentations with flow {}", augmentations, flow);
        Ok(flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maximum_flow::capacity::Capacity;

    #[test]
    fn prefers_lower_vertex_on_ties() {
        // two disjoint paths of equal length into a sink that only takes one unit
        let mut graph: FlowNetwork<u32> = FlowNetwork::new(5);
        graph.add_edge(0, 2, Capacity::Finite(1)).unwrap();
        graph.add_edge(0, 1, Capacity::Finite(1)).unwrap();
        graph.add_edge(1, 3, Capacity::Infinite).unwrap();
        graph.add_edge(2, 3, Capacity::Infinite).unwrap();
        graph.add_edge(3, 4, Capacity::Finite(1)).unwrap();

        let flow = EdmondsKarp::default().solve(0, 4, &mut graph).unwrap();

        assert_eq!(flow, 1);
        assert_eq!(graph.get_edge(0, 1).unwrap().flow, 1);
        assert_eq!(graph.get_edge(0, 2).unwrap().flow, 0);
    }

    #[test]
    fn cancels_flow_on_reverse_edges() {
        // the first augmentation takes 0-1-3-5, which leaves 2 stranded until 1->3 is undone
        let mut graph: FlowNetwork<u32> = FlowNetwork::new(6);
        graph.add_edge(0, 1, Capacity::Finite(1)).unwrap();
        graph.add_edge(0, 2, Capacity::Finite(1)).unwrap();
        graph.add_edge(1, 3, Capacity::Finite(1)).unwrap();
        graph.add_edge(1, 4, Capacity::Finite(1)).unwrap();
        graph.add_edge(2, 3, Capacity::Finite(1)).unwrap();
        graph.add_edge(3, 5, Capacity::Finite(1)).unwrap();
        graph.add_edge(4, 5, Capacity::Finite(1)).unwrap();

        let flow = EdmondsKarp::default().solve(0, 5, &mut graph).unwrap();

        assert_eq!(flow, 2);
        assert_eq!(graph.get_edge(1, 3).unwrap().flow, 0);
        assert_eq!(graph.get_edge(2, 3).unwrap().flow, 1);
        assert_eq!(graph.get_edge(1, 4).unwrap().flow, 1);
    }

    #[test]
    fn rejects_out_of_range_terminals() {
        let mut graph: FlowNetwork<u32> = FlowNetwork::new(2);
        let result = EdmondsKarp::default().solve(0, 2, &mut graph);
        assert!(matches!(result, Err(FlowError::InvalidVertex { vertex: 2, num_nodes: 2 })));
    }

    #[test]
    fn same_source_and_sink() {
        let mut graph: FlowNetwork<u32> = FlowNetwork::new(2);
        graph.add_edge(0, 1, Capacity::Finite(3)).unwrap();
        assert_eq!(EdmondsKarp::default().solve(1, 1, &mut graph).unwrap(), 0);
    }
}
