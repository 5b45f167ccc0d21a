use crate::error::FlowError;
use crate::maximum_flow::capacity::Capacity;
use crate::maximum_flow::graph::FlowNetwork;
use std::collections::VecDeque;
use std::ops::Sub;

use num_traits::{CheckedAdd, NumAssign};

#[derive(Default, PartialEq, Debug)]
pub struct InsideEdge<Flow> {
    pub to: usize,
    pub flow: Flow,
    pub upper: Flow,
    pub rev: usize,
}

impl<Flow> InsideEdge<Flow>
where
    Flow: Sub<Output = Flow> + Copy,
{
    pub fn residual_capacity(&self) -> Flow {
        self.upper - self.flow
    }
}

/// Residual network in compressed sparse row form.
///
/// Every network edge owns a forward half at its tail and a reverse half at its
/// head. A pair of halves always satisfies `forward.flow + reverse.flow == upper`,
/// so the residual capacity of one half is the flow carried by the other.
/// Within a vertex the halves are ordered by head vertex. Unbounded edges get
/// `infinity` as their upper bound, which exceeds every finite capacity sum and
/// every flow already stored in the network.
#[derive(Default)]
pub struct CSR<Flow> {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub infinity: Flow,
    pub edge_index_to_inside_edge_index: Vec<usize>,

    pub start: Vec<usize>,
    pub inside_edge_list: Vec<InsideEdge<Flow>>,
    pub distances: Vec<usize>, // distance from u to sink in residual network
    que: VecDeque<usize>,
}

impl<Flow> CSR<Flow>
where
    Flow: NumAssign + Ord + Copy + CheckedAdd,
{
    pub fn build(&mut self, graph: &FlowNetwork<Flow>) -> Result<(), FlowError> {
        self.num_nodes = graph.num_nodes();
        self.num_edges = graph.num_edges();
        self.infinity = graph.flow_bound().ok_or(FlowError::CapacityOverflow)?;
        let infinity = self.infinity;

        // (tail, head, edge index, is reverse half)
        let mut halves = Vec::with_capacity(2 * self.num_edges);
        for (edge_index, e) in graph.edges.iter().enumerate() {
            if let Capacity::Finite(upper) = e.upper {
                assert!(upper >= Flow::zero(), "edge {} -> {} has a negative capacity", e.from, e.to);
            }
            assert!(e.flow >= Flow::zero() && e.upper.admits(e.flow), "edge {} -> {} carries flow outside [0, capacity]", e.from, e.to);
            halves.push((e.from, e.to, edge_index, false));
            halves.push((e.to, e.from, edge_index, true));
        }
        halves.sort_unstable();

        // initialize
        self.start.clear();
        self.start.resize(self.num_nodes + 1, 0);
        self.distances.clear();
        self.distances.resize(self.num_nodes, self.num_nodes);
        self.edge_index_to_inside_edge_index.clear();
        self.edge_index_to_inside_edge_index.resize(self.num_edges, usize::MAX);

        let mut reverse_index = vec![usize::MAX; self.num_edges];
        for (i, &(u, _, edge_index, is_reverse)) in halves.iter().enumerate() {
            self.start[u + 1] += 1;
            if is_reverse {
                reverse_index[edge_index] = i;
            } else {
                self.edge_index_to_inside_edge_index[edge_index] = i;
            }
        }
        for i in 1..=self.num_nodes {
            self.start[i] += self.start[i - 1];
        }

        self.inside_edge_list = halves
            .iter()
            .map(|&(_, v, edge_index, is_reverse)| {
                let e = &graph.edges[edge_index];
                let upper = e.upper.resolve(infinity);
                if is_reverse {
                    InsideEdge { to: v, flow: upper - e.flow, upper, rev: self.edge_index_to_inside_edge_index[edge_index] }
                } else {
                    InsideEdge { to: v, flow: e.flow, upper, rev: reverse_index[edge_index] }
                }
            })
            .collect();
        Ok(())
    }

    pub fn set_flow(&self, graph: &mut FlowNetwork<Flow>) {
        for edge_id in 0..graph.num_edges() {
            let i = self.edge_index_to_inside_edge_index[edge_id];
            let flow = self.inside_edge_list[i].flow;
            assert!(graph.edges[edge_id].upper.admits(flow), "augmentation pushed edge {} past its capacity", edge_id);
            graph.set_flow(edge_id, flow);
        }
    }

    #[inline]
    pub fn neighbors(&self, u: usize) -> std::slice::Iter<InsideEdge<Flow>> {
        self.inside_edge_list[self.start[u]..self.start[u + 1]].iter()
    }

    #[inline]
    pub fn push_flow(&mut self, inside_edge_index: usize, flow: Flow) {
        let rev = self.inside_edge_list[inside_edge_index].rev;

        // update flow
        self.inside_edge_list[inside_edge_index].flow += flow;
        self.inside_edge_list[rev].flow -= flow;
    }

    // O(n + m)
    // calculate the distance from u to sink in the residual network
    // if such a path does not exist, distance[u] becomes self.num_nodes
    pub fn update_distances(&mut self, source: usize, sink: usize) {
        self.que.clear();
        self.que.push_back(sink);
        self.distances.fill(self.num_nodes);
        self.distances[sink] = 0;

        while let Some(v) = self.que.pop_front() {
            for e in self.inside_edge_list[self.start[v]..self.start[v + 1]].iter() {
                // e.to -> v
                if e.flow > Flow::zero() && self.distances[e.to] == self.num_nodes {
                    self.distances[e.to] = self.distances[v] + 1;
                    if e.to != source {
                        self.que.push_back(e.to);
                    }
                }
            }
        }
    }

    #[inline]
    pub fn is_admissible_edge(&self, from: usize, i: usize) -> bool {
        self.inside_edge_list[i].residual_capacity() > Flow::zero() && self.distances[from] == self.distances[self.inside_edge_list[i].to] + 1
    }
}
