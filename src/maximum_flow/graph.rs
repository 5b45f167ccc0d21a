use crate::error::FlowError;
use crate::maximum_flow::capacity::Capacity;
use num_traits::{CheckedAdd, NumAssign};

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub flow: Flow,
    pub upper: Capacity<Flow>,
}

impl<Flow> Edge<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    #[inline]
    pub fn residual_capacity(&self) -> Capacity<Flow> {
        self.upper.residual(self.flow)
    }
}

/// Directed flow network with a dense matrix view and an adjacency-list view.
///
/// Both views store indices into one edge arena, so a flow written through
/// either view is observed by the other. Edge ids stay stable until an edge is
/// removed; removal moves the last edge of the arena into the freed slot.
#[derive(Default, Debug, Clone)]
pub struct FlowNetwork<Flow> {
    num_nodes: usize,
    num_edges: usize,
    pub(crate) edges: Vec<Edge<Flow>>,
    matrix: Vec<Vec<Option<usize>>>,
    adjacency: Vec<Vec<usize>>,
}

impl<Flow> FlowNetwork<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    pub fn new(num_nodes: usize) -> Self {
        FlowNetwork {
            num_nodes,
            num_edges: 0,
            edges: Vec::new(),
            matrix: vec![vec![None; num_nodes]; num_nodes],
            adjacency: vec![Vec::new(); num_nodes],
        }
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn add_nodes(&mut self, num_nodes: usize) -> Vec<usize> {
        self.num_nodes += num_nodes;
        for row in self.matrix.iter_mut() {
            row.resize(self.num_nodes, None);
        }
        self.matrix.resize(self.num_nodes, vec![None; self.num_nodes]);
        self.adjacency.resize(self.num_nodes, Vec::new());
        ((self.num_nodes - num_nodes)..self.num_nodes).collect()
    }

    #[inline]
    fn check_vertex(&self, vertex: usize) -> Result<(), FlowError> {
        if vertex >= self.num_nodes {
            return Err(FlowError::InvalidVertex { vertex, num_nodes: self.num_nodes });
        }
        Ok(())
    }

    // return edge index
    pub fn add_edge(&mut self, from: usize, to: usize, upper: Capacity<Flow>) -> Result<usize, FlowError> {
        self.add_edge_with_flow(from, to, upper, Flow::zero())
    }

    /// Creates the edge `from -> to`, or overwrites its flow and capacity when it
    /// already exists. Overwriting keeps the edge id and the edge count.
    pub fn add_edge_with_flow(&mut self, from: usize, to: usize, upper: Capacity<Flow>, flow: Flow) -> Result<usize, FlowError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        if let Some(edge_id) = self.matrix[from][to] {
            let edge = &mut self.edges[edge_id];
            edge.flow = flow;
            edge.upper = upper;
            return Ok(edge_id);
        }

        let edge_id = self.edges.len();
        self.edges.push(Edge { from, to, flow, upper });
        self.matrix[from][to] = Some(edge_id);
        self.adjacency[from].push(edge_id);

        self.num_edges += 1;
        Ok(edge_id)
    }

    /// Removes `from -> to` from the arena and from both views.
    /// Returns `Ok(None)` and leaves the edge count untouched when no such edge exists.
    pub fn remove_edge(&mut self, from: usize, to: usize) -> Result<Option<Edge<Flow>>, FlowError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        let Some(edge_id) = self.matrix[from][to].take() else {
            return Ok(None);
        };
        self.adjacency[from].retain(|&id| id != edge_id);

        let removed = self.edges.swap_remove(edge_id);
        let last = self.edges.len();
        if edge_id < last {
            let (u, v) = (self.edges[edge_id].from, self.edges[edge_id].to);
            self.matrix[u][v] = Some(edge_id);
            for id in self.adjacency[u].iter_mut().filter(|id| **id == last) {
                *id = edge_id;
            }
        }

        self.num_edges -= 1;
        Ok(Some(removed))
    }

    #[inline]
    pub fn edge_id(&self, from: usize, to: usize) -> Option<usize> {
        if from >= self.num_nodes || to >= self.num_nodes {
            return None;
        }
        self.matrix[from][to]
    }

    pub fn get_edge(&self, from: usize, to: usize) -> Option<Edge<Flow>> {
        self.edge_id(from, to).and_then(|edge_id| self.get_edge_by_id(edge_id))
    }

    pub fn get_edge_by_id(&self, edge_id: usize) -> Option<Edge<Flow>> {
        self.edges.get(edge_id).cloned()
    }

    #[inline]
    pub(crate) fn set_flow(&mut self, edge_id: usize, flow: Flow) {
        self.edges[edge_id].flow = flow;
    }

    /// Outgoing edges of `u` in insertion order.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = &Edge<Flow>> + '_ {
        self.adjacency.get(u).into_iter().flatten().map(move |&edge_id| &self.edges[edge_id])
    }

    /// `(from, to, flow)` for every edge, scanning the matrix row by row.
    pub fn edges_list(&self) -> impl Iterator<Item = (usize, usize, Flow)> + '_ {
        self.matrix.iter().enumerate().flat_map(move |(from, row)| {
            row.iter().enumerate().filter_map(move |(to, edge_id)| edge_id.map(|edge_id| (from, to, self.edges[edge_id].flow)))
        })
    }

    /// Residual capacity of `from -> to`: the unused capacity of the forward edge
    /// plus the flow currently carried by `to -> from`, which can be cancelled.
    pub fn residual_capacity(&self, from: usize, to: usize) -> Result<Capacity<Flow>, FlowError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;

        let backward = self.matrix[to][from].map_or(Flow::zero(), |edge_id| self.edges[edge_id].flow);
        Ok(match self.matrix[from][to].map(|edge_id| self.edges[edge_id].residual_capacity()) {
            Some(Capacity::Infinite) => Capacity::Infinite,
            Some(Capacity::Finite(forward)) => Capacity::Finite(forward + backward),
            None => Capacity::Finite(backward),
        })
    }

    pub fn outflow(&self, u: usize) -> Flow {
        self.neighbors(u).fold(Flow::zero(), |sum, e| sum + e.flow)
    }

    pub fn inflow(&self, v: usize) -> Flow {
        if v >= self.num_nodes {
            return Flow::zero();
        }
        self.matrix.iter().filter_map(|row| row[v]).fold(Flow::zero(), |sum, edge_id| sum + self.edges[edge_id].flow)
    }

    // flow leaving the source
    pub fn maximum_flow(&self, source: usize) -> Flow {
        self.outflow(source)
    }

    /// Whether `sink` can be reached from `source` through unbounded edges only,
    /// in which case no maximum flow exists.
    pub fn has_unbounded_path(&self, source: usize, sink: usize) -> bool {
        if source >= self.num_nodes || sink >= self.num_nodes {
            return false;
        }
        let mut visited = vec![false; self.num_nodes];
        let mut stack = vec![source];
        visited[source] = true;
        while let Some(u) = stack.pop() {
            if u == sink {
                return true;
            }
            for e in self.neighbors(u).filter(|e| e.upper.is_infinite()) {
                if !visited[e.to] {
                    visited[e.to] = true;
                    stack.push(e.to);
                }
            }
        }
        false
    }
}

impl<Flow> FlowNetwork<Flow>
where
    Flow: NumAssign + Ord + Copy + CheckedAdd,
{
    /// One more than the finite capacities plus the flow already on unbounded
    /// edges. No residual path can carry this much, and no unbounded edge can
    /// reach it. `None` when the sum does not fit in `Flow`.
    pub(crate) fn flow_bound(&self) -> Option<Flow> {
        self.edges.iter().map(|e| e.upper.finite().unwrap_or(e.flow)).try_fold(Flow::one(), |sum, x| sum.checked_add(&x))
    }
}
