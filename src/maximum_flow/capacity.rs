use num_traits::NumAssign;
use std::fmt;

/// Upper bound of an edge. `Infinite` means the edge never constrains the flow,
/// which is not the same thing as a capacity of zero.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Capacity<Flow> {
    Finite(Flow),
    Infinite,
}

impl<Flow> Capacity<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    #[inline]
    pub fn is_infinite(&self) -> bool {
        matches!(self, Capacity::Infinite)
    }

    #[inline]
    pub fn finite(&self) -> Option<Flow> {
        match *self {
            Capacity::Finite(upper) => Some(upper),
            Capacity::Infinite => None,
        }
    }

    /// Capacity left once `flow` units are routed through the edge.
    pub fn residual(&self, flow: Flow) -> Capacity<Flow> {
        match *self {
            Capacity::Finite(upper) => Capacity::Finite(upper - flow),
            Capacity::Infinite => Capacity::Infinite,
        }
    }

    // replaces infinity with a concrete bound
    #[inline]
    pub fn resolve(&self, infinity: Flow) -> Flow {
        self.finite().unwrap_or(infinity)
    }

    #[inline]
    pub fn admits(&self, flow: Flow) -> bool {
        match *self {
            Capacity::Finite(upper) => flow <= upper,
            Capacity::Infinite => true,
        }
    }

    pub fn min(self, other: Capacity<Flow>) -> Capacity<Flow> {
        match (self, other) {
            (Capacity::Infinite, c) | (c, Capacity::Infinite) => c,
            (Capacity::Finite(a), Capacity::Finite(b)) => Capacity::Finite(a.min(b)),
        }
    }
}

impl<Flow> From<Flow> for Capacity<Flow> {
    fn from(upper: Flow) -> Self {
        Capacity::Finite(upper)
    }
}

impl<Flow: fmt::Display> fmt::Display for Capacity<Flow> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Finite(upper) => write!(f, "{}", upper),
            Capacity::Infinite => write!(f, "inf"),
        }
    }
}
