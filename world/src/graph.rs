//! Directed city graph with four labelled roads per vertex.
//!
//! Vertices live in an append-only arena and are addressed through
//! [`VertexId`] handles, so adjacency never borrows another vertex. Destroying
//! a city flips its liveness flag instead of removing it; traversal filters
//! disabled destinations at query time.

use alien_invasion_core::Direction;
use thiserror::Error;

/// Handle addressing a vertex inside its owning [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

/// Errors raised while mutating the graph topology.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex with the same identifier already exists.
    #[error("vertex already exists: {0:?}")]
    DuplicateVertex(String),
    /// The referenced vertex is not part of the graph.
    #[error("vertex does not exist: {0:?}")]
    VertexNotFound(String),
    /// An edge between the two vertices already exists under some direction.
    #[error("edge already exists: from {from:?} to {to:?}")]
    DuplicateEdge {
        /// Source vertex identifier.
        from: String,
        /// Destination vertex identifier.
        to: String,
    },
}

/// Named location with up to one outgoing road per direction.
#[derive(Clone, Debug)]
pub struct Vertex {
    id: String,
    adjacent: [Option<VertexId>; 4],
    disabled: bool,
}

impl Vertex {
    fn new(id: String) -> Self {
        Self {
            id,
            adjacent: [None; 4],
            disabled: false,
        }
    }

    /// Identifier the vertex was created with.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw destination of the road leaving in `direction`, alive or not.
    #[must_use]
    pub fn adjacent(&self, direction: Direction) -> Option<VertexId> {
        self.adjacent[direction.index()]
    }

    /// Reports whether the vertex has not been disabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }

    /// Disables the vertex. Disabling twice is a no-op and there is no way back.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    fn roads(&self) -> impl Iterator<Item = (Direction, VertexId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.adjacent(direction).map(|to| (direction, to)))
    }
}

/// Arena of vertices with direction-labelled adjacency.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
}

impl Graph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex, rejecting identifiers that are already taken.
    pub fn add_vertex(&mut self, id: impl Into<String>) -> Result<VertexId, GraphError> {
        let id = id.into();
        if self.find(&id).is_some() {
            return Err(GraphError::DuplicateVertex(id));
        }

        let handle = VertexId(self.vertices.len());
        self.vertices.push(Vertex::new(id));
        Ok(handle)
    }

    /// Adds a directed road from `from` to `to` labelled with `direction`.
    ///
    /// At most one road may connect an ordered pair of vertices, whichever
    /// direction labels it. Assigning a direction that already leads elsewhere
    /// replaces that road.
    pub fn add_edge(&mut self, direction: Direction, from: &str, to: &str) -> Result<(), GraphError> {
        let from_id = self
            .find(from)
            .ok_or_else(|| GraphError::VertexNotFound(from.to_owned()))?;
        let to_id = self
            .find(to)
            .ok_or_else(|| GraphError::VertexNotFound(to.to_owned()))?;

        let source = &mut self.vertices[from_id.0];
        if source.roads().any(|(_, existing)| existing == to_id) {
            return Err(GraphError::DuplicateEdge {
                from: from.to_owned(),
                to: to.to_owned(),
            });
        }

        source.adjacent[direction.index()] = Some(to_id);
        Ok(())
    }

    /// Looks up the handle of the vertex named `id`.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|vertex| vertex.id == id)
            .map(VertexId)
    }

    /// Borrows the vertex behind `handle`.
    ///
    /// Handles are only minted by this graph, so a foreign handle panics.
    #[must_use]
    pub fn vertex(&self, handle: VertexId) -> &Vertex {
        &self.vertices[handle.0]
    }

    /// Mutably borrows the vertex behind `handle`.
    #[must_use]
    pub fn vertex_mut(&mut self, handle: VertexId) -> &mut Vertex {
        &mut self.vertices[handle.0]
    }

    /// Directions out of `handle` whose destination is still enabled, in canonical order.
    #[must_use]
    pub fn all_edges(&self, handle: VertexId) -> Vec<Direction> {
        self.vertex(handle)
            .roads()
            .filter(|(_, to)| self.vertex(*to).is_enabled())
            .map(|(direction, _)| direction)
            .collect()
    }

    /// Iterates over vertex handles in insertion order.
    pub fn handles(&self) -> impl Iterator<Item = VertexId> {
        (0..self.vertices.len()).map(VertexId)
    }

    /// Number of vertices, enabled or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Reports whether the graph holds no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of vertices that have not been disabled.
    #[must_use]
    pub fn enabled_count(&self) -> usize {
        self.vertices.iter().filter(|vertex| vertex.is_enabled()).count()
    }
}
