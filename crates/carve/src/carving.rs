//! Carving orchestration: graph plus layout in, layered tile map out.

mod doors;
mod organic;
mod pipeline;
mod walls;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub use doors::{DOOR_OBJECT_TYPE, place_doors};
pub use organic::{DEFAULT_CORRIDOR_WIDTH, OrganicCarver};
pub use pipeline::StandardCarver;
pub use walls::synthesize_walls;

use crate::error::CarveError;
use crate::graph::DungeonGraph;
use crate::layout::Layout;
use crate::tilemap::TileMap;

pub const DEFAULT_TILE_SIZE: u32 = 16;

/// A carving strategy. Implementations are shared read-only once registered.
pub trait Carver: Send + Sync {
    fn name(&self) -> &str;
    fn carve(&self, request: &CarveRequest<'_>) -> Result<TileMap, CarveError>;
}

/// Inputs for one carve. Graph and layout are borrowed read-only for the whole call.
#[derive(Clone, Copy, Default)]
pub struct CarveRequest<'a> {
    graph: Option<&'a dyn DungeonGraph>,
    layout: Option<&'a Layout>,
    cancel: Option<&'a CancelToken>,
}

impl<'a> CarveRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn graph(mut self, graph: &'a dyn DungeonGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn layout(mut self, layout: &'a Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn cancel(mut self, token: &'a CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The graph is checked before the layout.
    pub(crate) fn inputs(&self) -> Result<(&'a dyn DungeonGraph, &'a Layout), CarveError> {
        let graph = self.graph.ok_or(CarveError::MissingGraph)?;
        let layout = self.layout.ok_or(CarveError::MissingLayout)?;
        Ok((graph, layout))
    }

    pub(crate) fn check_cancelled(&self) -> Result<(), CarveError> {
        match self.cancel {
            Some(token) if token.is_cancelled() => Err(CarveError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Cooperative cancellation flag, checked before each room stamp and corridor route.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Carves with the standard strategy and default tile size.
pub fn carve(graph: &dyn DungeonGraph, layout: &Layout) -> Result<TileMap, CarveError> {
    StandardCarver::default().carve(&CarveRequest::new().graph(graph).layout(layout))
}
