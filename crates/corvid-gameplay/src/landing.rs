//! Per-screen cache of valid raven landing positions.
//!
//! Scanning level geometry for landable points is expensive, so results
//! are memoized per screen. Entries live until explicitly invalidated;
//! there is no time-based expiry. Access is single-threaded (one update
//! thread per frame), so no interior locking is carried.

use ahash::AHashMap;
use corvid_common::ScreenId;
use glam::Vec2;
use tracing::debug;

/// Level geometry query seam.
///
/// Given a screen, returns the candidate floor/landing points on it.
/// Implemented by the host; consulted only on cache miss.
pub trait LevelGeometry {
    /// Returns the world-space points a raven may land on for `screen`.
    fn floor_positions(&self, screen: ScreenId) -> Vec<Vec2>;
}

/// Memoizing cache over a [`LevelGeometry`] collaborator.
pub struct LandingPositionCache {
    /// Geometry source consulted on cache miss
    geometry: Box<dyn LevelGeometry>,
    /// Cached candidates per screen
    cache: AHashMap<ScreenId, Vec<Vec2>>,
}

impl LandingPositionCache {
    /// Creates a cache over the given geometry source.
    #[must_use]
    pub fn new(geometry: Box<dyn LevelGeometry>) -> Self {
        Self {
            geometry,
            cache: AHashMap::new(),
        }
    }

    /// Returns the candidate landing positions for `screen`, computing
    /// and memoizing them on first request.
    ///
    /// An empty result is cached like any other: it means the screen has
    /// no landable geometry, not that the query failed.
    pub fn possible_floor_positions(&mut self, screen: ScreenId) -> &[Vec2] {
        let geometry = &self.geometry;
        self.cache.entry(screen).or_insert_with(|| {
            let positions = geometry.floor_positions(screen);
            debug!(
                screen = screen.index(),
                candidates = positions.len(),
                "computed landing positions"
            );
            positions
        })
    }

    /// Drops the cached entry for `screen`, forcing recomputation on the
    /// next request.
    pub fn invalidate(&mut self, screen: ScreenId) {
        if self.cache.remove(&screen).is_some() {
            debug!(screen = screen.index(), "invalidated landing positions");
        }
    }

    /// Returns the number of screens with cached entries.
    #[must_use]
    pub fn cached_screens(&self) -> usize {
        self.cache.len()
    }
}

impl std::fmt::Debug for LandingPositionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandingPositionCache")
            .field("cached_screens", &self.cache.len())
            .finish_non_exhaustive()
    }
}
