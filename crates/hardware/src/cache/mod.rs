//! Set-Associative Cache.
//!
//! This module implements the data model of an N-way set-associative cache placed in
//! front of the backing store:
//! 1. **Geometry:** Validated tag/index/offset split and the pure address decoder.
//! 2. **Lines:** Tag, valid and dirty bits plus one block of data per way.
//! 3. **Sets:** Read-only views over the `ways` lines selected by a set index.
//! 4. **Controller:** Lookup, fill, write-back and replacement orchestration.
//!
//! Lines live in a single arena addressed by `set * ways + way`.

/// Hit/miss/fill orchestration over the cache and backing store.
pub mod controller;

/// Validated geometry and address decoding.
pub mod geometry;

/// Cache line (one way).
pub mod line;

/// Cache replacement policy implementations (FIFO, LRU, MRU, PLRU, Random).
pub mod policies;

pub use controller::{AccessOutcome, CacheController, FillOutcome, Lookup};
pub use geometry::Geometry;
pub use line::CacheLine;

/// Cache storage: `num_sets * ways` lines plus the geometry that indexes them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cache {
    geometry: Geometry,
    lines: Vec<CacheLine>,
}

impl Cache {
    /// Creates a cache with every line invalid and zeroed.
    pub fn new(geometry: Geometry) -> Self {
        let count = geometry.num_sets() * geometry.ways();
        Self {
            geometry,
            lines: vec![CacheLine::new(geometry.block_size()); count],
        }
    }

    /// Geometry the cache was built with.
    #[inline]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// View of set `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_sets`. Indices from [`Geometry::set_index`] are always in range.
    pub fn set(&self, index: usize) -> CacheSet<'_> {
        let base = index * self.geometry.ways();
        CacheSet {
            index,
            lines: &self.lines[base..base + self.geometry.ways()],
        }
    }

    /// Iterates all sets in index order.
    pub fn sets(&self) -> impl Iterator<Item = CacheSet<'_>> {
        (0..self.geometry.num_sets()).map(|index| self.set(index))
    }

    /// Line at (`set`, `way`).
    ///
    /// # Panics
    ///
    /// Panics if `set >= num_sets` or `way >= ways`. A way past the end of its set never
    /// aliases a line of the next set.
    #[inline]
    pub fn line(&self, set: usize, way: usize) -> &CacheLine {
        self.set(set).way(way)
    }

    #[inline]
    pub(crate) fn line_mut(&mut self, set: usize, way: usize) -> &mut CacheLine {
        let ways = self.geometry.ways();
        let base = set * ways;
        &mut self.lines[base..base + ways][way]
    }

    /// Iterates every line with its (`set`, `way`) coordinates.
    pub(crate) fn lines_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut CacheLine)> {
        let ways = self.geometry.ways();
        self.lines
            .iter_mut()
            .enumerate()
            .map(move |(i, line)| (i / ways, i % ways, line))
    }

    /// Number of valid lines across all sets.
    pub fn valid_lines(&self) -> usize {
        self.lines.iter().filter(|line| line.is_valid()).count()
    }

    /// Invalidates and zeroes every line.
    pub fn reset(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
    }
}

/// The ordered ways of one set.
#[derive(Clone, Copy, Debug)]
pub struct CacheSet<'a> {
    index: usize,
    lines: &'a [CacheLine],
}

impl<'a> CacheSet<'a> {
    /// Set index.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Associativity of the set.
    #[inline]
    pub const fn len(&self) -> usize {
        self.lines.len()
    }

    /// A set always has at least one way.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line in `way`.
    #[inline]
    pub fn way(&self, way: usize) -> &'a CacheLine {
        &self.lines[way]
    }

    /// Ways in order `0..len`.
    pub fn iter(&self) -> std::slice::Iter<'a, CacheLine> {
        self.lines.iter()
    }

    /// Lowest way holding a valid line whose tag equals `tag`.
    pub fn find(&self, tag: u16) -> Option<usize> {
        self.lines.iter().position(|line| line.matches(tag))
    }

    /// Lowest way holding no block.
    pub fn first_invalid(&self) -> Option<usize> {
        self.lines.iter().position(|line| !line.is_valid())
    }

    /// Number of valid ways.
    pub fn valid_count(&self) -> usize {
        self.lines.iter().filter(|line| line.is_valid()).count()
    }
}

impl<'a> IntoIterator for CacheSet<'a> {
    type Item = &'a CacheLine;
    type IntoIter = std::slice::Iter<'a, CacheLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl<'a> IntoIterator for &CacheSet<'a> {
    type Item = &'a CacheLine;
    type IntoIter = std::slice::Iter<'a, CacheLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
