//! Cache line (one way of a set).

/// Cache line entry containing tag, validity and dirty bits plus the block data.
///
/// The tag is meaningful only while the line is valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheLine {
    tag: u16,
    valid: bool,
    dirty: bool,
    data: Box<[u8]>,
}

impl CacheLine {
    /// Creates an invalid, zeroed line holding `block_size` bytes.
    pub fn new(block_size: usize) -> Self {
        Self {
            tag: 0,
            valid: false,
            dirty: false,
            data: vec![0; block_size].into_boxed_slice(),
        }
    }

    /// Stored tag.
    #[inline]
    pub const fn tag(&self) -> u16 {
        self.tag
    }

    /// Whether the line holds a block.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the block was written since it was filled.
    #[inline]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Block contents.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Associative match: valid and exactly equal tag.
    #[inline]
    pub const fn matches(&self, tag: u16) -> bool {
        self.valid && self.tag == tag
    }

    /// Byte at `offset` within the block.
    #[inline]
    pub fn read(&self, offset: usize) -> u8 {
        self.data[offset]
    }

    /// Installs a freshly read block: Invalid or Valid to Valid/Clean.
    pub(crate) fn install(&mut self, tag: u16, block: &[u8]) {
        self.data.copy_from_slice(block);
        self.tag = tag;
        self.valid = true;
        self.dirty = false;
    }

    /// Stores a byte and marks the line dirty.
    pub(crate) fn write(&mut self, offset: usize, value: u8) {
        self.data[offset] = value;
        self.dirty = true;
    }

    /// Drops the block without touching its data.
    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
        self.dirty = false;
    }

    /// Returns the line to its power-on state.
    pub(crate) fn clear(&mut self) {
        self.tag = 0;
        self.valid = false;
        self.dirty = false;
        self.data.fill(0);
    }
}
