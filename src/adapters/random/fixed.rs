use crate::ports::RandomSource;

/// Stub source that always answers the same index, clamped to the range.
///
/// For tests and deterministic demos only.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRandomSource {
    index: usize,
}

impl FixedRandomSource {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

impl RandomSource for FixedRandomSource {
    fn pick_index(&self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }
}
