//! Detecting size changes of the container the surface lives in.

/// Remembers the last container size seen and reports changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeObserver {
    last: Option<(u16, u16)>,
}

impl ResizeObserver {
    /// Observer that treats `width` x `height` as already seen.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            last: Some((width, height)),
        }
    }

    /// Record the current container size. Returns it when it differs from
    /// the previous observation.
    pub fn observe(&mut self, width: u16, height: u16) -> Option<(u16, u16)> {
        let size = (width, height);
        if self.last == Some(size) {
            return None;
        }
        self.last = Some(size);
        Some(size)
    }
}
