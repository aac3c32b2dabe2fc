/// Fixed size byte fifo for buffering log output until the host reads it.
///
/// Writes that don't fit are truncated, the oldest bytes are never overwritten.
pub struct LogRing<const N: usize> {
    ring: [u8; N],
    start: usize,
    filled: usize,
}

impl<const N: usize> LogRing<N> {
    /// # Panics
    /// [`LogRing`] size too small
    #[must_use]
    pub const fn new() -> Self {
        assert!(N > 1, "A ring-buffer of 1 makes no sense");
        Self {
            ring: [0u8; N],
            start: 0,
            filled: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.filled
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Returns how many bytes of `buf` fit.
    pub fn push(&mut self, buf: &[u8]) -> usize {
        let count = buf.len().min(N - self.filled);
        let mut offset = self.start + self.filled;
        if offset >= N {
            offset -= N;
        }
        let first = count.min(N - offset);
        self.ring[offset..offset + first].copy_from_slice(&buf[..first]);
        self.ring[..count - first].copy_from_slice(&buf[first..count]);
        self.filled += count;
        count
    }

    /// The oldest contiguous run of buffered bytes, may be shorter than [`LogRing::len`]
    /// when the content wraps.
    #[must_use]
    pub fn front(&self) -> &[u8] {
        let end = (self.start + self.filled).min(N);
        &self.ring[self.start..end]
    }

    /// Drops `count` bytes off the front.
    pub fn consume(&mut self, count: usize) {
        let count = count.min(self.filled);
        self.start += count;
        if self.start >= N {
            self.start -= N;
        }
        self.filled -= count;
        if self.filled == 0 {
            self.start = 0;
        }
    }
}

impl<const N: usize> core::fmt::Write for LogRing<N> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.push(s.as_bytes());
        Ok(())
    }
}
