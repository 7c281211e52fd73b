//! Frame-delay metadata and the frame-end-time table derived from it.

/// Milliseconds per metadata delay unit (delays are stored in 1/100 s).
pub const MS_PER_DELAY_UNIT: u64 = 10;

const DELAY_ENTRY_BYTES: usize = 4;

/// Raw per-frame delay metadata as reported by an image handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameDelays {
    /// One little-endian `u32` per frame in 1/100 s. May hold fewer entries than frames;
    /// entries then repeat cyclically.
    HasDelays(Vec<u8>),
    /// The image carries no delay metadata; every frame lasts 0 ms.
    NoDelays,
}

impl FrameDelays {
    /// Encode centisecond delays into the raw little-endian layout.
    pub fn from_centiseconds(delays: &[u32]) -> Self {
        let mut bytes = Vec::with_capacity(delays.len() * DELAY_ENTRY_BYTES);
        for d in delays {
            bytes.extend_from_slice(&d.to_le_bytes());
        }
        Self::HasDelays(bytes)
    }

    /// Decoded delay entries in 1/100 s. Trailing bytes that do not form a whole entry are dropped.
    pub fn entries(&self) -> Vec<u32> {
        match self {
            Self::HasDelays(bytes) => bytes
                .chunks_exact(DELAY_ENTRY_BYTES)
                .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
            Self::NoDelays => Vec::new(),
        }
    }
}

/// Build the cumulative frame-end-time table (ms) for `frame_count` frames.
///
/// Entry `i` reads delay `i mod entries`; an empty delay set yields an all-zero table.
pub fn frame_end_times(delays: &FrameDelays, frame_count: usize) -> Vec<u64> {
    let entries = delays.entries();

    if cfg!(debug_assertions) {
        check_delay_layout(delays, entries.len(), frame_count);
    }

    let mut out = Vec::with_capacity(frame_count);
    let mut end = 0u64;
    for f in 0..frame_count {
        let delay = if entries.is_empty() {
            0
        } else {
            u64::from(entries[f % entries.len()])
        };
        end = end.saturating_add(delay * MS_PER_DELAY_UNIT);
        out.push(end);
    }
    out
}

// Delay entries are expected either once per frame or as a repeating group dividing the frame count.
fn check_delay_layout(delays: &FrameDelays, entry_count: usize, frame_count: usize) {
    let FrameDelays::HasDelays(bytes) = delays else {
        return;
    };
    if !bytes.len().is_multiple_of(DELAY_ENTRY_BYTES) {
        tracing::warn!(
            len = bytes.len(),
            "frame delay metadata length is not a multiple of {DELAY_ENTRY_BYTES}"
        );
    }
    if entry_count == 0 || !frame_count.is_multiple_of(entry_count) {
        tracing::warn!(
            entry_count,
            frame_count,
            "frame count is not evenly divisible by the number of frame delay entries"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/delays.rs"]
mod tests;
