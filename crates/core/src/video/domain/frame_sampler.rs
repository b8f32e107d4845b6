//! Evenly spaced frame sampling for video inputs.
use thiserror::Error;

use crate::shared::frame::Frame;
use crate::video::domain::video_reader::ReadError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SamplingError {
    #[error("Video has only {total} frames, but {requested} frames were requested")]
    NotEnoughFrames { total: usize, requested: usize },
    #[error("at least one frame must be requested")]
    ZeroRequested,
}

/// `requested` indices evenly spaced over `[0, total - 1]`, truncated toward
/// zero. The result is non-decreasing and starts at 0 and ends at
/// `total - 1` when more than one frame is requested.
pub fn sample_indices(total: usize, requested: usize) -> Result<Vec<usize>, SamplingError> {
    if requested == 0 {
        return Err(SamplingError::ZeroRequested);
    }
    if total < requested {
        return Err(SamplingError::NotEnoughFrames { total, requested });
    }
    if requested == 1 {
        return Ok(vec![0]);
    }

    let last = (total - 1) as f64;
    let step = last / (requested - 1) as f64;
    Ok((0..requested)
        .map(|i| {
            if i == requested - 1 {
                total - 1
            } else {
                (i as f64 * step) as usize
            }
        })
        .collect())
}

/// Keep only frames whose decode index is in `indices` (sorted ascending).
///
/// Stops decoding after the last wanted index. A decode error ends sampling
/// early: the frames gathered so far are returned.
pub fn sampled_frames<'a>(
    frames: impl Iterator<Item = Result<Frame, ReadError>> + 'a,
    indices: &[usize],
) -> Vec<Frame> {
    let Some(&last) = indices.last() else {
        return Vec::new();
    };

    let mut wanted = indices.iter().copied().peekable();
    let mut out = Vec::with_capacity(indices.len());

    for result in frames {
        let frame = match result {
            Ok(frame) => frame,
            Err(e) => {
                log::warn!("Frame decode failed, keeping {} sampled frames: {e}", out.len());
                break;
            }
        };

        let idx = frame.index();
        let mut hits = 0;
        while wanted.peek() == Some(&idx) {
            wanted.next();
            hits += 1;
        }
        // Duplicate indices (short videos) reuse the same decoded frame.
        for _ in 1..hits {
            out.push(frame.clone());
        }
        if hits > 0 {
            out.push(frame);
        }

        if idx >= last {
            break;
        }
    }

    out
}
