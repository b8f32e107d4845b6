//! Numeric helpers for embedding preprocessing and postprocessing.

/// Per-image standardisation: subtract the mean, divide by the standard
/// deviation (floored at `1 / sqrt(n)` so flat images stay finite).
pub fn standardize(v: &mut [f32]) {
    if v.is_empty() {
        return;
    }
    let n = v.len() as f32;
    let mean = v.iter().sum::<f32>() / n;
    let var = v.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>() / n;
    let std = var.sqrt().max(1.0 / n.sqrt());
    for x in v.iter_mut() {
        *x = (*x - mean) / std;
    }
}

/// Nearest-neighbour source coordinate for destination pixel `dst` when
/// mapping `src_len` pixels onto `dst_len`, sampled at pixel centres.
pub fn nearest_source(dst: usize, src_len: usize, dst_len: usize) -> usize {
    let pos = (dst as f64 + 0.5) * src_len as f64 / dst_len as f64;
    (pos as usize).min(src_len.saturating_sub(1))
}
