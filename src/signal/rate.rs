/// Estimates a heart rate in beats per minute from peak spacing.
///
/// Returns 0 when fewer than two peaks are available. Callers must treat
/// that as "no estimate", not as a rate of zero.
pub fn estimate_rate(peaks: &[usize], sampling_rate_hz: f32) -> u32 {
    if peaks.len() <= 1 {
        return 0;
    }
    let total: usize = peaks.windows(2).map(|pair| pair[1] - pair[0]).sum();
    let mean_interval = total as f32 / (peaks.len() - 1) as f32;
    let seconds_per_beat = mean_interval / sampling_rate_hz;
    (60.0 / seconds_per_beat).round() as u32
}
