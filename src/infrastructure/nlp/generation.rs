/// Length bounds for greedy decoding, counted in decoder tokens including the
/// decoder start token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPolicy {
    pub max_length: usize,
    pub min_length: usize,
}

/// Highest-scoring token id, ties going to the lowest id. The end-of-sequence
/// token is not eligible while the sequence is shorter than `min_length`.
pub fn greedy_next_token(
    logits: &[f32],
    eos_token_id: u32,
    decoded_len: usize,
    policy: &GenerationPolicy,
) -> Option<u32> {
    let suppress_eos = decoded_len < policy.min_length;
    let mut best: Option<(u32, f32)> = None;

    for (id, &score) in logits.iter().enumerate() {
        let id = id as u32;
        if score.is_nan() || (suppress_eos && id == eos_token_id) {
            continue;
        }
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((id, score));
        }
    }

    best.map(|(id, _)| id)
}
