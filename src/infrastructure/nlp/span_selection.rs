/// A candidate answer, as token positions within one encoded window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanCandidate {
    pub start: usize,
    pub end: usize,
    pub score: f32,
}

/// Picks the span maximising `p_start * p_end`, with `start <= end`, both
/// positions inside the context and at most `max_answer_len` tokens long.
///
/// Probabilities are softmaxes over the context positions only, so question
/// and special tokens never win.
pub fn best_span(
    start_logits: &[f32],
    end_logits: &[f32],
    context_mask: &[bool],
    max_answer_len: usize,
) -> Option<SpanCandidate> {
    let len = start_logits.len().min(end_logits.len()).min(context_mask.len());
    if len == 0 || max_answer_len == 0 {
        return None;
    }

    let start_probs = masked_softmax(&start_logits[..len], &context_mask[..len]);
    let end_probs = masked_softmax(&end_logits[..len], &context_mask[..len]);

    let mut best: Option<SpanCandidate> = None;

    for start in (0..len).filter(|&i| context_mask[i]) {
        let last = (start + max_answer_len).min(len);
        for end in (start..last).filter(|&i| context_mask[i]) {
            let score = start_probs[start] * end_probs[end];
            if best.is_none_or(|b| score > b.score) {
                best = Some(SpanCandidate { start, end, score });
            }
        }
    }

    best
}

fn masked_softmax(logits: &[f32], mask: &[bool]) -> Vec<f32> {
    let max = logits
        .iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .map(|(v, _)| *v)
        .fold(f32::NEG_INFINITY, f32::max);

    let exps: Vec<f32> = logits
        .iter()
        .zip(mask)
        .map(|(v, keep)| if *keep { (v - max).exp() } else { 0.0 })
        .collect();

    let total: f32 = exps.iter().sum();
    if total > 0.0 {
        exps.into_iter().map(|e| e / total).collect()
    } else {
        exps
    }
}
