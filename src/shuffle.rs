//! Shuffle strategies: one unbiased permutation, and a multi-step simulation
//! of how a live dealer actually mixes a shoe.

use std::collections::VecDeque;

use crate::rng::RandomSource;

/// How the shoe is permuted on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShuffleMode {
    /// One unbiased Fisher-Yates permutation.
    #[default]
    Fair,
    /// Wash, riffle passes, strip and cut, modeled on physical handling.
    Casino,
}

/// Riffle split variance as a fraction of the pile size.
const RIFFLE_SPLIT_VARIANCE: f64 = 0.05;
/// Fraction of the shoe reserved at each end when cutting.
const CUT_MARGIN: f64 = 0.2;

/// Unbiased Fisher-Yates permutation.
pub fn fair<T>(rng: &mut RandomSource, cards: &mut [T]) {
    for i in (1..cards.len()).rev() {
        let j = rng.next_index(i + 1);
        cards.swap(i, j);
    }
}

/// Full casino sequence: wash, `passes` riffles (at least one), strip, cut.
///
/// This is verisimilitude, not extra randomness; the wash alone is already a
/// uniform permutation.
pub fn casino<T>(rng: &mut RandomSource, cards: &mut Vec<T>, passes: u32) {
    fair(rng, cards);

    for _ in 0..passes.max(1) {
        riffle(rng, cards);
    }

    strip(rng, cards);
    cut(rng, cards);
}

/// One riffle pass under the Gilbert-Shannon-Reeds model.
///
/// The pile splits near the midpoint with a small random variance, then each
/// next card falls from the left or right remainder with probability
/// proportional to that remainder's current size.
pub fn riffle<T>(rng: &mut RandomSource, cards: &mut Vec<T>) {
    let len = cards.len();
    if len <= 1 {
        return;
    }

    #[expect(clippy::cast_precision_loss, reason = "shoe sizes are small")]
    let variance = ((len as f64 * RIFFLE_SPLIT_VARIANCE) as usize).max(1);
    let offset = rng.next_index(variance * 2 + 1);
    let split = (len / 2 + offset)
        .saturating_sub(variance)
        .clamp(1, len - 1);

    let mut right: VecDeque<T> = cards.split_off(split).into();
    let mut left: VecDeque<T> = std::mem::take(cards).into();
    let mut merged = Vec::with_capacity(len);

    while !left.is_empty() || !right.is_empty() {
        let take_left = if left.is_empty() {
            false
        } else if right.is_empty() {
            true
        } else {
            let total = left.len() + right.len();
            rng.next_index(total) < left.len()
        };

        let pile = if take_left { &mut left } else { &mut right };
        if let Some(card) = pile.pop_front() {
            merged.push(card);
        }
    }

    *cards = merged;
}

/// Strip shuffle: detach small packets of 2-5 cards from the top and stack
/// them in removal order, reversing the packet order overall.
pub fn strip<T>(rng: &mut RandomSource, cards: &mut Vec<T>) {
    let mut rest = std::mem::take(cards);
    let mut stacked = Vec::with_capacity(rest.len());

    while !rest.is_empty() {
        let size = (2 + rng.next_index(4)).min(rest.len());
        stacked.extend(rest.split_off(rest.len() - size));
    }

    *cards = stacked;
}

/// Cut the shoe outside a reserved margin at each end and swap the parts.
pub fn cut<T>(rng: &mut RandomSource, cards: &mut Vec<T>) {
    let len = cards.len();
    if len < 2 {
        return;
    }

    #[expect(clippy::cast_precision_loss, reason = "shoe sizes are small")]
    let margin = (len as f64 * CUT_MARGIN) as usize;
    let min = margin.max(1);
    let max = (len - margin).max(min + 1);
    let point = min + rng.next_index(max - min);

    cards.rotate_left(point.min(len));
}
