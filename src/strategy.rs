//! Basic-strategy oracle for training feedback.
//!
//! Encodes the canonical hard/soft/pair tables and resolves each raw table
//! code into an action that is actually legal under the active profile. The
//! advisor is a pure function of the hand, the dealer up-card and the
//! profile; it never touches round state.

use std::fmt;

use crate::card::Card;
use crate::hand::Hand;
use crate::rules::RulesProfile;

/// A concrete player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Draw a card.
    Hit,
    /// Keep the current hand.
    Stand,
    /// Double the wager and draw exactly one card.
    Double,
    /// Split a pair into two hands.
    Split,
    /// Give up the hand for half the wager.
    Surrender,
}

impl Action {
    /// Human-readable label for messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::Double => "double down",
            Self::Split => "split",
            Self::Surrender => "surrender",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw table codes. Two-letter codes carry their fallback: `Ds` is "double,
/// else stand", `Sp` is "split only with double-after-split, else hit",
/// `Su`/`Us` are "surrender, else hit/stand".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Code {
    H,
    S,
    D,
    Ds,
    P,
    Sp,
    Su,
    Us,
}

use Code::{D, Ds, H, P, S, Sp, Su, Us};

/// Dealer up-card columns: 2, 3, 4, 5, 6, 7, 8, 9, ten-value, ace.
type Row = [Code; 10];

/// Hard totals 5 through 21.
const HARD: [Row; 17] = [
    [H, H, H, H, H, H, H, H, H, H],     // 5
    [H, H, H, H, H, H, H, H, H, H],     // 6
    [H, H, H, H, H, H, H, H, H, H],     // 7
    [H, H, H, H, H, H, H, H, H, H],     // 8
    [H, D, D, D, D, H, H, H, H, H],     // 9
    [D, D, D, D, D, D, D, D, H, H],     // 10
    [D, D, D, D, D, D, D, D, D, H],     // 11
    [H, H, S, S, S, H, H, H, H, H],     // 12
    [S, S, S, S, S, H, H, H, H, H],     // 13
    [S, S, S, S, S, H, H, H, H, H],     // 14
    [S, S, S, S, S, H, H, H, Su, H],    // 15
    [S, S, S, S, S, H, H, Su, Su, Su],  // 16
    [S, S, S, S, S, S, S, S, S, Us],    // 17
    [S, S, S, S, S, S, S, S, S, S],     // 18
    [S, S, S, S, S, S, S, S, S, S],     // 19
    [S, S, S, S, S, S, S, S, S, S],     // 20
    [S, S, S, S, S, S, S, S, S, S],     // 21
];

/// Soft totals 13 (A+2) through 20 (A+9).
const SOFT: [Row; 8] = [
    [H, H, H, D, D, H, H, H, H, H],         // A+2
    [H, H, H, D, D, H, H, H, H, H],         // A+3
    [H, H, D, D, D, H, H, H, H, H],         // A+4
    [H, H, D, D, D, H, H, H, H, H],         // A+5
    [H, D, D, D, D, H, H, H, H, H],         // A+6
    [Ds, Ds, Ds, Ds, Ds, S, S, H, H, H],    // A+7
    [S, S, S, S, S, S, S, S, S, S],         // A+8
    [S, S, S, S, S, S, S, S, S, S],         // A+9
];

/// Pairs by card rank: aces, 2 through 9, ten-value.
const PAIR_ACES: Row = [P, P, P, P, P, P, P, P, P, P];
const PAIR_TENS: Row = [S, S, S, S, S, S, S, S, S, S];
const PAIRS: [Row; 8] = [
    [Sp, Sp, P, P, P, P, H, H, H, H],   // 2,2
    [Sp, Sp, P, P, P, P, H, H, H, H],   // 3,3
    [H, H, H, Sp, Sp, H, H, H, H, H],   // 4,4
    [D, D, D, D, D, D, D, D, H, H],     // 5,5 plays as hard 10
    [Sp, P, P, P, P, H, H, H, H, H],    // 6,6
    [P, P, P, P, P, P, H, H, H, H],     // 7,7
    [P, P, P, P, P, P, P, P, P, P],     // 8,8
    [P, P, P, P, P, S, P, P, S, S],     // 9,9
];

/// How the player hand was classified for the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandShape {
    /// No ace counted as 11.
    Hard,
    /// An ace still counts as 11.
    Soft,
    /// A splittable pair, looked up in the pair table.
    Pair,
}

/// The advisor's answer for one decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    /// The action to take, already legal under the active profile.
    pub action: Action,
    /// How the hand was classified.
    pub shape: HandShape,
    /// The player total used for the lookup.
    pub total: u8,
}

/// How a taken action compares to the recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Exactly the recommended action.
    Optimal,
    /// Not recommended, but in the same family (stand/surrender are both
    /// defensive, hit/double are both aggressive).
    Suboptimal,
    /// Outside the recommended family.
    Wrong,
}

/// Assessment of a taken action, with the recommended alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assessment {
    /// The comparison verdict.
    pub verdict: Verdict,
    /// What basic strategy recommended instead.
    pub recommended: Action,
}

fn dealer_column(up: Card) -> usize {
    match up.rank {
        1 => 9,
        2..=9 => up.rank as usize - 2,
        _ => 8,
    }
}

const fn pair_row(rank: u8) -> &'static Row {
    match rank {
        1 => &PAIR_ACES,
        2..=9 => &PAIRS[rank as usize - 2],
        _ => &PAIR_TENS,
    }
}

/// Resolves a raw table code into an action that is legal right now.
///
/// When the table's first choice is unavailable under the profile the code's
/// deterministic fallback applies; the advisor never answers with an illegal
/// action.
fn resolve(code: Code, profile: &RulesProfile, can_double: bool, can_split: bool) -> Action {
    match code {
        H => Action::Hit,
        S => Action::Stand,
        D => {
            if can_double {
                Action::Double
            } else {
                Action::Hit
            }
        }
        Ds => {
            if can_double {
                Action::Double
            } else {
                Action::Stand
            }
        }
        P => {
            if can_split {
                Action::Split
            } else {
                Action::Hit
            }
        }
        Sp => {
            if can_split && profile.double_after_split {
                Action::Split
            } else {
                Action::Hit
            }
        }
        Su => {
            if profile.allows_surrender() {
                Action::Surrender
            } else {
                Action::Hit
            }
        }
        Us => {
            if profile.allows_surrender() {
                Action::Surrender
            } else {
                Action::Stand
            }
        }
    }
}

/// Returns the recommended action for a hand against a dealer up-card.
///
/// `split_eligible` is whether a split is actually available right now
/// (pair, funds, split limit); the caller knows, the advisor does not.
#[must_use]
pub fn recommend(
    hand: &Hand,
    dealer_up: Card,
    profile: &RulesProfile,
    split_eligible: bool,
) -> Recommendation {
    let column = dealer_column(dealer_up);
    let total = hand.value();
    let can_double =
        hand.len() == 2 && !(hand.is_from_split() && !profile.double_after_split);
    let can_split = split_eligible && hand.is_pair();

    let (code, shape) = if can_split {
        (pair_row(hand.cards()[0].rank)[column], HandShape::Pair)
    } else if hand.is_soft() {
        let code = match total {
            13..=20 => SOFT[total as usize - 13][column],
            // Soft 12 (unsplittable A,A) and soft 21 fall outside the table.
            t if t >= 19 => S,
            _ => H,
        };
        (code, HandShape::Soft)
    } else {
        let row = total.clamp(5, 21) as usize - 5;
        (HARD[row][column], HandShape::Hard)
    };

    Recommendation {
        action: resolve(code, profile, can_double, can_split),
        shape,
        total,
    }
}

/// Classifies a taken action against the recommendation.
#[must_use]
pub fn assess(
    taken: Action,
    hand: &Hand,
    dealer_up: Card,
    profile: &RulesProfile,
    split_eligible: bool,
) -> Assessment {
    let recommended = recommend(hand, dealer_up, profile, split_eligible).action;

    let verdict = if taken == recommended {
        Verdict::Optimal
    } else if same_family(taken, recommended) {
        Verdict::Suboptimal
    } else {
        Verdict::Wrong
    };

    Assessment { verdict, recommended }
}

const fn same_family(a: Action, b: Action) -> bool {
    const fn defensive(action: Action) -> bool {
        matches!(action, Action::Stand | Action::Surrender)
    }
    const fn aggressive(action: Action) -> bool {
        matches!(action, Action::Hit | Action::Double)
    }
    (defensive(a) && defensive(b)) || (aggressive(a) && aggressive(b))
}
