//! Named rule profiles and payout constants.

/// What the dealer does about the hole card before player turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleCardPolicy {
    /// Dealer takes a hole card and peeks for blackjack behind an ace or a
    /// ten-value up-card; insurance can be offered.
    Peek,
    /// No peek; blackjack only surfaces at the dealer's turn and insurance
    /// is never offered.
    NoPeek,
}

/// Whether and when surrender is a legal action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurrenderType {
    /// Surrender allowed on an untouched two-card hand after the deal.
    Late,
    /// Surrender never allowed.
    None,
}

/// Total-return multiplier on a regular win (wager plus even-money profit).
pub const REGULAR_PAYOUT: f64 = 2.0;
/// Total-return multiplier on a winning insurance stake (stake plus 2:1).
pub const INSURANCE_PAYOUT: f64 = 3.0;

/// An immutable named rule parameter set.
///
/// The engine reads the profile at settlement time rather than baking any
/// payout in, so swapping profiles changes payouts uniformly.
#[derive(Debug, Clone, PartialEq)]
pub struct RulesProfile {
    /// Profile name, e.g. `"vegas_strip"`.
    pub name: &'static str,
    /// Whether the dealer hits soft 17.
    pub dealer_hits_soft_17: bool,
    /// Total-return multiplier on a natural blackjack (2.5 = 3:2).
    pub blackjack_payout: f64,
    /// Whether doubling down is allowed on split hands.
    pub double_after_split: bool,
    /// Whether the house nominally allows re-splitting aces. Hands flagged
    /// as coming from split aces are still never re-split.
    pub resplit_aces: bool,
    /// Hole-card handling.
    pub hole_card_policy: HoleCardPolicy,
    /// Surrender availability.
    pub surrender: SurrenderType,
}

impl RulesProfile {
    /// Classic strip rules: dealer stands on soft 17, 3:2 blackjack, double
    /// after split, late surrender, dealer peeks. The documented default.
    #[must_use]
    pub const fn vegas_strip() -> Self {
        Self {
            name: "vegas_strip",
            dealer_hits_soft_17: false,
            blackjack_payout: 2.5,
            double_after_split: true,
            resplit_aces: false,
            hole_card_policy: HoleCardPolicy::Peek,
            surrender: SurrenderType::Late,
        }
    }

    /// Atlantic City rules: like the strip, but the house nominally permits
    /// re-splitting aces.
    #[must_use]
    pub const fn atlantic_city() -> Self {
        Self {
            name: "atlantic_city",
            dealer_hits_soft_17: false,
            blackjack_payout: 2.5,
            double_after_split: true,
            resplit_aces: true,
            hole_card_policy: HoleCardPolicy::Peek,
            surrender: SurrenderType::Late,
        }
    }

    /// European no-hole-card rules: dealer hits soft 17, takes no peek, no
    /// double after split and no surrender.
    #[must_use]
    pub const fn european_no_hole_card() -> Self {
        Self {
            name: "european_no_hole_card",
            dealer_hits_soft_17: true,
            blackjack_payout: 2.5,
            double_after_split: false,
            resplit_aces: false,
            hole_card_policy: HoleCardPolicy::NoPeek,
            surrender: SurrenderType::None,
        }
    }

    /// Resolves a profile by name, falling back to [`Self::vegas_strip`]
    /// with a logged warning when the name is not recognized.
    #[must_use]
    pub fn named(name: &str) -> Self {
        match name {
            "vegas_strip" => Self::vegas_strip(),
            "atlantic_city" => Self::atlantic_city(),
            "european_no_hole_card" => Self::european_no_hole_card(),
            other => {
                tracing::warn!(profile = other, "unknown rules profile, using vegas_strip");
                Self::vegas_strip()
            }
        }
    }

    /// Whether surrender is ever legal under this profile.
    #[must_use]
    pub fn allows_surrender(&self) -> bool {
        self.surrender == SurrenderType::Late
    }
}

impl Default for RulesProfile {
    fn default() -> Self {
        Self::vegas_strip()
    }
}

#[cfg(test)]
mod tests {
    use super::{HoleCardPolicy, RulesProfile, SurrenderType};

    #[test]
    fn unknown_name_falls_back_to_default() {
        let profile = RulesProfile::named("monte_carlo");
        assert_eq!(profile, RulesProfile::vegas_strip());
    }

    #[test]
    fn european_profile_disables_peek_and_surrender() {
        let profile = RulesProfile::named("european_no_hole_card");
        assert_eq!(profile.hole_card_policy, HoleCardPolicy::NoPeek);
        assert_eq!(profile.surrender, SurrenderType::None);
        assert!(!profile.allows_surrender());
    }
}
