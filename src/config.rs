//! Game configuration.

use std::time::Duration;

use crate::shuffle::ShuffleMode;

/// Presentation pacing: how long the host is advised to wait before calling
/// [`advance`](crate::round::RoundController::advance) after each kind of
/// deferred step. Purely cosmetic; delays never change an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseDelays {
    /// After the initial deal, before insurance/peek/player turn.
    pub deal: Duration,
    /// Between intermediate phase steps (peek result, insurance resolution).
    pub turn: Duration,
    /// After a hand resolves, before moving to the next hand.
    pub next_hand: Duration,
    /// Between individual dealer draws.
    pub dealer_step: Duration,
    /// Before settlement is applied.
    pub settle: Duration,
}

impl Default for PhaseDelays {
    fn default() -> Self {
        Self {
            deal: Duration::from_millis(500),
            turn: Duration::from_millis(500),
            next_hand: Duration::from_millis(600),
            dealer_step: Duration::from_millis(600),
            settle: Duration::from_millis(800),
        }
    }
}

/// Configuration for a blackjack table.
///
/// Use the builder pattern to customize:
///
/// ```
/// use sabot::{GameConfig, ShuffleMode};
///
/// let config = GameConfig::default()
///     .with_decks(8)
///     .with_shuffle(ShuffleMode::Casino, 4)
///     .with_profile("atlantic_city");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Fraction of the shoe reserved behind the cut card.
    pub penetration: f64,
    /// Shuffle strategy applied on reset.
    pub shuffle_mode: ShuffleMode,
    /// Riffle passes in casino mode (at least one is always performed).
    pub shuffle_passes: u32,
    /// Cards burned after every reshuffle.
    pub burn: usize,
    /// Maximum number of splits per round.
    pub max_splits: usize,
    /// Name of the active rules profile.
    pub profile: String,
    /// Minimum wager per round.
    pub min_bet: u64,
    /// Bankroll the player starts with.
    pub starting_balance: u64,
    /// Presentation pacing (non-behavioral).
    pub delays: PhaseDelays,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            decks: 6,
            penetration: 0.2,
            shuffle_mode: ShuffleMode::Fair,
            shuffle_passes: 3,
            burn: 1,
            max_splits: 3,
            profile: "vegas_strip".to_owned(),
            min_bet: 10,
            starting_balance: 1000,
            delays: PhaseDelays::default(),
        }
    }
}

impl GameConfig {
    /// Sets the number of decks.
    ///
    /// ```
    /// use sabot::GameConfig;
    ///
    /// let config = GameConfig::default().with_decks(2);
    /// assert_eq!(config.decks, 2);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the cut-card penetration fraction.
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets the shuffle strategy and riffle pass count.
    ///
    /// ```
    /// use sabot::{GameConfig, ShuffleMode};
    ///
    /// let config = GameConfig::default().with_shuffle(ShuffleMode::Casino, 2);
    /// assert_eq!(config.shuffle_passes, 2);
    /// ```
    #[must_use]
    pub const fn with_shuffle(mut self, mode: ShuffleMode, passes: u32) -> Self {
        self.shuffle_mode = mode;
        self.shuffle_passes = passes;
        self
    }

    /// Sets the post-reshuffle burn count.
    #[must_use]
    pub const fn with_burn(mut self, burn: usize) -> Self {
        self.burn = burn;
        self
    }

    /// Sets the maximum number of splits per round.
    #[must_use]
    pub const fn with_max_splits(mut self, max_splits: usize) -> Self {
        self.max_splits = max_splits;
        self
    }

    /// Sets the active rules profile by name. Unknown names fall back to
    /// `vegas_strip` when the table is built.
    #[must_use]
    pub fn with_profile(mut self, name: &str) -> Self {
        self.profile = name.to_owned();
        self
    }

    /// Sets the minimum wager.
    #[must_use]
    pub const fn with_min_bet(mut self, min_bet: u64) -> Self {
        self.min_bet = min_bet;
        self
    }

    /// Sets the starting bankroll.
    #[must_use]
    pub const fn with_starting_balance(mut self, balance: u64) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Sets the presentation pacing delays.
    #[must_use]
    pub fn with_delays(mut self, delays: PhaseDelays) -> Self {
        self.delays = delays;
        self
    }
}
