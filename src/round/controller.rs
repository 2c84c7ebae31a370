//! Host-driven table controller: phases, pacing, bankroll and notifications.
//!
//! The controller never owns a clock. Anything a casino UI would animate is
//! modelled as a *pending step*: the controller records what should happen
//! next together with an advisory delay, and the host calls
//! [`RoundController::advance`] when it has waited (or immediately, for a
//! headless simulation). Skipping or shortening delays can never change an
//! outcome.

use std::time::Duration;

use crate::card::Card;
use crate::config::{GameConfig, PhaseDelays};
use crate::error::{ActionError, BetError, InsuranceError};
use crate::hand::HandStatus;
use crate::record::{PlayerRecord, RECORD_VERSION, SessionStats};
use crate::rng::RandomSource;
use crate::rules::{HoleCardPolicy, INSURANCE_PAYOUT, RulesProfile};
use crate::shoe::Shoe;
use crate::strategy::{self, Action, Assessment, Recommendation};

use super::actions::SplitOutcome;
use super::dealer::Outcome;
use super::event::{GameEvent, Phase, Seat};
use super::snapshot::TableSnapshot;
use super::RoundEngine;

/// A deferred continuation, executed by [`RoundController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    OfferInsurance,
    PeekCheck,
    BeginPlayerTurn,
    NextHand,
    DealerStep,
    Settle,
}

/// Runs rounds over a [`RoundEngine`], owning everything the engine does
/// not: the bankroll, the phase machine, pacing and the event stream.
pub struct RoundController {
    engine: RoundEngine,
    delays: PhaseDelays,
    min_bet: u64,
    phase: Phase,
    pending: Option<(Step, Duration)>,
    balance: u64,
    current_bet: u64,
    insurance_stake: Option<u64>,
    stats: SessionStats,
    subscribers: Vec<Box<dyn FnMut(&GameEvent)>>,
}

impl RoundController {
    /// Builds a table from the configuration, drawing entropy from the
    /// operating system.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, RandomSource::new())
    }

    /// Builds a table with a deterministic seed; identical seeds and inputs
    /// replay identical rounds.
    #[must_use]
    pub fn seeded(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, RandomSource::seeded(seed))
    }

    fn with_rng(config: &GameConfig, rng: RandomSource) -> Self {
        let profile = RulesProfile::named(&config.profile);
        let shoe = Shoe::new(
            config.decks,
            config.penetration,
            config.shuffle_mode,
            config.shuffle_passes,
            config.burn,
            rng,
        );

        Self {
            engine: RoundEngine::new(shoe, profile, config.max_splits),
            delays: config.delays.clone(),
            min_bet: config.min_bet,
            phase: Phase::Betting,
            pending: None,
            balance: config.starting_balance,
            current_bet: 0,
            insurance_stake: None,
            stats: SessionStats::default(),
            subscribers: Vec::new(),
        }
    }

    /// Registers an event subscriber. Subscribers see every event in order
    /// and cannot influence the round.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&GameEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    fn emit(&mut self, event: &GameEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.emit(&GameEvent::PhaseChanged(phase));
    }

    fn schedule(&mut self, step: Step, delay: Duration) {
        self.pending = Some((step, delay));
    }

    /// The advisory delay before the next deferred step, if one is pending.
    #[must_use]
    pub fn pending_delay(&self) -> Option<Duration> {
        self.pending.map(|(_, delay)| delay)
    }

    /// Drops the pending step without running it. A new round can then be
    /// started once the table is settled.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Runs the pending deferred step, if any. Returns whether a step ran.
    ///
    /// Hosts that animate call this after waiting out
    /// [`pending_delay`](Self::pending_delay); headless hosts call it in a
    /// loop until it returns `false`.
    pub fn advance(&mut self) -> bool {
        let Some((step, _)) = self.pending.take() else {
            return false;
        };

        match step {
            Step::OfferInsurance => self.set_phase(Phase::InsuranceOffer),
            Step::PeekCheck => {
                if self.phase != Phase::DealerPeekCheck {
                    self.set_phase(Phase::DealerPeekCheck);
                }
                if self.engine.dealer().is_natural() {
                    self.schedule(Step::Settle, self.delays.turn);
                } else {
                    self.schedule(Step::BeginPlayerTurn, self.delays.turn);
                }
            }
            Step::BeginPlayerTurn | Step::NextHand => self.advance_turn(),
            Step::DealerStep => {
                if let Some(card) = self.engine.dealer_hit() {
                    self.emit(&GameEvent::DealerDrew { card });
                    self.schedule(Step::DealerStep, self.delays.dealer_step);
                } else {
                    self.schedule(Step::Settle, self.delays.settle);
                }
            }
            Step::Settle => self.settle(),
        }

        true
    }

    /// Debits a wager and deals the opening hands.
    ///
    /// If the previous round passed the cut card the shoe is rebuilt and
    /// reshuffled first. Where the table goes after the deal depends on the
    /// dealer's up card: an ace opens the insurance offer, a ten-value card
    /// triggers the hole-card peek (under a peeking profile), anything else
    /// goes straight to the player's turn.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress, the bet is below the
    /// table minimum, or the bankroll cannot cover it.
    pub fn start_round(&mut self, bet: u64) -> Result<(), BetError> {
        match self.phase {
            Phase::Betting | Phase::RoundOver => {}
            _ => return Err(BetError::RoundInProgress),
        }
        if bet < self.min_bet {
            return Err(BetError::BelowMinimum);
        }
        if bet > self.balance {
            return Err(BetError::InsufficientBalance);
        }

        self.cancel_pending();

        if self.engine.shoe().needs_reshuffle() {
            self.engine.shoe_mut().reshuffle();
            self.emit(&GameEvent::ShoeReshuffled);
        }

        self.balance -= bet;
        self.current_bet = bet;
        self.insurance_stake = None;
        self.stats.hands_played += 1;

        self.engine.begin_round(bet);

        self.emit(&GameEvent::RoundStarted { wager: bet });
        self.set_phase(Phase::Dealing);

        let player = self.engine.hands()[0].cards().to_vec();
        for card in player {
            self.emit(&GameEvent::CardDealt {
                seat: Seat::Player,
                hand: 0,
                card: Some(card),
            });
        }
        let up_card = self.engine.dealer().up_card();
        self.emit(&GameEvent::CardDealt {
            seat: Seat::Dealer,
            hand: 0,
            card: up_card,
        });
        self.emit(&GameEvent::CardDealt {
            seat: Seat::Dealer,
            hand: 0,
            card: None,
        });

        let peeks = self.engine.profile().hole_card_policy == HoleCardPolicy::Peek;
        let step = match up_card {
            Some(card) if peeks && card.is_ace() => Step::OfferInsurance,
            Some(card) if peeks && card.value() == 10 => Step::PeekCheck,
            _ => Step::BeginPlayerTurn,
        };
        self.schedule(step, self.delays.deal);

        Ok(())
    }

    /// Takes or declines the open insurance offer.
    ///
    /// The stake is half the round's wager, capped by the remaining
    /// bankroll. Either way the dealer then checks the hole card.
    ///
    /// # Errors
    ///
    /// Returns an error if no insurance offer is open.
    pub fn respond_insurance(&mut self, accept: bool) -> Result<(), InsuranceError> {
        if self.phase != Phase::InsuranceOffer {
            return Err(InsuranceError::NotOffered);
        }

        if accept {
            let stake = (self.current_bet / 2).min(self.balance);
            self.balance -= stake;
            self.insurance_stake = Some(stake);
            self.emit(&GameEvent::InsurancePlaced { stake });
        } else {
            self.emit(&GameEvent::InsuranceDeclined);
        }

        self.set_phase(Phase::DealerPeekCheck);
        self.schedule(Step::PeekCheck, self.delays.turn);
        Ok(())
    }

    fn turn_hand(&self) -> Result<usize, ActionError> {
        match self.phase {
            Phase::PlayerTurn { hand } => Ok(hand),
            Phase::Settlement | Phase::RoundOver => Err(ActionError::RoundOver),
            _ => Err(ActionError::OutOfTurn),
        }
    }

    /// Draws a card onto the active hand.
    ///
    /// # Errors
    ///
    /// Returns an error outside the player's turn or if the engine rejects
    /// the draw.
    pub fn hit(&mut self) -> Result<Card, ActionError> {
        let index = self.turn_hand()?;
        let card = self.engine.hit(index)?;
        self.emit(&GameEvent::CardDealt {
            seat: Seat::Player,
            hand: index,
            card: Some(card),
        });

        match self.engine.hands()[index].status() {
            HandStatus::Busted => {
                self.emit(&GameEvent::HandBusted { hand: index });
                self.schedule(Step::NextHand, self.delays.next_hand);
            }
            HandStatus::Stand => self.schedule(Step::NextHand, self.delays.next_hand),
            HandStatus::Active | HandStatus::Surrendered => {}
        }

        Ok(card)
    }

    /// Stands the active hand and moves straight to the next decision.
    ///
    /// # Errors
    ///
    /// Returns an error outside the player's turn.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        let index = self.turn_hand()?;
        self.engine.stand(index)?;
        self.advance_turn();
        Ok(())
    }

    /// Doubles down on the active hand: debits a matching wager, draws one
    /// card and ends the hand.
    ///
    /// # Errors
    ///
    /// Returns an error outside the player's turn, if the bankroll cannot
    /// cover the extra wager, or if the engine rejects the double.
    pub fn double(&mut self) -> Result<Card, ActionError> {
        let index = self.turn_hand()?;
        let wager = self
            .engine
            .hand(index)
            .ok_or(ActionError::HandNotFound)?
            .wager();
        if wager > self.balance {
            return Err(ActionError::InsufficientBalance);
        }

        let card = self.engine.double(index)?;
        self.balance -= wager;
        self.emit(&GameEvent::CardDealt {
            seat: Seat::Player,
            hand: index,
            card: Some(card),
        });
        if self.engine.hands()[index].status() == HandStatus::Busted {
            self.emit(&GameEvent::HandBusted { hand: index });
        }
        self.schedule(Step::NextHand, self.delays.next_hand);

        Ok(card)
    }

    /// Splits the active pair into two hands, debiting a second wager.
    ///
    /// Play stays on the original hand unless the split forced it to stand
    /// (split aces, or a card that completed 21).
    ///
    /// # Errors
    ///
    /// Returns an error outside the player's turn, if the bankroll cannot
    /// cover the second wager, or if the engine rejects the split.
    pub fn split(&mut self) -> Result<SplitOutcome, ActionError> {
        let index = self.turn_hand()?;
        let wager = self
            .engine
            .hand(index)
            .ok_or(ActionError::HandNotFound)?
            .wager();
        if wager > self.balance {
            return Err(ActionError::InsufficientBalance);
        }

        let outcome = self.engine.split(index)?;
        self.balance -= wager;
        self.emit(&GameEvent::HandSplit {
            hand: index,
            aces: outcome.aces,
        });
        self.emit(&GameEvent::CardDealt {
            seat: Seat::Player,
            hand: index,
            card: Some(outcome.first_card),
        });
        self.emit(&GameEvent::CardDealt {
            seat: Seat::Player,
            hand: outcome.new_index,
            card: Some(outcome.second_card),
        });

        // The original hand keeps acting unless the split forced it to stand.
        if self.engine.hands()[index].status() != HandStatus::Active {
            self.schedule(Step::NextHand, self.delays.next_hand);
        }

        Ok(outcome)
    }

    /// Surrenders the opening hand for half the wager.
    ///
    /// # Errors
    ///
    /// Returns an error outside the player's turn or if the engine rejects
    /// the surrender.
    pub fn surrender(&mut self) -> Result<(), ActionError> {
        let index = self.turn_hand()?;
        self.engine.surrender(index)?;
        self.emit(&GameEvent::HandSurrendered { hand: index });
        self.schedule(Step::Settle, self.delays.settle);
        Ok(())
    }

    /// What basic strategy recommends for the active hand, or `None`
    /// outside the player's turn.
    #[must_use]
    pub fn advice(&self) -> Option<Recommendation> {
        let index = self.turn_hand().ok()?;
        let hand = self.engine.hand(index)?;
        let dealer_up = self.engine.dealer().up_card()?;
        Some(strategy::recommend(
            hand,
            dealer_up,
            self.engine.profile(),
            self.split_eligible(index),
        ))
    }

    /// Compares a contemplated action against basic strategy for the active
    /// hand, or `None` outside the player's turn.
    #[must_use]
    pub fn assess(&self, taken: Action) -> Option<Assessment> {
        let index = self.turn_hand().ok()?;
        let hand = self.engine.hand(index)?;
        let dealer_up = self.engine.dealer().up_card()?;
        Some(strategy::assess(
            taken,
            hand,
            dealer_up,
            self.engine.profile(),
            self.split_eligible(index),
        ))
    }

    fn split_eligible(&self, index: usize) -> bool {
        let Some(hand) = self.engine.hand(index) else {
            return false;
        };
        hand.is_pair()
            && !hand.is_from_aces()
            && self.engine.hands().len() <= self.engine.max_splits
            && hand.wager() <= self.balance
    }

    fn advance_turn(&mut self) {
        if let Some(next) = self.engine.seek_active_hand(0) {
            self.set_phase(Phase::PlayerTurn { hand: next });
        } else {
            self.begin_dealer_turn();
        }
    }

    fn begin_dealer_turn(&mut self) {
        if self.engine.dealer_must_play() {
            self.set_phase(Phase::DealerTurn);
            self.reveal_hole();
            self.schedule(Step::DealerStep, self.delays.dealer_step);
        } else {
            self.schedule(Step::Settle, self.delays.settle);
        }
    }

    fn reveal_hole(&mut self) {
        if !self.engine.dealer().is_hole_revealed() {
            self.engine.dealer_mut().reveal_hole();
            if let Some(card) = self.engine.dealer().cards().get(1).copied() {
                self.emit(&GameEvent::HoleRevealed { card });
            }
        }
    }

    fn settle(&mut self) {
        self.reveal_hole();
        self.set_phase(Phase::Settlement);

        if let Some(stake) = self.insurance_stake.take() {
            #[expect(
                clippy::cast_precision_loss,
                reason = "f64 has sufficient precision for wager amounts"
            )]
            let payout = if self.engine.dealer().is_natural() {
                (stake as f64 * INSURANCE_PAYOUT).floor() as u64
            } else {
                0
            };
            self.balance += payout;
            self.stats.total_wagered += stake;
            self.record_net(payout, stake);
            self.emit(&GameEvent::InsuranceSettled { stake, payout });
        }

        let summary = self.engine.evaluate_results();
        for result in &summary.results {
            match result.outcome {
                Outcome::Win => {
                    self.stats.wins += 1;
                    if result.natural {
                        self.stats.blackjacks += 1;
                    }
                }
                Outcome::Lose | Outcome::Surrender => self.stats.losses += 1,
                Outcome::Tie => {}
            }
        }

        let payout = summary.total_payout();
        let wagered = summary.total_wagered();
        self.balance += payout;
        self.stats.total_wagered += wagered;
        self.record_net(payout, wagered);

        self.engine.set_game_over();
        self.emit(&GameEvent::RoundSettled { summary });
        self.set_phase(Phase::RoundOver);
    }

    #[expect(
        clippy::cast_possible_wrap,
        reason = "wagers stay far below i64::MAX"
    )]
    const fn record_net(&mut self, payout: u64, wagered: u64) {
        self.stats.total_winnings += payout as i64 - wagered as i64;
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Current bankroll.
    #[must_use]
    pub const fn balance(&self) -> u64 {
        self.balance
    }

    /// Running session counters.
    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Read access to the underlying engine.
    #[must_use]
    pub const fn engine(&self) -> &RoundEngine {
        &self.engine
    }

    /// A renderable view of the whole table.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            phase: self.phase,
            hands: self.engine.snapshot_hands(),
            active_hand: self.engine.active_index(),
            dealer: self.engine.snapshot_dealer(),
            balance: self.balance,
            shoe_remaining: self.engine.shoe().remaining(),
            cut_card_reached: self.engine.shoe().needs_reshuffle(),
        }
    }

    /// Captures the bankroll and counters as a versioned record.
    #[must_use]
    pub const fn export_record(&self) -> PlayerRecord {
        PlayerRecord {
            version: RECORD_VERSION,
            balance: self.balance,
            stats: self.stats,
        }
    }

    /// Restores bankroll and counters from a record. A record with an
    /// unknown version is ignored and the current state kept; the return
    /// value says whether the record was applied.
    pub fn import_record(&mut self, record: &PlayerRecord) -> bool {
        if !record.is_compatible() {
            tracing::warn!(version = record.version, "ignoring incompatible player record");
            return false;
        }
        self.balance = record.balance;
        self.stats = record.stats;
        true
    }

    /// Replaces the shoe's remaining cards with an exact sequence (the last
    /// card is drawn first). For deterministic replays and tests.
    pub fn load_shoe(&mut self, cards: Vec<Card>) {
        self.engine.shoe_mut().load(cards);
    }
}
