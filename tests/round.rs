//! End-to-end round flow through the controller.
//!
//! Shoes are stacked with `load_shoe`: the last card in the list is drawn
//! first, so draw sequences below read left to right in deal order.

use std::cell::RefCell;
use std::rc::Rc;

use sabot::{
    Action, ActionError, BetError, Card, GameConfig, GameEvent, HandStatus, Phase,
    RoundController, Suit, Verdict,
};

fn stacked(draws: &[u8], profile: &str) -> RoundController {
    let config = GameConfig::default()
        .with_decks(1)
        .with_burn(0)
        .with_profile(profile);
    let mut table = RoundController::seeded(&config, 7);

    let mut cards: Vec<Card> = draws
        .iter()
        .map(|&rank| Card::new(Suit::Clubs, rank))
        .collect();
    cards.reverse();
    table.load_shoe(cards);
    table
}

/// Runs every pending deferred step, as a headless host would.
fn run(table: &mut RoundController) {
    while table.advance() {}
}

#[test]
fn natural_blackjack_pays_three_to_two() {
    // Player A,K; dealer 10,8.
    let mut table = stacked(&[1, 13, 10, 8], "vegas_strip");
    table.start_round(100).unwrap();
    run(&mut table);

    assert_eq!(table.phase(), Phase::RoundOver);
    assert_eq!(table.balance(), 1150);
    assert_eq!(table.stats().wins, 1);
    assert_eq!(table.stats().blackjacks, 1);
    assert_eq!(table.stats().hands_played, 1);
}

#[test]
fn insurance_offsets_a_dealer_blackjack() {
    // Player 10,9; dealer A,K.
    let mut table = stacked(&[10, 9, 1, 13], "vegas_strip");
    table.start_round(100).unwrap();
    run(&mut table);

    assert_eq!(table.phase(), Phase::InsuranceOffer);
    assert_eq!(table.balance(), 900);

    table.respond_insurance(true).unwrap();
    // Half the wager went on the side bet.
    assert_eq!(table.balance(), 850);
    run(&mut table);

    // Side bet returns 150, main bet is lost: back to even.
    assert_eq!(table.phase(), Phase::RoundOver);
    assert_eq!(table.balance(), 1000);
    assert_eq!(table.stats().losses, 1);
}

#[test]
fn declined_insurance_loses_only_the_main_bet() {
    let mut table = stacked(&[10, 9, 1, 13], "vegas_strip");
    table.start_round(100).unwrap();
    run(&mut table);

    table.respond_insurance(false).unwrap();
    run(&mut table);

    assert_eq!(table.phase(), Phase::RoundOver);
    assert_eq!(table.balance(), 900);
}

#[test]
fn surrender_returns_half_the_wager() {
    // Player 10,6; dealer 9,10.
    let mut table = stacked(&[10, 6, 9, 10], "vegas_strip");
    table.start_round(100).unwrap();
    run(&mut table);

    assert!(matches!(table.phase(), Phase::PlayerTurn { hand: 0 }));
    table.surrender().unwrap();
    run(&mut table);

    assert_eq!(table.phase(), Phase::RoundOver);
    assert_eq!(table.balance(), 950);
    assert_eq!(table.stats().losses, 1);

    let snapshot = table.snapshot();
    assert_eq!(snapshot.hands[0].status, HandStatus::Surrendered);
    // The dealer never played out the hand.
    assert_eq!(snapshot.dealer.cards.len(), 2);
}

#[test]
fn split_plays_both_hands_to_separate_results() {
    // Player 8,8; dealer 10,7; split draws 2 and 3; hits draw 5 and 6.
    let mut table = stacked(&[8, 8, 10, 7, 2, 3, 5, 6], "vegas_strip");
    table.start_round(10).unwrap();
    run(&mut table);

    table.split().unwrap();
    // Second wager debited.
    assert_eq!(table.balance(), 980);

    // First hand: 8,2 then a 5 for 15.
    table.hit().unwrap();
    table.stand().unwrap();
    assert!(matches!(table.phase(), Phase::PlayerTurn { hand: 1 }));

    // Second hand: 8,3 then a 6 for 17.
    table.hit().unwrap();
    table.stand().unwrap();
    run(&mut table);

    assert_eq!(table.phase(), Phase::RoundOver);
    let snapshot = table.snapshot();
    assert_eq!(snapshot.hands.len(), 2);
    assert_eq!(snapshot.hands[0].cards.len(), 3);
    assert_eq!(snapshot.hands[1].cards.len(), 3);

    // Dealer stands on hard 17: hand one loses, hand two pushes.
    assert_eq!(table.stats().losses, 1);
    assert_eq!(table.balance(), 990);
}

#[test]
fn a_busted_hand_cannot_stand_and_settles_as_a_loss() {
    // Player 10,6 hits into a 9 for 25; dealer 10,8.
    let mut table = stacked(&[10, 6, 10, 8, 9], "vegas_strip");
    table.start_round(100).unwrap();
    run(&mut table);

    table.hit().unwrap();
    assert_eq!(
        table.snapshot().hands[0].status,
        HandStatus::Busted
    );

    // The bust is already resolved; standing must not revive it.
    assert_eq!(table.stand(), Err(ActionError::HandNotActive));
    run(&mut table);

    assert_eq!(table.phase(), Phase::RoundOver);
    assert_eq!(table.balance(), 900);
    assert_eq!(table.stats().losses, 1);
}

#[test]
fn a_surrendered_hand_cannot_stand_for_a_full_win() {
    // Player 10,6; dealer 9,10.
    let mut table = stacked(&[10, 6, 9, 10], "vegas_strip");
    table.start_round(100).unwrap();
    run(&mut table);

    table.surrender().unwrap();
    assert_eq!(table.stand(), Err(ActionError::HandNotActive));
    run(&mut table);

    // Half the wager comes back, nothing more.
    assert_eq!(table.balance(), 950);
    assert_eq!(table.snapshot().hands[0].status, HandStatus::Surrendered);
}

#[test]
fn dealer_draws_to_seventeen_after_the_player_stands() {
    // Player 10,9; dealer 9,5, then draws a 4 for 18.
    let mut table = stacked(&[10, 9, 9, 5, 4], "vegas_strip");
    table.start_round(10).unwrap();
    run(&mut table);

    table.stand().unwrap();
    assert_eq!(table.phase(), Phase::DealerTurn);
    run(&mut table);

    let snapshot = table.snapshot();
    assert!(snapshot.dealer.hole_revealed);
    assert_eq!(snapshot.dealer.cards.len(), 3);
    assert_eq!(snapshot.dealer.visible_value, 18);
    // 19 beats 18.
    assert_eq!(table.balance(), 1010);
}

#[test]
fn bet_validation_rejects_bad_wagers() {
    let mut table = stacked(&[10, 9, 9, 8], "vegas_strip");

    assert_eq!(table.start_round(5), Err(BetError::BelowMinimum));
    assert_eq!(table.start_round(5000), Err(BetError::InsufficientBalance));

    table.start_round(10).unwrap();
    assert_eq!(table.start_round(10), Err(BetError::RoundInProgress));
}

#[test]
fn actions_outside_the_player_turn_are_rejected() {
    let mut table = stacked(&[10, 9, 9, 8], "vegas_strip");
    table.start_round(10).unwrap();

    // Still dealing; the deferred step has not run yet.
    assert!(table.hit().is_err());

    run(&mut table);
    table.stand().unwrap();
    run(&mut table);

    assert_eq!(table.phase(), Phase::RoundOver);
    assert!(table.hit().is_err());
    assert!(table.respond_insurance(true).is_err());
}

#[test]
fn advisor_recommends_surrender_on_sixteen_against_ten() {
    // Player 10,6; dealer 10,5.
    let mut table = stacked(&[10, 6, 10, 5], "vegas_strip");
    table.start_round(10).unwrap();
    run(&mut table);

    let advice = table.advice().unwrap();
    assert_eq!(advice.action, Action::Surrender);
    assert_eq!(advice.total, 16);

    // Standing is at least in the defensive family; hitting is not.
    assert_eq!(table.assess(Action::Stand).unwrap().verdict, Verdict::Suboptimal);
    assert_eq!(table.assess(Action::Hit).unwrap().verdict, Verdict::Wrong);
}

#[test]
fn events_arrive_in_deal_order() {
    let seen: Rc<RefCell<Vec<GameEvent>>> = Rc::default();
    let sink = Rc::clone(&seen);

    // Player A,K; dealer 9,9.
    let mut table = stacked(&[1, 13, 9, 9], "vegas_strip");
    table.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    table.start_round(50).unwrap();
    run(&mut table);

    let events = seen.borrow();
    assert!(matches!(events[0], GameEvent::RoundStarted { wager: 50 }));
    assert!(matches!(events[1], GameEvent::PhaseChanged(Phase::Dealing)));

    // Two player cards face up, dealer up card, then the hidden hole card.
    assert!(matches!(
        events[2],
        GameEvent::CardDealt { card: Some(_), .. }
    ));
    assert!(matches!(
        events[3],
        GameEvent::CardDealt { card: Some(_), .. }
    ));
    assert!(matches!(
        events[4],
        GameEvent::CardDealt { card: Some(_), .. }
    ));
    assert!(matches!(events[5], GameEvent::CardDealt { card: None, .. }));

    // The hole card surfaces before settlement.
    assert!(events
        .iter()
        .any(|event| matches!(event, GameEvent::HoleRevealed { .. })));
    assert!(matches!(
        events.last(),
        Some(GameEvent::PhaseChanged(Phase::RoundOver))
    ));
}

#[test]
fn pending_delays_are_advisory_only() {
    let mut table = stacked(&[10, 9, 9, 8, 2], "vegas_strip");

    assert!(table.pending_delay().is_none());
    table.start_round(10).unwrap();
    assert!(table.pending_delay().is_some());

    // Advancing immediately is always legal.
    assert!(table.advance());
    assert!(!table.advance());
    assert!(matches!(table.phase(), Phase::PlayerTurn { hand: 0 }));
}

#[test]
fn records_round_trip_through_json() {
    // Player A,K; dealer 10,8.
    let mut table = stacked(&[1, 13, 10, 8], "vegas_strip");
    table.start_round(100).unwrap();
    run(&mut table);

    let record = table.export_record();
    let json = serde_json::to_string(&record).unwrap();
    let restored: sabot::PlayerRecord = serde_json::from_str(&json).unwrap();

    let mut fresh = stacked(&[2, 3, 4, 5], "vegas_strip");
    assert!(fresh.import_record(&restored));
    assert_eq!(fresh.balance(), 1150);
    assert_eq!(fresh.stats().blackjacks, 1);

    let mut incompatible = restored;
    incompatible.version += 1;
    assert!(!fresh.import_record(&incompatible));
    assert_eq!(fresh.balance(), 1150);
}

#[test]
fn cut_card_triggers_a_reshuffle_between_rounds() {
    let seen: Rc<RefCell<Vec<GameEvent>>> = Rc::default();
    let sink = Rc::clone(&seen);

    // A tiny stacked supply passes the cut card during the first round.
    let mut table = stacked(&[10, 9, 9, 8, 5], "vegas_strip");
    table.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    table.start_round(10).unwrap();
    run(&mut table);
    table.stand().unwrap();
    run(&mut table);

    assert!(table.snapshot().cut_card_reached);
    assert!(!seen
        .borrow()
        .iter()
        .any(|event| matches!(event, GameEvent::ShoeReshuffled)));

    // The reshuffle happens at the start of the next round, never mid-round.
    table.start_round(10).unwrap();
    assert!(seen
        .borrow()
        .iter()
        .any(|event| matches!(event, GameEvent::ShoeReshuffled)));
    assert_eq!(table.snapshot().shoe_remaining, 52 - 4);
}
