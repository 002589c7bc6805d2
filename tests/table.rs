//! Table integration tests.

use bjtable::{
    ActionError, BetError, Card, Outcome, Phase, PhaseError, PlayerAction, Table, TableOptions,
    rules,
};

fn cards(values: &[u8]) -> Vec<Card> {
    values.iter().copied().map(Card::new).collect()
}

/// A table with one manual seat per bankroll, in betting for hand 1.
fn table_with(bankrolls: &[u64]) -> Table {
    let mut table = Table::new(TableOptions::default(), 42);
    for (i, &bankroll) in bankrolls.iter().enumerate() {
        table.join(format!("player-{i}"), bankroll).unwrap();
    }
    table.start_new_hand();
    table
}

#[tokio::test]
async fn win_pays_even_money() {
    let mut table = table_with(&[125]);
    table.place_bet(0, 25).unwrap();
    assert_eq!(table.seat(0).unwrap().bankroll, 100);

    // player 10, 9; dealer 10, 7
    table.set_shoe_cards(&[10, 10, 9, 7]);
    table.start_dealing().unwrap();
    let state = table.start_decision_phase().await.unwrap();
    assert_eq!(state.phase, Phase::Decisions);
    assert_eq!(state.current_seat, Some(0));

    let state = table
        .apply_player_action(0, PlayerAction::Stand)
        .await
        .unwrap();
    assert_eq!(state.phase, Phase::Dealer);
    assert!(state.dealer.revealed);

    let result = table.settle_hands().unwrap();
    let seat = &result.seats[0];
    assert_eq!(seat.outcome, Outcome::Win);
    assert!(!seat.blackjack);
    assert_eq!(seat.payout, 50);
    assert_eq!(seat.net, 25);
    assert_eq!(seat.bankroll, 150);
    assert_eq!(result.dealer_value, 17);
    assert_eq!(result.state.phase, Phase::Finished);
    assert_eq!(table.seat(0).unwrap().bankroll, 150);
}

#[tokio::test]
async fn blackjack_pays_three_to_two() {
    let mut table = table_with(&[120]);
    table.place_bet(0, 20).unwrap();
    assert_eq!(table.seat(0).unwrap().bankroll, 100);

    // player A, 10; dealer 10, 7
    table.set_shoe_cards(&[1, 10, 10, 7]);
    table.start_dealing().unwrap();
    assert!(table.seat(0).unwrap().standing);

    // Nobody can act, so the dealer plays straight away.
    let state = table.start_decision_phase().await.unwrap();
    assert_eq!(state.phase, Phase::Dealer);
    assert_eq!(state.current_seat, None);

    let result = table.settle_hands().unwrap();
    let seat = &result.seats[0];
    assert_eq!(seat.outcome, Outcome::Win);
    assert!(seat.blackjack);
    assert_eq!(seat.payout, 50);
    assert_eq!(seat.bankroll, 150);
}

#[tokio::test]
async fn push_and_loss_settle_escrow() {
    let mut table = table_with(&[100, 100]);
    table.place_bet(0, 10).unwrap();
    table.place_bet(1, 10).unwrap();

    // seat 0: 10, 7 = 17; seat 1: 10, 6 = 16; dealer 10, 7 = 17
    table.set_shoe_cards(&[10, 10, 10, 7, 6, 7]);
    table.start_dealing().unwrap();
    table.start_decision_phase().await.unwrap();
    table
        .apply_player_action(0, PlayerAction::Stand)
        .await
        .unwrap();
    table
        .apply_player_action(1, PlayerAction::Stand)
        .await
        .unwrap();

    let result = table.settle_hands().unwrap();
    assert_eq!(result.seats[0].outcome, Outcome::Push);
    assert_eq!(result.seats[0].bankroll, 100);
    assert_eq!(result.seats[1].outcome, Outcome::Lose);
    assert_eq!(result.seats[1].net, -10);
    assert_eq!(result.seats[1].bankroll, 90);
}

#[test]
fn bet_errors() {
    let mut table = Table::new(TableOptions::default(), 1);
    let seat = table.join("alice", 30).unwrap();

    assert_eq!(
        table.place_bet(seat, 10).unwrap_err(),
        BetError::InvalidPhase(Phase::Waiting)
    );

    table.start_new_hand();
    assert_eq!(
        table.place_bet(seat, 4).unwrap_err(),
        BetError::BelowMinimum { amount: 4, min: 5 }
    );
    assert_eq!(
        table.place_bet(seat, 101).unwrap_err(),
        BetError::AboveMaximum {
            amount: 101,
            max: 100
        }
    );
    assert_eq!(
        table.place_bet(seat, 40).unwrap_err(),
        BetError::InsufficientFunds {
            amount: 40,
            available: 30
        }
    );
    assert_eq!(
        table.place_bet(seat + 1, 10).unwrap_err(),
        BetError::SeatNotFound
    );

    // Rejections leave the seat untouched.
    let alice = table.seat(seat).unwrap();
    assert_eq!((alice.bankroll, alice.bet), (30, 0));
    assert!(table.state().bets_placed.is_empty());
}

#[test]
fn rebet_replaces_instead_of_accumulating() {
    let mut table = table_with(&[30]);
    table.place_bet(0, 10).unwrap();
    table.place_bet(0, 30).unwrap();

    let seat = table.seat(0).unwrap();
    assert_eq!(seat.bet, 30);
    assert_eq!(seat.bankroll, 0);

    table.place_bet(0, 5).unwrap();
    let seat = table.seat(0).unwrap();
    assert_eq!(seat.bet, 5);
    assert_eq!(seat.bankroll, 25);
    assert_eq!(table.state().bets_placed, vec![0]);
}

#[test]
fn deal_errors() {
    let mut table = Table::new(TableOptions::default(), 1);
    table.join("alice", 100).unwrap();
    table.join("bob", 100).unwrap();
    table.join("broke", 3).unwrap();

    assert!(matches!(
        table.start_dealing(),
        Err(PhaseError::Invalid {
            phase: Phase::Waiting,
            ..
        })
    ));

    table.start_new_hand();
    assert_eq!(
        table.start_dealing().unwrap_err(),
        PhaseError::BetsIncomplete(vec![0, 1])
    );

    // The seat that cannot cover the minimum is not waited on.
    table.place_bet(0, 10).unwrap();
    assert_eq!(
        table.start_dealing().unwrap_err(),
        PhaseError::BetsIncomplete(vec![1])
    );
    table.place_bet(1, 10).unwrap();
    table.start_dealing().unwrap();

    assert!(!table.seat(2).unwrap().in_hand());
    assert_eq!(table.seat(0).unwrap().hand.len(), 2);
    assert_eq!(table.dealer().cards.len(), 2);
}

#[test]
fn dealing_needs_at_least_one_bet() {
    let mut table = table_with(&[2]);
    assert_eq!(table.start_dealing().unwrap_err(), PhaseError::NoBets);
}

#[test]
fn seating_closes_during_a_hand() {
    let mut table = table_with(&[100]);
    assert!(matches!(
        table.join("late", 100),
        Err(PhaseError::Invalid {
            phase: Phase::Betting,
            ..
        })
    ));
}

#[tokio::test]
async fn turn_order_and_actions() {
    let mut table = table_with(&[100, 100]);
    table.place_bet(0, 10).unwrap();
    table.place_bet(1, 10).unwrap();

    // seat 0: 5, 6; seat 1: 10, 10; dealer 10, 7; then seat 0 draws a 10
    table.set_shoe_cards(&[5, 10, 10, 6, 10, 7, 10]);
    table.start_dealing().unwrap();

    assert_eq!(
        table
            .apply_player_action(0, PlayerAction::Hit)
            .await
            .unwrap_err(),
        ActionError::InvalidPhase(Phase::Dealing)
    );

    table.start_decision_phase().await.unwrap();
    assert_eq!(
        table
            .apply_player_action(1, PlayerAction::Stand)
            .await
            .unwrap_err(),
        ActionError::NotYourTurn { seat: 1 }
    );
    assert_eq!(
        table
            .apply_player_action(7, PlayerAction::Stand)
            .await
            .unwrap_err(),
        ActionError::SeatNotFound
    );

    // 21 ends the seat's turn.
    let state = table
        .apply_player_action(0, PlayerAction::Hit)
        .await
        .unwrap();
    assert_eq!(state.seats[0].hand, cards(&[5, 6, 10]));
    assert!(state.seats[0].standing);
    assert_eq!(state.current_seat, Some(1));

    let state = table
        .apply_player_action(1, PlayerAction::Stand)
        .await
        .unwrap();
    assert_eq!(state.phase, Phase::Dealer);

    let result = table.settle_hands().unwrap();
    assert_eq!(result.seats[0].outcome, Outcome::Win);
    assert_eq!(result.seats[1].outcome, Outcome::Win);
}

#[tokio::test]
async fn hit_without_bust_keeps_the_turn() {
    let mut table = table_with(&[100, 100]);
    table.place_bet(0, 10).unwrap();
    table.place_bet(1, 10).unwrap();

    table.set_shoe_cards(&[2, 10, 10, 3, 10, 7, 4, 10]);
    table.start_dealing().unwrap();
    table.start_decision_phase().await.unwrap();

    let state = table
        .apply_player_action(0, PlayerAction::Hit)
        .await
        .unwrap();
    assert_eq!(state.seats[0].value(), 9);
    assert_eq!(state.current_seat, Some(0));

    let state = table
        .apply_player_action(0, PlayerAction::Hit)
        .await
        .unwrap();
    assert_eq!(state.seats[0].value(), 19);
    assert_eq!(state.current_seat, Some(0));

    // Standing moves the turn on.
    let state = table
        .apply_player_action(0, PlayerAction::Stand)
        .await
        .unwrap();
    assert_eq!(state.current_seat, Some(1));
}

#[tokio::test]
async fn bust_loses_even_when_dealer_busts() {
    let mut table = table_with(&[100]);
    table.place_bet(0, 10).unwrap();

    // player 10, 6; dealer 10, 6; player draws 10, dealer draws 10
    table.set_shoe_cards(&[10, 10, 6, 6, 10, 10]);
    table.start_dealing().unwrap();
    table.start_decision_phase().await.unwrap();

    let state = table
        .apply_player_action(0, PlayerAction::Hit)
        .await
        .unwrap();
    assert!(state.seats[0].busted);
    assert!(state.seats[0].standing);
    assert!(state.dealer.busted);

    let result = table.settle_hands().unwrap();
    assert_eq!(result.seats[0].outcome, Outcome::Lose);
    assert!(result.dealer_bust);
    assert_eq!(result.seats[0].bankroll, 90);
}

#[tokio::test]
async fn empty_shoe_makes_the_seat_stand() {
    let mut table = table_with(&[100]);
    table.place_bet(0, 10).unwrap();

    table.set_shoe_cards(&[10, 10, 2, 7]);
    table.start_dealing().unwrap();
    table.start_decision_phase().await.unwrap();

    let state = table
        .apply_player_action(0, PlayerAction::Hit)
        .await
        .unwrap();
    assert_eq!(state.seats[0].hand.len(), 2);
    assert!(state.seats[0].standing);
    assert_eq!(state.phase, Phase::Dealer);

    let result = table.settle_hands().unwrap();
    assert_eq!(result.seats[0].outcome, Outcome::Lose);
}

#[test]
fn shoe_exhaustion_stops_the_deal() {
    let mut table = table_with(&[100]);
    table.place_bet(0, 10).unwrap();

    table.set_shoe_cards(&[10, 9]);
    let state = table.start_dealing().unwrap();
    assert_eq!(state.phase, Phase::Dealing);
    assert_eq!(state.seats[0].hand.len(), 1);
    assert_eq!(state.dealer.cards.len(), 1);
    assert_eq!(state.last_error.as_deref(), Some("shoe exhausted"));
}

#[tokio::test]
async fn cut_short_deal_pushes_every_bet() {
    let mut table = table_with(&[100, 100]);
    table.place_bet(0, 10).unwrap();
    table.place_bet(1, 10).unwrap();

    // One card: seat 0 gets it, seat 1 and the dealer get nothing.
    table.set_shoe_cards(&[9]);
    table.start_dealing().unwrap();
    table.start_decision_phase().await.unwrap();
    let state = table
        .apply_player_action(0, PlayerAction::Stand)
        .await
        .unwrap();
    assert_eq!(state.phase, Phase::Dealer);
    assert!(state.dealer.cards.is_empty());

    let result = table.settle_hands().unwrap();
    let settled: Vec<_> = result.seats.iter().map(|s| (s.seat, s.outcome)).collect();
    assert_eq!(settled, [(0, Outcome::Push), (1, Outcome::Push)]);
    assert!(result.seats.iter().all(|s| s.bankroll == 100 && s.net == 0));
    assert!(result.state.seats.iter().all(|s| s.bet == 0));

    let state = table.start_new_hand();
    assert!(state.seats.iter().all(|s| s.available() == 100));
}

#[tokio::test]
async fn short_dealer_hand_is_not_a_win() {
    let mut table = table_with(&[100]);
    table.place_bet(0, 10).unwrap();

    // Seat gets 10 and 9, the dealer only a 10.
    table.set_shoe_cards(&[10, 10, 9]);
    table.start_dealing().unwrap();
    let state = table.start_decision_phase().await.unwrap();
    assert_eq!(state.phase, Phase::Decisions);
    table
        .apply_player_action(0, PlayerAction::Stand)
        .await
        .unwrap();

    let result = table.settle_hands().unwrap();
    assert_eq!(result.seats[0].outcome, Outcome::Push);
    assert_eq!(result.seats[0].bankroll, 100);
    assert!(!result.dealer_blackjack);
    assert!(
        result
            .state
            .chat
            .iter()
            .any(|m| m.speaker == "table" && m.text.contains("All bets push"))
    );
}

#[tokio::test]
async fn huge_bankrolls_saturate_instead_of_overflowing() {
    let mut table = Table::new(TableOptions::default(), 42);
    table.join("whale", u64::MAX).unwrap();
    table.start_new_hand();
    table.place_bet(0, 10).unwrap();
    assert_eq!(table.state().seats[0].available(), u64::MAX);

    // Seat 19 against dealer 17.
    table.set_shoe_cards(&[10, 10, 9, 7]);
    table.start_dealing().unwrap();
    table.start_decision_phase().await.unwrap();
    table
        .apply_player_action(0, PlayerAction::Stand)
        .await
        .unwrap();

    let result = table.settle_hands().unwrap();
    assert_eq!(result.seats[0].outcome, Outcome::Win);
    assert_eq!(result.seats[0].bankroll, u64::MAX);
}

#[tokio::test]
async fn dealer_hand_phase_rules() {
    let mut table = table_with(&[100]);
    assert!(matches!(
        table.play_dealer_hand(),
        Err(PhaseError::Invalid {
            phase: Phase::Betting,
            ..
        })
    ));

    table.place_bet(0, 10).unwrap();
    table.set_shoe_cards(&[10, 1, 2, 6, 10]);
    table.start_dealing().unwrap();
    table.start_decision_phase().await.unwrap();
    assert_eq!(
        table.play_dealer_hand().unwrap_err(),
        PhaseError::SeatsPending(0)
    );

    // Dealer has soft 17 and must hit.
    let state = table
        .apply_player_action(0, PlayerAction::Stand)
        .await
        .unwrap();
    assert_eq!(state.dealer.cards, cards(&[1, 6, 10]));
    assert_eq!(state.dealer.value(), 17);

    // Already resolved: nothing more to draw.
    let again = table.play_dealer_hand().unwrap();
    assert_eq!(again.dealer.cards.len(), 3);
}

#[tokio::test]
async fn settling_twice_is_rejected() {
    let mut table = table_with(&[100]);
    table.place_bet(0, 10).unwrap();
    table.set_shoe_cards(&[10, 10, 8, 7]);
    table.start_dealing().unwrap();

    assert!(table.settle_hands().is_err());

    table.start_decision_phase().await.unwrap();
    table
        .apply_player_action(0, PlayerAction::Stand)
        .await
        .unwrap();
    let first = table.settle_hands().unwrap();
    assert_eq!(first.seats[0].bankroll, 110);

    assert!(matches!(
        table.settle_hands(),
        Err(PhaseError::Invalid {
            phase: Phase::Finished,
            ..
        })
    ));
    assert_eq!(table.seat(0).unwrap().bankroll, 110);
}

#[tokio::test]
async fn outcomes_follow_the_rules_on_a_seeded_shoe() {
    let mut table = Table::new(TableOptions::default(), 42);
    table.join("alice", 1_000).unwrap();

    for hand in 1..=30 {
        let state = table.start_new_hand();
        assert_eq!(state.hand_number, hand);

        let before = table.seat(0).unwrap().bankroll;
        table.place_bet(0, 10).unwrap();
        table.start_dealing().unwrap();
        table.start_decision_phase().await.unwrap();

        while table.phase() == Phase::Decisions {
            let action = if table.seat(0).unwrap().value() < 15 {
                PlayerAction::Hit
            } else {
                PlayerAction::Stand
            };
            table.apply_player_action(0, action).await.unwrap();
        }
        assert_eq!(table.phase(), Phase::Dealer);

        let result = table.settle_hands().unwrap();
        let seat = &result.seats[0];
        let expected = rules::outcome(&result.state.seats[0].hand, &result.state.dealer.cards);
        assert_eq!(seat.outcome, expected);
        assert_eq!(seat.bankroll, before - 10 + seat.payout);
        assert_eq!(seat.player_value, rules::hand_value(&result.state.seats[0].hand));
    }
}

#[tokio::test]
async fn public_snapshot_hides_hole_cards() {
    let mut table = table_with(&[100, 100]);
    table.place_bet(0, 10).unwrap();
    table.place_bet(1, 10).unwrap();

    // seat 0: 9, 4; seat 1: 8, 3; dealer 10, 6
    table.set_shoe_cards(&[9, 8, 10, 4, 3, 6, 2]);
    table.start_dealing().unwrap();
    table.start_decision_phase().await.unwrap();

    let snapshot = table.public_snapshot();
    assert_eq!(snapshot.players[0].visible_cards, cards(&[4]));
    assert_eq!(snapshot.players[1].visible_cards, cards(&[3]));
    assert_eq!(snapshot.dealer_upcard, 10);
    assert_eq!(snapshot.dealer_visible_cards, cards(&[10]));
    assert_eq!(snapshot.players[0].bet, Some(10));

    let json = serde_json::to_value(&snapshot).unwrap();
    assert!(json.get("dealerUpcard").is_some());
    assert!(json["players"][0].get("bankroll").is_none());

    // A hit is public; the hole card still is not.
    table
        .apply_player_action(0, PlayerAction::Hit)
        .await
        .unwrap();
    let snapshot = table.public_snapshot();
    assert_eq!(snapshot.players[0].visible_cards, cards(&[4, 2]));

    let private = table.private_info(0).unwrap();
    assert_eq!(private.my_hole_cards, cards(&[9, 4, 2]));
    assert_eq!(private.bankroll, 90);
    assert!(table.private_info(5).is_none());
}

#[tokio::test]
async fn everything_is_public_once_the_dealer_resolves() {
    let mut table = table_with(&[100]);
    table.place_bet(0, 10).unwrap();
    table.set_shoe_cards(&[9, 10, 9, 8]);
    table.start_dealing().unwrap();
    table.start_decision_phase().await.unwrap();
    table
        .apply_player_action(0, PlayerAction::Stand)
        .await
        .unwrap();

    let snapshot = table.public_snapshot();
    assert_eq!(snapshot.players[0].visible_cards, cards(&[9, 9]));
    assert_eq!(snapshot.dealer_visible_cards, cards(&[10, 8]));
}

#[tokio::test]
async fn hole_cards_can_be_shown() {
    let options = TableOptions::default().with_hole_card_hidden(false);
    let mut table = Table::new(options, 3);
    table.join("alice", 100).unwrap();
    table.start_new_hand();
    table.place_bet(0, 10).unwrap();
    table.set_shoe_cards(&[9, 10, 4, 8, 2]);
    table.start_dealing().unwrap();

    let snapshot = table.public_snapshot();
    assert_eq!(snapshot.players[0].visible_cards, cards(&[9, 4]));
    assert_eq!(snapshot.dealer_visible_cards, cards(&[10]));
}

#[test]
fn new_hand_mid_hand_refunds_escrow() {
    let mut table = table_with(&[100]);
    table.place_bet(0, 25).unwrap();
    table.start_dealing().unwrap();
    assert_eq!(table.seat(0).unwrap().bankroll, 75);

    let state = table.start_new_hand();
    assert_eq!(state.phase, Phase::Betting);
    assert_eq!(state.hand_number, 2);
    assert_eq!(state.seats[0].bankroll, 100);
    assert_eq!(state.seats[0].bet, 0);
    assert!(state.seats[0].hand.is_empty());
    assert!(state.dealer.cards.is_empty());
    assert!(state.chat.is_empty());
}

#[test]
fn low_shoe_is_rebuilt_at_hand_start() {
    let mut table = table_with(&[100]);
    table.set_shoe_cards(&[10, 10, 10]);

    let state = table.start_new_hand();
    assert_eq!(state.shoe.total, 4 * 52);
    assert_eq!(state.shoe.dealt, 0);
    assert_eq!(state.shoe.running_count, 0);
}

#[tokio::test]
async fn reset_replays_the_same_game() {
    let mut table = Table::new(TableOptions::default(), 99);
    table.join("alice", 100).unwrap();

    let mut first = Vec::new();
    for _ in 0..3 {
        table.start_new_hand();
        table.place_bet(0, 10).unwrap();
        let state = table.start_dealing().unwrap();
        first.push((state.seats[0].hand.clone(), state.dealer.cards.clone()));
    }

    let state = table.reset_entire_game();
    assert_eq!(state.phase, Phase::Waiting);
    assert_eq!(state.hand_number, 0);
    assert_eq!(state.seats[0].bankroll, 100);
    assert_eq!(state.shoe.dealt, 0);

    for expected in &first {
        table.start_new_hand();
        table.place_bet(0, 10).unwrap();
        let state = table.start_dealing().unwrap();
        assert_eq!(&(state.seats[0].hand.clone(), state.dealer.cards.clone()), expected);
    }
}

#[tokio::test]
async fn telemetry_tracks_phases_of_the_hand() {
    let mut table = table_with(&[100]);
    table.place_bet(0, 10).unwrap();
    table.set_shoe_cards(&[10, 10, 9, 8]);
    table.start_dealing().unwrap();
    table.start_decision_phase().await.unwrap();

    let telemetry = table.state().telemetry;
    assert_eq!(telemetry.phase, Phase::Decisions);
    let phases: Vec<Phase> = telemetry.phases.iter().map(|t| t.phase).collect();
    assert_eq!(phases, [Phase::Betting, Phase::Dealing, Phase::Decisions]);
}

#[test]
fn double_and_split_are_not_offered() {
    assert_eq!(
        "double".parse::<PlayerAction>().unwrap_err(),
        ActionError::Unsupported("double".into())
    );
    assert_eq!(
        "split".parse::<PlayerAction>().unwrap_err(),
        ActionError::Unsupported("split".into())
    );
}
