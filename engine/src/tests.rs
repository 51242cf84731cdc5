use crate::mocks::{create_bettor_keypair, create_state};
use crate::state::State;
use crate::{query, Event, Memory, Wagering};
use commonware_cryptography::ed25519::PublicKey;
use commonware_runtime::deterministic::Runner;
use commonware_runtime::Runner as _;
use railbird_types::wager::{BetStatus, WagerError, STARTING_BALANCE};
use railbird_types::Key;

fn bettor(seed: u64) -> PublicKey {
    create_bettor_keypair(seed).1
}

const GAME: u64 = 1;

#[test]
fn test_full_match_settlement() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let mut wagering = Wagering::new(context, Memory::default());
        let (alice, bob, carol) = (bettor(1), bettor(2), bettor(3));
        let (x, y) = (bettor(10), bettor(11));

        // First bet into an empty pool gets the 2.00x opening odds.
        let receipt = wagering
            .place_bet(&alice, GAME, &x, 100)
            .await
            .expect("alice's bet should be accepted");
        assert_eq!(receipt.bet.odds.raw(), 200);
        assert_eq!(receipt.balance, STARTING_BALANCE - 100);

        // Nothing staked on `y` yet, so bob gets the 3.00x underdog odds.
        let receipt = wagering
            .place_bet(&bob, GAME, &y, 300)
            .await
            .expect("bob's bet should be accepted");
        assert_eq!(receipt.bet.odds.raw(), 300);

        // Pool is now 400 total with 100 on `x`: carol gets 4.00x.
        let receipt = wagering
            .place_bet(&carol, GAME, &x, 200)
            .await
            .expect("carol's bet should be accepted");
        assert_eq!(receipt.bet.odds.raw(), 400);

        let settlement = wagering
            .settle_bets(GAME, &x)
            .await
            .expect("settlement should succeed");
        assert_eq!(settlement.events.len(), 3);
        // Alice 100 at 2.00x plus carol 200 at 4.00x.
        assert_eq!(settlement.total_paid, 200 + 800);

        assert_eq!(wagering.balance(&alice).await.unwrap(), 900 + 200);
        assert_eq!(wagering.balance(&bob).await.unwrap(), 700);
        assert_eq!(wagering.balance(&carol).await.unwrap(), 800 + 800);

        // Every bet left Pending with its payout and timestamp recorded.
        for event in &settlement.events {
            let Event::BetSettled { bet_id, won, .. } = event else {
                panic!("settlement emitted a refund");
            };
            let bet = wagering.bet(*bet_id).await.unwrap();
            assert_eq!(
                bet.status,
                if *won { BetStatus::Won } else { BetStatus::Lost }
            );
            assert!(bet.settled_at_ms.is_some());
            assert!(bet.payout.is_some());
        }
    });
}

#[test]
fn test_settlement_is_idempotent() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let mut wagering = Wagering::new(context, Memory::default());
        let (alice, x, y) = (bettor(1), bettor(10), bettor(11));

        wagering.place_bet(&alice, GAME, &x, 100).await.unwrap();
        let first = wagering.settle_bets(GAME, &y).await.unwrap();
        assert_eq!(first.events.len(), 1);
        let balance = wagering.balance(&alice).await.unwrap();

        // Second sweep finds nothing open and changes nothing.
        let second = wagering.settle_bets(GAME, &y).await.unwrap();
        assert!(second.events.is_empty());
        assert_eq!(second.total_paid, 0);
        assert_eq!(wagering.balance(&alice).await.unwrap(), balance);

        let history = wagering.history(&alice, 10).await.unwrap();
        assert_eq!(history.bets[0].status, BetStatus::Lost);
    });
}

#[test]
fn test_cancellation_refunds_stakes() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let mut wagering = Wagering::new(context, Memory::default());
        let (alice, bob) = (bettor(1), bettor(2));
        let (x, y) = (bettor(10), bettor(11));

        wagering.place_bet(&alice, GAME, &x, 250).await.unwrap();
        wagering.place_bet(&bob, GAME, &y, 400).await.unwrap();

        let settlement = wagering.cancel_bets(GAME).await.unwrap();
        assert_eq!(settlement.events.len(), 2);
        assert_eq!(settlement.total_paid, 650);

        // Balances return to where they started.
        assert_eq!(wagering.balance(&alice).await.unwrap(), STARTING_BALANCE);
        assert_eq!(wagering.balance(&bob).await.unwrap(), STARTING_BALANCE);

        // Refunds resolve the bets without touching win/loss aggregates.
        let history = wagering.history(&alice, 10).await.unwrap();
        assert_eq!(history.bets[0].status, BetStatus::Cancelled);
        assert_eq!(history.bets[0].payout, Some(250));
        assert_eq!(history.win_rate_bps, 0);

        // Cancellation drained the open set too.
        let again = wagering.cancel_bets(GAME).await.unwrap();
        assert!(again.events.is_empty());
    });
}

#[test]
fn test_amount_bounds() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let mut wagering = Wagering::new(context, Memory::default());
        let (alice, x) = (bettor(1), bettor(10));

        for bad in [0, 9, 1_001] {
            let err = wagering.place_bet(&alice, GAME, &x, bad).await.unwrap_err();
            assert!(matches!(err, WagerError::InvalidAmount { amount } if amount == bad));
        }

        // Both bounds are accepted, and the maximum empties the starting
        // balance exactly.
        wagering.place_bet(&alice, GAME, &x, 10).await.unwrap();
        let receipt = wagering.place_bet(&bettor(2), GAME, &x, 1_000).await.unwrap();
        assert_eq!(receipt.balance, 0);
    });
}

#[test]
fn test_insufficient_balance() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let mut wagering = Wagering::new(context, Memory::default());
        let (alice, x, y) = (bettor(1), bettor(10), bettor(11));

        wagering.place_bet(&alice, GAME, &x, 900).await.unwrap();
        let err = wagering.place_bet(&alice, GAME, &y, 200).await.unwrap_err();
        assert!(matches!(
            err,
            WagerError::InsufficientBalance {
                balance: 100,
                required: 200
            }
        ));

        // The rejected bet left nothing behind.
        assert_eq!(wagering.balance(&alice).await.unwrap(), 100);
        let stats = wagering.match_stats(GAME).await.unwrap();
        assert_eq!(stats.total_bets, 1);

        // Bounds are checked before the balance.
        let err = wagering.place_bet(&alice, GAME, &y, 1_001).await.unwrap_err();
        assert!(matches!(err, WagerError::InvalidAmount { .. }));
    });
}

#[test]
fn test_duplicate_stake_rules() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let mut wagering = Wagering::new(context, Memory::default());
        let (alice, x, y) = (bettor(1), bettor(10), bettor(11));

        wagering.place_bet(&alice, GAME, &x, 50).await.unwrap();

        // Same bettor, same contestant, same match: rejected while pending.
        let err = wagering.place_bet(&alice, GAME, &x, 50).await.unwrap_err();
        assert!(matches!(err, WagerError::DuplicateBet { game: GAME }));

        // A different contestant or a different match is fine.
        wagering.place_bet(&alice, GAME, &y, 50).await.unwrap();
        wagering.place_bet(&alice, GAME + 1, &x, 50).await.unwrap();

        // Once the match settles the slot reopens.
        wagering.settle_bets(GAME, &x).await.unwrap();
        wagering.place_bet(&alice, GAME, &x, 50).await.unwrap();
    });
}

#[test]
fn test_odds_are_frozen_at_placement() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let mut wagering = Wagering::new(context, Memory::default());
        let (x, y) = (bettor(10), bettor(11));

        let first = wagering.place_bet(&bettor(1), GAME, &x, 300).await.unwrap();
        assert_eq!(first.bet.odds.raw(), 200);

        wagering.place_bet(&bettor(2), GAME, &y, 200).await.unwrap();

        // Pool is 500 total with 300 on `x`: 1.67x after rounding.
        let third = wagering.place_bet(&bettor(3), GAME, &x, 100).await.unwrap();
        assert_eq!(third.bet.odds.raw(), 167);

        // Later stakes shifted the pool, but the first bet still pays at
        // its original 2.00x.
        let bet = wagering.bet(first.bet.id).await.unwrap();
        assert_eq!(bet.odds.raw(), 200);

        let settlement = wagering.settle_bets(GAME, &x).await.unwrap();
        let paid: u64 = settlement
            .events
            .iter()
            .map(|event| match event {
                Event::BetSettled { payout, .. } => *payout,
                Event::BetRefunded { .. } => 0,
            })
            .sum();
        // 300 at 2.00x plus 100 at 1.67x.
        assert_eq!(paid, 600 + 167);
    });
}

#[test]
fn test_winner_paid_at_frozen_odds() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let mut wagering = Wagering::new(context, Memory::default());
        let (x, y) = (bettor(10), bettor(11));

        wagering.place_bet(&bettor(1), GAME, &x, 100).await.unwrap();
        wagering.place_bet(&bettor(2), GAME, &y, 150).await.unwrap();

        // 250 total over 100 on `x`: 2.50x.
        let carol = bettor(3);
        let receipt = wagering.place_bet(&carol, GAME, &x, 100).await.unwrap();
        assert_eq!(receipt.bet.odds.raw(), 250);

        wagering.settle_bets(GAME, &x).await.unwrap();
        // 1000 - 100 stake + 250 winnings.
        assert_eq!(wagering.balance(&carol).await.unwrap(), 1_150);
        // The loser's balance just stays short the stake.
        assert_eq!(wagering.balance(&bettor(2)).await.unwrap(), 850);

        let bet = wagering.bet(receipt.bet.id).await.unwrap();
        assert_eq!(bet.status, BetStatus::Won);
        assert_eq!(bet.payout, Some(250));
    });
}

#[test]
fn test_top_up() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let mut wagering = Wagering::new(context, Memory::default());
        let alice = bettor(1);

        let err = wagering.top_up(&alice, 0).await.unwrap_err();
        assert!(matches!(err, WagerError::NonPositiveTopUp));

        // Topping up an unseen bettor creates the profile with the
        // starting grant first.
        let balance = wagering.top_up(&alice, 500).await.unwrap();
        assert_eq!(balance, STARTING_BALANCE + 500);
        assert_eq!(wagering.balance(&alice).await.unwrap(), 1_500);
    });
}

#[test]
fn test_queries_do_not_persist() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let wagering = Wagering::new(context, Memory::default());
        let alice = bettor(1);

        // An unseen bettor reads as the default profile.
        assert_eq!(wagering.balance(&alice).await.unwrap(), STARTING_BALANCE);
        let history = wagering.history(&alice, 10).await.unwrap();
        assert!(history.bets.is_empty());

        // But reading never wrote anything.
        let stored = wagering
            .state()
            .get(&Key::Bettor(alice.clone()))
            .await
            .unwrap();
        assert!(stored.is_none());
    });
}

#[test]
fn test_bet_lookup() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let mut wagering = Wagering::new(context, Memory::default());
        let (alice, x) = (bettor(1), bettor(10));

        let receipt = wagering.place_bet(&alice, GAME, &x, 75).await.unwrap();
        let bet = wagering.bet(receipt.bet.id).await.unwrap();
        assert_eq!(bet.bettor, alice);
        assert_eq!(bet.amount, 75);
        assert_eq!(bet.status, BetStatus::Pending);
        assert_eq!(bet.payout, None);

        let err = wagering.bet(999).await.unwrap_err();
        assert!(matches!(err, WagerError::BetNotFound(999)));
    });
}

#[test]
fn test_history_and_stats() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let mut wagering = Wagering::new(context, Memory::default());
        let (alice, x, y) = (bettor(1), bettor(10), bettor(11));

        let first = wagering.place_bet(&alice, GAME, &x, 100).await.unwrap();
        let second = wagering.place_bet(&alice, GAME + 1, &y, 200).await.unwrap();
        wagering.settle_bets(GAME, &x).await.unwrap();
        wagering.settle_bets(GAME + 1, &x).await.unwrap();

        // Newest first, counting one win and one loss.
        let history = wagering.history(&alice, 10).await.unwrap();
        assert_eq!(
            history.bets.iter().map(|bet| bet.id).collect::<Vec<_>>(),
            vec![second.bet.id, first.bet.id]
        );
        assert_eq!(history.total_bets, 2);
        assert_eq!(history.total_wagered, 300);
        assert_eq!(history.total_won, 200);
        assert_eq!(history.win_rate_bps, 5_000);

        // Pool totals survive settlement for post-match queries.
        let stats = wagering.match_stats(GAME).await.unwrap();
        assert_eq!(stats.total_bets, 1);
        assert_eq!(stats.total_amount, 100);
        assert_eq!(stats.contestants.len(), 1);
        assert_eq!(stats.contestants[0].contestant, x);

        let bets = wagering.match_bets(GAME, None).await.unwrap();
        assert_eq!(bets.len(), 1);
        assert_eq!(bets[0].id, first.bet.id);

        // Status filter and history limit.
        let won = wagering.match_bets(GAME, Some(BetStatus::Won)).await.unwrap();
        assert_eq!(won.len(), 1);
        let lost = wagering
            .match_bets(GAME, Some(BetStatus::Lost))
            .await
            .unwrap();
        assert!(lost.is_empty());

        let limited = wagering.history(&alice, 1).await.unwrap();
        assert_eq!(limited.bets.len(), 1);
        assert_eq!(limited.bets[0].id, second.bet.id);
        // Aggregates still cover everything, only the bet list is trimmed.
        assert_eq!(limited.total_bets, 2);
    });
}

#[test]
fn test_match_stats_reports_live_odds() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let mut wagering = Wagering::new(context, Memory::default());
        let alice = bettor(1);
        let (p1, p2) = (bettor(10), bettor(11));

        // One bettor hedging: 300 on the favorite, 100 on the other side.
        wagering.place_bet(&alice, GAME, &p1, 300).await.unwrap();
        wagering.place_bet(&alice, GAME, &p2, 100).await.unwrap();

        let stats = wagering.match_stats(GAME).await.unwrap();
        assert_eq!(stats.total_amount, 400);
        assert_eq!(stats.total_bets, 2);

        let of = |contestant: &PublicKey| {
            stats
                .contestants
                .iter()
                .find(|entry| entry.contestant == *contestant)
                .expect("contestant missing from stats")
        };
        assert_eq!(of(&p1).total_amount, 300);
        assert_eq!(of(&p1).total_bets, 1);
        assert_eq!(of(&p2).total_amount, 100);

        // Live odds: 400/300 clamps up to the 1.50x floor, 400/100 pays
        // 4.00x, so the lightly backed side pays more.
        assert_eq!(of(&p1).odds.raw(), 150);
        assert_eq!(of(&p2).odds.raw(), 400);
        assert!(of(&p2).odds > of(&p1).odds);
    });
}

#[test]
fn test_wagering_over_adb() {
    let executor = Runner::default();
    executor.start(|context| async move {
        let state = create_state(&context).await;
        let mut wagering = Wagering::new(context, state);
        let (alice, bob) = (bettor(1), bettor(2));
        let (x, y) = (bettor(10), bettor(11));

        wagering.place_bet(&alice, GAME, &x, 100).await.unwrap();
        wagering.place_bet(&bob, GAME, &y, 300).await.unwrap();
        let settlement = wagering.settle_bets(GAME, &y).await.unwrap();
        assert_eq!(settlement.events.len(), 2);

        assert_eq!(wagering.balance(&alice).await.unwrap(), 900);
        assert_eq!(wagering.balance(&bob).await.unwrap(), 700 + 900);

        let history = wagering.history(&bob, 10).await.unwrap();
        assert_eq!(history.bets[0].status, BetStatus::Won);
        assert_eq!(history.bets[0].payout, Some(900));
    });
}

#[test]
fn test_state_survives_restart() {
    // First run: place and settle against the durable store, commit, then
    // shut down.
    let (_, checkpoint) = Runner::default().start_and_recover(|context| async move {
        let state = create_state(&context).await;
        let mut wagering = Wagering::new(context, state);
        let (alice, bob) = (bettor(1), bettor(2));
        let (x, y) = (bettor(10), bettor(11));

        wagering.place_bet(&alice, GAME, &x, 100).await.unwrap();
        wagering.place_bet(&bob, GAME, &y, 300).await.unwrap();
        wagering.settle_bets(GAME, &x).await.unwrap();

        let mut state = wagering.into_state();
        state.commit(None).await.expect("commit state");
    });

    // Second run: reopen the same partitions and read everything back.
    let executor = Runner::from(checkpoint);
    executor.start(|context| async move {
        let state = create_state(&context).await;
        let (alice, bob) = (bettor(1), bettor(2));

        // 900 + 200 winnings at the 2.00x opening odds.
        assert_eq!(query::balance(&state, &alice).await.unwrap(), 1_100);
        assert_eq!(query::balance(&state, &bob).await.unwrap(), 700);

        let bets = query::match_bets(&state, GAME, None).await.unwrap();
        assert_eq!(bets.len(), 2);
        assert_eq!(bets[0].status, BetStatus::Won);
        assert_eq!(bets[0].payout, Some(200));
        assert_eq!(bets[1].status, BetStatus::Lost);

        let history = query::history(&state, &alice, 10).await.unwrap();
        assert_eq!(history.total_won, 200);
        assert_eq!(history.win_rate_bps, 10_000);
    });
}
