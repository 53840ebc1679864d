//! Property-based tests for the client reconciliation cache
//!
//! Whatever order events arrive in, the cache must never hold two cards
//! with the same id and must never panic. Re-delivery of any event must
//! leave the projection unchanged.

use proptest::prelude::*;
use uuid::Uuid;

use boardsync::client::BoardCache;
use boardsync::shared::{BoardEvent, Card, CardDeleted, CardMoved};

/// Compact event description the strategies generate
///
/// Ids are drawn from a small pool so sequences actually collide on the
/// same card.
#[derive(Debug, Clone)]
enum Op {
    Create(usize),
    Update(usize),
    Delete(usize),
    Move(usize, usize),
}

const ID_POOL: usize = 8;

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ID_POOL).prop_map(Op::Create),
        (0..ID_POOL).prop_map(Op::Update),
        (0..ID_POOL).prop_map(Op::Delete),
        (0..ID_POOL, 0..4usize).prop_map(|(card, column)| Op::Move(card, column)),
    ]
}

fn materialize(ops: &[Op]) -> Vec<BoardEvent> {
    let board_id = Uuid::new_v4();
    let card_ids: Vec<Uuid> = (0..ID_POOL).map(|_| Uuid::new_v4()).collect();
    let column_ids: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();

    ops.iter()
        .map(|op| match op {
            Op::Create(i) => {
                let mut card = Card::new(board_id, column_ids[0], format!("card {i}"));
                card.id = card_ids[*i];
                BoardEvent::CardCreate(card)
            }
            Op::Update(i) => {
                let mut card = Card::new(board_id, column_ids[0], format!("card {i} updated"));
                card.id = card_ids[*i];
                BoardEvent::CardUpdate(card)
            }
            Op::Delete(i) => BoardEvent::CardDelete(CardDeleted { id: card_ids[*i] }),
            Op::Move(i, c) => BoardEvent::CardMoved(CardMoved {
                card_id: card_ids[*i],
                column_id: column_ids[*c],
            }),
        })
        .collect()
}

proptest! {
    #[test]
    fn test_no_duplicate_ids_after_any_sequence(ops in prop::collection::vec(op_strategy(), 0..64)) {
        let events = materialize(&ops);
        let mut cache = BoardCache::new();
        for event in &events {
            cache.apply(event);
        }

        let mut ids: Vec<Uuid> = cache.cards.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), cache.cards.len());
    }

    #[test]
    fn test_redelivery_of_last_event_is_idempotent(ops in prop::collection::vec(op_strategy(), 1..64)) {
        let events = materialize(&ops);
        let mut cache = BoardCache::new();
        for event in &events {
            cache.apply(event);
        }

        let before = cache.cards.clone();
        cache.apply(events.last().unwrap());
        prop_assert_eq!(before, cache.cards);
    }

    #[test]
    fn test_delete_wins_over_earlier_events(ops in prop::collection::vec(op_strategy(), 0..32)) {
        // Apply a random prefix, then delete card 0; it must be gone
        let mut all = ops;
        all.push(Op::Delete(0));
        let events = materialize(&all);
        let deleted = match events.last().unwrap() {
            BoardEvent::CardDelete(d) => d.id,
            _ => unreachable!(),
        };

        let mut cache = BoardCache::new();
        for event in &events {
            cache.apply(event);
        }
        prop_assert!(cache.card(deleted).is_none());
    }
}
