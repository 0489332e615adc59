//! # Concurrency
//!
//! Each mutation is atomic with respect to every other mutation and read.
//! These flows race real threads against the shared services.

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::thread;

    use crate::integration::fixtures::{Harness, ADMIN, ALICE, BOB, DEVICE};
    use dl_01_ownership_ledger::{LedgerErrorCode, OwnershipLedgerApi, HISTORY_CAPACITY};
    use dl_02_complaint_log::ComplaintLogApi;
    use shared_bus::{EventFilter, EventTopic, LedgerEvent};
    use shared_types::Identity;

    const THREADS: usize = 8;

    #[test]
    fn test_racing_transfers_by_owner_only_one_wins() {
        let h = Harness::new();
        h.ledger.establish_ownership(ADMIN, DEVICE, ALICE).unwrap();
        let barrier = Barrier::new(THREADS);

        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|i| {
                    let (h, barrier) = (&h, &barrier);
                    s.spawn(move || {
                        let buyer = Identity::new([i as u8 + 1; 32]);
                        barrier.wait();
                        h.ledger.transfer(ALICE, DEVICE, buyer, "race")
                    })
                })
                .collect();
            handles.into_iter().map(|t| t.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert_eq!(err.code(), LedgerErrorCode::NotOwner);
        }
        assert_eq!(h.ledger.transfer_count(&DEVICE), 1);
        let winner = h.ledger.get_history(&DEVICE)[0].owner;
        assert_eq!(h.ledger.get_current_owner(&DEVICE), Ok(winner));
    }

    #[test]
    fn test_concurrent_complaints_get_unique_dense_ids() {
        let h = Harness::new();
        h.ledger.establish_ownership(ADMIN, DEVICE, BOB).unwrap();
        let per_thread = 25;

        let mut ids: Vec<u64> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let h = &h;
                    s.spawn(move || {
                        (0..per_thread)
                            .map(|_| {
                                h.complaints
                                    .log_complaint(BOB, DEVICE, 1, "x", false, None)
                                    .unwrap()
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|t| t.join().unwrap())
                .collect()
        });

        ids.sort_unstable();
        let total = (THREADS * per_thread) as u64;
        assert_eq!(ids, (0..total).collect::<Vec<_>>());
        assert_eq!(h.complaints.complaint_count(&DEVICE), total);
    }

    #[test]
    fn test_concurrent_disputes_on_one_transfer_only_one_wins() {
        let h = Harness::new();
        h.ledger.establish_ownership(ADMIN, DEVICE, ALICE).unwrap();
        h.ledger.transfer(ALICE, DEVICE, BOB, "sale").unwrap();
        let barrier = Barrier::new(THREADS);

        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|i| {
                    let (h, barrier) = (&h, &barrier);
                    s.spawn(move || {
                        let disputer = Identity::new([0x40 + i as u8; 32]);
                        barrier.wait();
                        h.ledger.dispute(disputer, DEVICE, 0, "fraud")
                    })
                })
                .collect();
            handles.into_iter().map(|t| t.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert_eq!(err.code(), LedgerErrorCode::AlreadyDisputed);
        }
        assert!(h.ledger.is_dispute_open(&DEVICE, 0));
    }

    #[test]
    fn test_capacity_holds_under_contention() {
        let h = Harness::new();
        h.ledger.establish_ownership(ADMIN, DEVICE, ALICE).unwrap();
        let attempts_per_thread = 150 / 6;

        let results: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..6)
                .map(|_| {
                    let h = &h;
                    s.spawn(move || {
                        (0..attempts_per_thread)
                            .map(|_| h.ledger.transfer(ALICE, DEVICE, ALICE, "self"))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|t| t.join().unwrap())
                .collect()
        });

        assert_eq!(results.len(), 150);
        assert_eq!(
            results.iter().filter(|r| r.is_ok()).count(),
            HISTORY_CAPACITY
        );
        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            assert_eq!(err.code(), LedgerErrorCode::HistoryFull);
        }
        assert_eq!(h.ledger.transfer_count(&DEVICE), HISTORY_CAPACITY);
    }

    #[test]
    fn test_event_order_matches_history_order() {
        let h = Harness::new();
        h.ledger.establish_ownership(ADMIN, DEVICE, ALICE).unwrap();
        let mut events = h.bus.subscribe(EventFilter {
            topics: vec![EventTopic::Ownership],
            devices: vec![DEVICE],
        });

        thread::scope(|s| {
            for t in 0..4 {
                let h = &h;
                s.spawn(move || {
                    for i in 0..15 {
                        h.ledger
                            .transfer(ALICE, DEVICE, ALICE, &format!("t{t}-{i}"))
                            .unwrap();
                    }
                });
            }
        });

        let published: Vec<String> = events
            .drain()
            .into_iter()
            .filter_map(|event| match event {
                LedgerEvent::OwnershipTransferred { notes, .. } => Some(notes),
                _ => None,
            })
            .collect();
        let recorded: Vec<String> = h
            .ledger
            .get_history(&DEVICE)
            .into_iter()
            .map(|entry| entry.notes)
            .collect();

        assert_eq!(recorded.len(), 60);
        assert_eq!(published, recorded);
    }

    #[test]
    fn test_complaints_race_transfers_without_deadlock() {
        let h = Harness::new();
        h.ledger.establish_ownership(ADMIN, DEVICE, ALICE).unwrap();

        let logged = thread::scope(|s| {
            let h = &h;
            let owner = s.spawn(move || {
                for _ in 0..20 {
                    let _ = h.ledger.transfer(ALICE, DEVICE, BOB, "out");
                    let _ = h.ledger.transfer(BOB, DEVICE, ALICE, "back");
                }
            });
            let complainer = s.spawn(move || {
                (0..50)
                    .filter(|_| {
                        h.complaints
                            .log_complaint(ALICE, DEVICE, 2, "x", false, None)
                            .is_ok()
                    })
                    .count()
            });
            owner.join().unwrap();
            complainer.join().unwrap()
        });

        assert_eq!(h.complaints.complaint_count(&DEVICE), logged as u64);
        assert_eq!(h.ledger.transfer_count(&DEVICE), 40);
        assert_eq!(h.ledger.get_current_owner(&DEVICE), Ok(ALICE));
    }
}
