//! # Complaint Flows
//!
//! The Complaint Log authorizes against live Ownership Ledger state: only the
//! owner at the moment of logging may file, and only the complainant may
//! escalate.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{
        evidence, random_identity, Harness, ADMIN, ALICE, BOB, CAROL, DEVICE,
    };
    use dl_01_ownership_ledger::OwnershipLedgerApi;
    use dl_02_complaint_log::{ComplaintErrorCode, ComplaintLogApi};
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use shared_bus::{EventFilter, EventTopic, LedgerEvent};
    use shared_types::DeviceId;

    fn sold_to_bob() -> Harness {
        let h = Harness::new();
        h.ledger.establish_ownership(ADMIN, DEVICE, ALICE).unwrap();
        h.ledger.transfer(ALICE, DEVICE, BOB, "sale").unwrap();
        h
    }

    #[test]
    fn test_current_owner_logs_past_owner_rejected() {
        let h = sold_to_bob();
        let hash = evidence(46);

        assert_eq!(
            h.complaints
                .log_complaint(BOB, DEVICE, 1, "cracked screen", true, Some(&hash)),
            Ok(0)
        );
        assert_eq!(
            h.complaints
                .log_complaint(ALICE, DEVICE, 1, "spam", false, None)
                .unwrap_err()
                .code(),
            ComplaintErrorCode::NotAuthorized
        );

        let stored = h.complaints.get_complaint(&DEVICE, 0).unwrap();
        assert_eq!(stored.complainant, BOB);
        assert_eq!(stored.evidence_hash.as_deref(), Some(hash.as_str()));
        assert!(stored.is_in_person);
    }

    #[test]
    fn test_authorization_follows_ownership_changes() {
        let h = sold_to_bob();
        h.complaints.log_complaint(BOB, DEVICE, 1, "a", false, None).unwrap();

        h.ledger.transfer(BOB, DEVICE, CAROL, "resale").unwrap();
        assert_eq!(
            h.complaints
                .log_complaint(BOB, DEVICE, 1, "b", false, None)
                .unwrap_err()
                .code(),
            ComplaintErrorCode::NotAuthorized
        );
        assert_eq!(h.complaints.log_complaint(CAROL, DEVICE, 1, "c", false, None), Ok(1));

        // Bob keeps the right to escalate his own complaint.
        h.complaints.escalate_complaint(BOB, DEVICE, 0).unwrap();
        assert_eq!(
            h.complaints
                .escalate_complaint(BOB, DEVICE, 1)
                .unwrap_err()
                .code(),
            ComplaintErrorCode::NotAuthorized
        );
    }

    #[test]
    fn test_random_strangers_never_log() {
        let h = sold_to_bob();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let caller = random_identity(&mut rng);
            if caller == BOB {
                continue;
            }
            let complaint_type = rng.gen_range(1..=20);
            let err = h
                .complaints
                .log_complaint(caller, DEVICE, complaint_type, "x", rng.gen(), None)
                .unwrap_err();
            assert_eq!(err.code(), ComplaintErrorCode::NotAuthorized);
        }
        assert_eq!(h.complaints.complaint_count(&DEVICE), 0);
    }

    #[test]
    fn test_text_boundaries() {
        let h = sold_to_bob();
        let ok_desc = "d".repeat(512);
        let long_desc = "d".repeat(513);
        let ok_ev = evidence(46);
        let long_ev = evidence(47);

        assert!(h
            .complaints
            .log_complaint(BOB, DEVICE, 1, &ok_desc, false, Some(&ok_ev))
            .is_ok());
        assert_eq!(
            h.complaints
                .log_complaint(BOB, DEVICE, 1, &long_desc, false, None)
                .unwrap_err()
                .code(),
            ComplaintErrorCode::InvalidDescription
        );
        assert_eq!(
            h.complaints
                .log_complaint(BOB, DEVICE, 1, "d", false, Some(&long_ev))
                .unwrap_err()
                .code(),
            ComplaintErrorCode::InvalidEvidence
        );
    }

    #[test]
    fn test_multibyte_text_counts_code_units() {
        let h = sold_to_bob();
        // 'é' is two UTF-8 code units.
        let desc = "é".repeat(256);
        assert!(h
            .complaints
            .log_complaint(BOB, DEVICE, 1, &desc, false, None)
            .is_ok());
        let desc = format!("{desc}x");
        assert_eq!(
            h.complaints
                .log_complaint(BOB, DEVICE, 1, &desc, false, None)
                .unwrap_err()
                .code(),
            ComplaintErrorCode::InvalidDescription
        );
    }

    #[test]
    fn test_unregistered_device() {
        let h = Harness::new();
        let ghost = DeviceId::new([0x66; 32]);
        assert_eq!(
            h.complaints
                .log_complaint(BOB, ghost, 1, "x", false, None)
                .unwrap_err()
                .code(),
            ComplaintErrorCode::NotRegistered
        );
    }

    #[test]
    fn test_escalation_is_single_shot() {
        let h = sold_to_bob();
        let mut events = h.bus.subscribe(EventFilter {
            topics: vec![EventTopic::Complaint],
            devices: vec![DEVICE],
        });

        let id = h.complaints.log_complaint(BOB, DEVICE, 4, "x", false, None).unwrap();
        h.complaints.escalate_complaint(BOB, DEVICE, id).unwrap();
        assert_eq!(
            h.complaints
                .escalate_complaint(BOB, DEVICE, id)
                .unwrap_err()
                .code(),
            ComplaintErrorCode::InvalidType
        );
        assert_eq!(h.complaints.is_escalated(&DEVICE, id), Ok(true));

        assert_eq!(
            events.drain(),
            vec![
                LedgerEvent::ComplaintLogged {
                    device_id: DEVICE,
                    complaint_id: id
                },
                LedgerEvent::ComplaintEscalated {
                    device_id: DEVICE,
                    complaint_id: id
                },
            ]
        );
    }

    #[test]
    fn test_ids_are_per_device() {
        let h = sold_to_bob();
        let second = DeviceId::new([0xD1; 32]);
        h.owned(second, BOB);

        for expected in 0..3 {
            assert_eq!(
                h.complaints.log_complaint(BOB, DEVICE, 1, "x", false, None),
                Ok(expected)
            );
        }
        assert_eq!(h.complaints.log_complaint(BOB, second, 1, "x", false, None), Ok(0));
        assert_eq!(h.complaints.complaint_count(&DEVICE), 3);
        assert_eq!(h.complaints.complaint_count(&second), 1);
        assert_eq!(h.complaints.complaints_for_device(&second).len(), 1);
    }
}
