//! # Runtime Flows
//!
//! The assembled node: both components on one bus, with the metrics router
//! and external stream consumers attached.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dl_01_ownership_ledger::OwnershipLedgerApi;
    use dl_02_complaint_log::ComplaintLogApi;
    use ledger_runtime::{LedgerNode, NodeConfig};
    use ledger_telemetry::{LedgerMetrics, RESOLUTION_REOPENED, RESOLUTION_RESOLVED};
    use shared_bus::{EventFilter, LedgerEvent};
    use shared_types::{DeviceId, Identity};
    use tokio_stream::StreamExt;

    const ADMIN: Identity = Identity::new([0xAD; 32]);
    const ALICE: Identity = Identity::new([0xA1; 32]);
    const BOB: Identity = Identity::new([0xB0; 32]);
    const PHONE: DeviceId = DeviceId::new([0x01; 32]);
    const LAPTOP: DeviceId = DeviceId::new([0x02; 32]);

    fn node() -> LedgerNode {
        let node = LedgerNode::new(NodeConfig::new(ADMIN));
        node.registry().register(PHONE);
        node.registry().register(LAPTOP);
        node
    }

    #[tokio::test]
    async fn test_metrics_router_counts_every_operation() {
        let node = node();
        let metrics = Arc::new(LedgerMetrics::new().unwrap());
        let router = node.spawn_metrics_router(Arc::clone(&metrics));

        {
            let ledger = node.ledger();
            let complaints = node.complaints();
            ledger.establish_ownership(ADMIN, PHONE, ALICE).unwrap();
            ledger.transfer(ALICE, PHONE, BOB, "sale").unwrap();
            ledger.dispute(ALICE, PHONE, 0, "unpaid").unwrap();
            ledger.resolve_dispute(ADMIN, PHONE, 0, true).unwrap();
            ledger.resolve_dispute(ADMIN, PHONE, 0, false).unwrap();
            let id = complaints
                .log_complaint(BOB, PHONE, 1, "battery", false, None)
                .unwrap();
            complaints.escalate_complaint(BOB, PHONE, id).unwrap();

            // Rejected calls publish nothing.
            assert!(ledger.transfer(ALICE, PHONE, ALICE, "").is_err());
            assert!(complaints
                .log_complaint(ALICE, PHONE, 1, "x", false, None)
                .is_err());
        }

        // Dropping the node closes the bus and ends the router.
        drop(node);
        let routed = router.await.unwrap();

        assert_eq!(routed, 7);
        assert_eq!(metrics.ownership_established.get(), 1);
        assert_eq!(metrics.transfers.get(), 1);
        assert_eq!(metrics.disputes_opened.get(), 1);
        assert_eq!(
            metrics.disputes_resolved.with_label_values(&[RESOLUTION_RESOLVED]).get(),
            1
        );
        assert_eq!(
            metrics.disputes_resolved.with_label_values(&[RESOLUTION_REOPENED]).get(),
            1
        );
        assert_eq!(metrics.complaints_logged.get(), 1);
        assert_eq!(metrics.complaints_escalated.get(), 1);
        assert_eq!(
            metrics
                .events_routed
                .with_label_values(&["dispute_resolved"])
                .get(),
            2
        );
    }

    #[tokio::test]
    async fn test_stream_consumer_sees_only_its_device() {
        let node = node();
        let stream = node.bus().event_stream(EventFilter::devices(vec![LAPTOP]));

        let ledger = node.ledger();
        ledger.establish_ownership(ADMIN, PHONE, ALICE).unwrap();
        ledger.establish_ownership(ADMIN, LAPTOP, BOB).unwrap();
        ledger.transfer(ALICE, PHONE, BOB, "sale").unwrap();
        ledger.transfer(BOB, LAPTOP, ALICE, "swap").unwrap();

        let seen: Vec<LedgerEvent> = stream.take(2).collect().await;
        assert_eq!(
            seen,
            vec![
                LedgerEvent::OwnershipEstablished {
                    device_id: LAPTOP,
                    owner: BOB,
                },
                LedgerEvent::OwnershipTransferred {
                    device_id: LAPTOP,
                    previous_owner: BOB,
                    new_owner: ALICE,
                    notes: "swap".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_node_clock_orders_transfer_times() {
        let node = node();
        let ledger = node.ledger();
        ledger.establish_ownership(ADMIN, PHONE, ALICE).unwrap();
        for _ in 0..5 {
            ledger.transfer(ALICE, PHONE, ALICE, "").unwrap();
        }

        let times: Vec<u64> = ledger
            .get_history(&PHONE)
            .iter()
            .map(|entry| entry.transfer_time)
            .collect();
        assert!(times.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
