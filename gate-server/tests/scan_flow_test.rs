//! 扫描流程测试 - 校验/入场的完整结果分类
//!
//! 覆盖：验证幂等、跨场次隔离、退款优先、重复扫描、实时广播、统计。

use gate_server::db::repository::{check_in, ticket};
use gate_server::{Config, ServerState, codec, scan};
use shared::models::{
    CheckInRequest, InvalidReason, ScanMethod, ScanOutcome, TicketPurchase, TicketPurchaseCreate,
    VerifyRequest,
};

const EVENT_ID: i64 = 900;
const VENUE_ID: i64 = 33;

async fn test_state() -> (ServerState, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(dir.path().to_string_lossy().into_owned(), 0);
    let state = ServerState::initialize(&config).await;
    (state, dir)
}

async fn sell_ticket_for(
    state: &ServerState,
    event_id: i64,
    venue_id: i64,
    quantity: i64,
) -> TicketPurchase {
    let id = shared::util::snowflake_id();
    let code = codec::encode(id, &state.config.code_secret);
    ticket::create(
        &state.pool,
        id,
        &code,
        TicketPurchaseCreate {
            event_id,
            venue_id,
            fan_id: 8001,
            fan_name: "Sam Okafor".into(),
            quantity,
            amount_paid: 60.0,
        },
    )
    .await
    .expect("create ticket")
}

fn verify_request(code: &str) -> VerifyRequest {
    VerifyRequest {
        code: code.to_string(),
        event_id: EVENT_ID,
        venue_id: VENUE_ID,
    }
}

fn check_in_request(code: &str, staff_id: i64, staff_name: &str) -> CheckInRequest {
    CheckInRequest {
        code: code.to_string(),
        event_id: EVENT_ID,
        venue_id: VENUE_ID,
        staff_id,
        staff_name: staff_name.to_string(),
        method: ScanMethod::Optical,
    }
}

/// The end-to-end door scenario: verify → S1 admits → S2 double-scans →
/// verify reports the admission.
#[tokio::test]
async fn double_scan_reports_the_winning_admission() {
    let (state, _dir) = test_state().await;
    let purchase = sell_ticket_for(&state, EVENT_ID, VENUE_ID, 2).await;
    let code = &purchase.verification_code;

    match scan::verify(&state, &verify_request(code)).await.unwrap() {
        ScanOutcome::Valid {
            purchase_id,
            fan_name,
            quantity,
            ..
        } => {
            assert_eq!(purchase_id, purchase.id);
            assert_eq!(fan_name, "Sam Okafor");
            assert_eq!(quantity, 2);
        }
        other => panic!("expected valid, got {other:?}"),
    }

    let s1 = scan::check_in(&state, &check_in_request(code, 1, "door-south"))
        .await
        .unwrap();
    let ScanOutcome::Admitted { record: winner } = s1 else {
        panic!("expected admitted, got {s1:?}");
    };
    assert_eq!(winner.staff_name, "door-south");

    let s2 = scan::check_in(&state, &check_in_request(code, 2, "door-north"))
        .await
        .unwrap();
    let ScanOutcome::AlreadyUsed { record } = s2 else {
        panic!("expected already_used, got {s2:?}");
    };
    assert_eq!(record.checked_in_at, winner.checked_in_at);
    assert_eq!(record.staff_name, "door-south");
    assert_eq!(record.times_scanned, 2);

    match scan::verify(&state, &verify_request(code)).await.unwrap() {
        ScanOutcome::AlreadyUsed { record } => {
            assert_eq!(record.staff_name, "door-south");
            assert_eq!(record.checked_in_at, winner.checked_in_at);
        }
        other => panic!("expected already_used, got {other:?}"),
    }
}

#[tokio::test]
async fn verify_is_idempotent_and_read_only() {
    let (state, _dir) = test_state().await;
    let purchase = sell_ticket_for(&state, EVENT_ID, VENUE_ID, 1).await;
    let req = verify_request(&purchase.verification_code);

    let first = scan::verify(&state, &req).await.unwrap();
    for _ in 0..3 {
        let again = scan::verify(&state, &req).await.unwrap();
        match (&first, &again) {
            (
                ScanOutcome::Valid {
                    purchase_id: a,
                    purchased_at: at,
                    ..
                },
                ScanOutcome::Valid {
                    purchase_id: b,
                    purchased_at: bt,
                    ..
                },
            ) => {
                assert_eq!(a, b);
                assert_eq!(at, bt);
            }
            other => panic!("verification drifted: {other:?}"),
        }
    }

    // Still no check-in row: verification never mutates
    assert!(
        check_in::find_by_purchase(&state.pool, purchase.id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn scans_are_scoped_to_the_event_and_venue() {
    let (state, _dir) = test_state().await;
    let purchase = sell_ticket_for(&state, EVENT_ID, VENUE_ID, 1).await;
    let code = &purchase.verification_code;

    // Same venue, different event
    let wrong_event = VerifyRequest {
        code: code.clone(),
        event_id: EVENT_ID + 1,
        venue_id: VENUE_ID,
    };
    // Same event id presented at another venue's scanner
    let wrong_venue = VerifyRequest {
        code: code.clone(),
        event_id: EVENT_ID,
        venue_id: VENUE_ID + 1,
    };

    for req in [wrong_event, wrong_venue] {
        match scan::verify(&state, &req).await.unwrap() {
            ScanOutcome::Invalid { reason } => assert_eq!(reason, InvalidReason::WrongEvent),
            other => panic!("expected wrong_event, got {other:?}"),
        }
    }

    // The home scanner still admits
    let outcome = scan::check_in(&state, &check_in_request(code, 1, "door-1"))
        .await
        .unwrap();
    assert!(outcome.is_admitted());
}

#[tokio::test]
async fn malformed_and_unknown_codes_are_distinguished() {
    let (state, _dir) = test_state().await;

    for raw in ["", "not-a-code", "GM-TOO-SHORT", "QQ-23456789-23456789-23456789"] {
        match scan::verify(&state, &verify_request(raw)).await.unwrap() {
            ScanOutcome::Invalid { reason } => assert_eq!(
                reason,
                InvalidReason::InvalidFormat,
                "raw input {raw:?} must fail the syntax check"
            ),
            other => panic!("expected invalid_format, got {other:?}"),
        }
    }

    // Well-formed code that was never issued: syntactically fine, no row
    let ghost = codec::encode(123_456_789, "some-other-deployment-secret");
    match scan::verify(&state, &verify_request(&ghost)).await.unwrap() {
        ScanOutcome::Invalid { reason } => assert_eq!(reason, InvalidReason::NotFound),
        other => panic!("expected not_found, got {other:?}"),
    }
}

#[tokio::test]
async fn refund_denies_before_and_after_admission() {
    let (state, _dir) = test_state().await;

    // Refund before any scan
    let unscanned = sell_ticket_for(&state, EVENT_ID, VENUE_ID, 1).await;
    ticket::mark_refunded(&state.pool, unscanned.id)
        .await
        .unwrap();
    for outcome in [
        scan::verify(&state, &verify_request(&unscanned.verification_code))
            .await
            .unwrap(),
        scan::check_in(
            &state,
            &check_in_request(&unscanned.verification_code, 1, "door-1"),
        )
        .await
        .unwrap(),
    ] {
        match outcome {
            ScanOutcome::Invalid { reason } => assert_eq!(reason, InvalidReason::Refunded),
            other => panic!("expected refunded, got {other:?}"),
        }
    }

    // Refund after admission: the refund still wins every later scan
    let admitted = sell_ticket_for(&state, EVENT_ID, VENUE_ID, 1).await;
    let outcome = scan::check_in(
        &state,
        &check_in_request(&admitted.verification_code, 1, "door-1"),
    )
    .await
    .unwrap();
    assert!(outcome.is_admitted());
    ticket::mark_refunded(&state.pool, admitted.id)
        .await
        .unwrap();
    match scan::verify(&state, &verify_request(&admitted.verification_code))
        .await
        .unwrap()
    {
        ScanOutcome::Invalid { reason } => assert_eq!(reason, InvalidReason::Refunded),
        other => panic!("expected refunded, got {other:?}"),
    }
}

#[tokio::test]
async fn repeated_refund_is_a_noop() {
    let (state, _dir) = test_state().await;
    let purchase = sell_ticket_for(&state, EVENT_ID, VENUE_ID, 1).await;

    let first = ticket::mark_refunded(&state.pool, purchase.id)
        .await
        .unwrap();
    let second = ticket::mark_refunded(&state.pool, purchase.id)
        .await
        .unwrap();
    assert!(second.is_refunded());
    assert_eq!(first.refunded_at, second.refunded_at);
}

#[tokio::test]
async fn live_feed_publishes_only_on_admission() {
    let (state, _dir) = test_state().await;
    let purchase = sell_ticket_for(&state, EVENT_ID, VENUE_ID, 3).await;
    let code = &purchase.verification_code;

    let mut rx = state.live.subscribe(EVENT_ID);

    // Verify never publishes
    scan::verify(&state, &verify_request(code)).await.unwrap();
    assert!(rx.try_recv().is_err());

    let outcome = scan::check_in(&state, &check_in_request(code, 1, "door-1"))
        .await
        .unwrap();
    assert!(outcome.is_admitted());
    let notice = rx.recv().await.unwrap();
    assert_eq!(notice.purchase_id, purchase.id);
    assert_eq!(notice.quantity, 3);
    assert_eq!(notice.admitted_purchases, 1);
    assert_eq!(notice.sold_purchases, 1);

    // A double-scan is not an admission; nothing new on the feed
    scan::check_in(&state, &check_in_request(code, 2, "door-2"))
        .await
        .unwrap();
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn attendance_tally_counts_purchases_and_guests() {
    let (state, _dir) = test_state().await;
    let a = sell_ticket_for(&state, EVENT_ID, VENUE_ID, 2).await;
    // Sold but never scanned; counts toward sold, not admitted
    let _b = sell_ticket_for(&state, EVENT_ID, VENUE_ID, 1).await;
    let refunded = sell_ticket_for(&state, EVENT_ID, VENUE_ID, 4).await;
    ticket::mark_refunded(&state.pool, refunded.id)
        .await
        .unwrap();
    // A different event's sales stay out of this tally
    sell_ticket_for(&state, EVENT_ID + 1, VENUE_ID, 5).await;

    scan::check_in(
        &state,
        &check_in_request(&a.verification_code, 1, "door-1"),
    )
    .await
    .unwrap();

    let (sold_purchases, sold_guests) = ticket::count_sold(&state.pool, EVENT_ID).await.unwrap();
    let (admitted_purchases, admitted_guests) =
        check_in::count_admitted(&state.pool, EVENT_ID).await.unwrap();

    assert_eq!(sold_purchases, 2, "refunded purchases are not counted");
    assert_eq!(sold_guests, 3);
    assert_eq!(admitted_purchases, 1);
    assert_eq!(admitted_guests, 2);
}
