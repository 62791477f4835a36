mod common;

use common::{subscribe_events, web_correlator};
use payflow::domain::config::WebCheckoutParams;
use payflow::domain::result::{CheckoutResult, FinishOutcome};
use payflow::domain::signal::RelaunchSignal;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

// Sweeps random relaunch timings across the grace window boundary. Whichever
// trigger wins, the channel must see exactly one terminal event.
#[tokio::test(start_paused = true)]
async fn test_randomized_relaunch_vs_watchdog_single_emission() {
    let mut rng = rand::thread_rng();

    for _ in 0..50 {
        let (client, correlator) = web_correlator();
        client.push_finish(FinishOutcome::Canceled);
        let events = subscribe_events(&correlator);

        correlator
            .initiate("ORDER-RACE", WebCheckoutParams::default())
            .await
            .unwrap();
        correlator.on_foreground_resumed();

        let delay_ms: u64 = rng.gen_range(0..4000);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        tokio::task::yield_now().await;

        let handled =
            correlator.on_relaunch(&RelaunchSignal::parse("payflow://checkout").unwrap());

        tokio::time::sleep(Duration::from_millis(5000)).await;
        tokio::task::yield_now().await;

        let events = events.lock().unwrap();
        assert_eq!(
            events.len(),
            1,
            "delay {delay_ms}ms, handled={handled}, events={events:?}"
        );
        assert!(matches!(
            events[0],
            CheckoutResult::Canceled { .. }
        ));
        assert!(!correlator.has_active_session());
    }
}

// Two relaunch signals racing from different threads: exactly one is claimed
// and the client's finish operation runs exactly once.
#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_relaunches_claim_once() {
    for _ in 0..20 {
        let (client, correlator) = web_correlator();
        client.push_finish(FinishOutcome::Canceled);
        let events = subscribe_events(&correlator);

        correlator
            .initiate("ORDER-RACE", WebCheckoutParams::default())
            .await
            .unwrap();

        let correlator = Arc::new(correlator);
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let correlator = Arc::clone(&correlator);
                std::thread::spawn(move || {
                    let signal = RelaunchSignal::parse("payflow://checkout").unwrap();
                    correlator.on_relaunch(&signal)
                })
            })
            .collect();

        let claimed: Vec<bool> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert_eq!(claimed.iter().filter(|handled| **handled).count(), 1);
        assert_eq!(client.finish_calls(), 1);
        assert_eq!(events.lock().unwrap().len(), 1);
    }
}
