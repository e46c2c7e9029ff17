//! `init_tracing` when the host application installed its own subscriber.
//! Runs in its own test binary so the global subscriber starts unset.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use charprobe_core::tracing::init_tracing;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

struct CountEvents(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for CountEvents {
    fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn existing_global_subscriber_is_kept() {
    let events = Arc::new(AtomicUsize::new(0));
    tracing_subscriber::registry()
        .with(CountEvents(Arc::clone(&events)))
        .try_init()
        .unwrap();

    init_tracing();

    // The conflict is reported to the subscriber that stayed installed.
    assert_eq!(events.load(Ordering::SeqCst), 1);
    tracing::info!("still routed to the host subscriber");
    assert_eq!(events.load(Ordering::SeqCst), 2);
}
