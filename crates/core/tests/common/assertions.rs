//! Assertion helpers over run events.

use rk_protocol::ipc::RunEvent;
use tokio::sync::mpsc::Receiver;

/// Drain every event still buffered in `rx`.
#[allow(dead_code)]
pub fn drain_events(rx: &mut Receiver<RunEvent>) -> Vec<RunEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Assert that events start with RunStarted, end in a terminal event and
/// all share one run id.
#[allow(dead_code)]
pub fn assert_event_sequence(events: &[RunEvent]) {
    let (Some(first), Some(last)) = (events.first(), events.last()) else {
        panic!("Event sequence is empty");
    };

    assert!(
        matches!(first, RunEvent::RunStarted { .. }),
        "First event should be RunStarted, got: {first:?}"
    );
    assert!(
        last.status().is_terminal(),
        "Last event should be RunCompleted or RunFailed, got: {last:?}"
    );

    let run_id = first.run_id();
    assert!(
        events.iter().all(|e| e.run_id() == run_id),
        "All events should belong to run {run_id}"
    );
}

/// Indices of StepCompleted events, in emission order.
#[allow(dead_code)]
pub fn completed_step_indices(events: &[RunEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|e| match e {
            RunEvent::StepCompleted { step_index, .. } => Some(*step_index),
            _ => None,
        })
        .collect()
}
