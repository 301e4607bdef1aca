use forgeexe::exec::{BuildEvent, BuildState};
use tokio::sync::mpsc;

/// Drain events until `Idle` follows a terminal state (i.e. one full build).
pub async fn collect_until_idle(rx: &mut mpsc::Receiver<BuildEvent>) -> Vec<BuildEvent> {
    let mut out = Vec::new();
    let mut finished = false;
    while let Some(event) = rx.recv().await {
        let done = matches!(event, BuildEvent::StateChanged(BuildState::Idle)) && finished;
        if let BuildEvent::StateChanged(state) = event {
            finished |= state.is_terminal();
        }
        out.push(event);
        if done {
            break;
        }
    }
    out
}

/// Only the log lines, in order.
pub fn lines(events: &[BuildEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            BuildEvent::LineReceived(line) => Some(line.clone()),
            BuildEvent::StateChanged(_) => None,
        })
        .collect()
}

/// Only the state transitions, in order.
pub fn states(events: &[BuildEvent]) -> Vec<BuildState> {
    events
        .iter()
        .filter_map(|e| match e {
            BuildEvent::StateChanged(state) => Some(*state),
            BuildEvent::LineReceived(_) => None,
        })
        .collect()
}
