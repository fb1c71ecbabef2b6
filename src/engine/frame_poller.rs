//! Background polling of a frame-colour processing job.
//!
//! The poller owns its thread. `cancel` (or drop) closes the stop channel and
//! the event receiver, then detaches the thread: a request already in flight
//! finishes on its own and its result has nowhere to go.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};

use crate::engine::api_client::{fetch, frame_cancel_path, frame_progress_path, TriviaApi};
use crate::model::payload::{FrameColorResult, FrameProgress, ProgressStatus};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq)]
pub enum PollEvent {
    Progress { percent: u8, message: String },
    Completed(FrameColorResult),
    Failed(String),
}

impl PollEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PollEvent::Progress { .. })
    }
}

pub struct FramePoller {
    session_id: String,
    stop_tx: Option<Sender<()>>,
    events: Receiver<PollEvent>,
    finished: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    notify_cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl FramePoller {
    pub fn spawn<A>(api: A, session_id: String, interval: Duration) -> Self
    where
        A: TriviaApi + Clone + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (event_tx, events) = mpsc::channel();
        let finished = Arc::new(AtomicBool::new(false));

        let handle = {
            let api = api.clone();
            let id = session_id.clone();
            let finished = finished.clone();
            thread::spawn(move || poll_loop(&api, &id, interval, &stop_rx, &event_tx, &finished))
        };

        let cancel_id = session_id.clone();
        let notify_cancel: Box<dyn FnOnce() + Send> = Box::new(move || {
            // detached: never block the caller on the cancel request
            thread::spawn(move || {
                if let Err(e) = api.post(&frame_cancel_path(&cancel_id)) {
                    warn!("could not cancel frame session {}: {}", cancel_id, e);
                }
            });
        });

        debug!("polling frame session {} every {:?}", session_id, interval);

        Self {
            session_id,
            stop_tx: Some(stop_tx),
            events,
            finished,
            handle: Some(handle),
            notify_cancel: Some(notify_cancel),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// True once the server reported completion or failure.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    pub fn try_next(&self) -> Option<PollEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Blocks up to `timeout` for the next event.
    pub fn next_timeout(&self, timeout: Duration) -> Option<PollEvent> {
        self.events.recv_timeout(timeout).ok()
    }

    /// Stops polling and tells the server to drop unfinished work. Returns
    /// without waiting on a progress request that is still in flight.
    pub fn cancel(&mut self) {
        let Some(stop_tx) = self.stop_tx.take() else {
            return;
        };
        drop(stop_tx);

        // swap in a dead receiver so a late send from the old thread fails
        let (_, closed) = mpsc::channel();
        drop(std::mem::replace(&mut self.events, closed));

        if !self.is_finished() {
            if let Some(notify) = self.notify_cancel.take() {
                debug!("cancelling frame session {}", self.session_id);
                notify();
            }
        }

        if let Some(handle) = self.handle.take() {
            if handle.is_finished() && handle.join().is_err() {
                warn!("frame poller thread for {} panicked", self.session_id);
            }
        }
    }
}

impl Drop for FramePoller {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn poll_loop<A: TriviaApi>(
    api: &A,
    session_id: &str,
    interval: Duration,
    stop_rx: &Receiver<()>,
    events: &Sender<PollEvent>,
    finished: &AtomicBool,
) {
    let path = frame_progress_path(session_id);

    loop {
        // a closed stop channel means cancel
        match stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }

        let event = match fetch::<FrameProgress, _>(api, &path) {
            Ok(progress) => progress_event(progress),
            Err(e) => {
                warn!("polling frame session {} failed: {}", session_id, e);
                PollEvent::Failed("Error checking progress".to_string())
            }
        };

        let terminal = event.is_terminal();
        if terminal {
            finished.store(true, Ordering::SeqCst);
        }
        if events.send(event).is_err() || terminal {
            return;
        }
    }
}

fn progress_event(progress: FrameProgress) -> PollEvent {
    let percent = progress.percent();
    match progress.status {
        ProgressStatus::Completed => match progress.result {
            Some(result) => PollEvent::Completed(result),
            None => PollEvent::Progress {
                percent,
                message: progress.message.unwrap_or_else(|| "Finishing up...".to_string()),
            },
        },
        ProgressStatus::Error => PollEvent::Failed(
            progress
                .message
                .unwrap_or_else(|| "Processing failed".to_string()),
        ),
        ProgressStatus::Processing => PollEvent::Progress {
            percent,
            message: progress.message.unwrap_or_else(|| "Processing...".to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_without_result_keeps_polling() {
        let p: FrameProgress =
            serde_json::from_str(r#"{"status":"completed","progress":100}"#).unwrap();
        assert!(!progress_event(p).is_terminal());
    }

    #[test]
    fn error_status_uses_server_message() {
        let p: FrameProgress =
            serde_json::from_str(r#"{"status":"error","message":"no video file"}"#).unwrap();
        assert_eq!(progress_event(p), PollEvent::Failed("no video file".into()));
    }
}
