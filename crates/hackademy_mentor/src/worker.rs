//! Background worker thread for mentor requests.

use crate::client::MentorClient;
use crate::prompt::placeholder;
use crate::protocol::{MentorCmd, MentorEvent, ReplyKind};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread;
use tracing::{debug, warn};

/// Handle for sending commands to, and receiving events from, the mentor worker.
pub struct MentorHandle {
    pub cmd_tx: Sender<MentorCmd>,
    pub evt_rx: Receiver<MentorEvent>,
}

fn reply(kind: ReplyKind, epoch: u64, result: Result<String, crate::MentorError>) -> MentorEvent {
    match result {
        Ok(text) => {
            debug!(?kind, epoch, chars = text.len(), "mentor replied");
            MentorEvent::Reply {
                epoch,
                kind,
                text,
                degraded: false,
            }
        }
        Err(err) => {
            warn!(?kind, epoch, "mentor request failed: {}", err);
            MentorEvent::Reply {
                epoch,
                kind,
                text: placeholder(kind, &err).to_string(),
                degraded: true,
            }
        }
    }
}

/// Spawn the worker thread that performs blocking mentor calls.
///
/// Requests are answered in order, one at a time, and never retried. Every
/// command yields exactly one [`MentorEvent::Reply`]; failures come back as
/// degraded placeholder text. The thread exits once `cmd_tx` is dropped.
///
/// # Returns
/// A [`MentorHandle`] containing the command sender and event receiver.
///
/// # Panics
/// Panics if the worker thread cannot be spawned.
pub fn spawn_mentor<C>(client: C) -> MentorHandle
where
    C: MentorClient + 'static,
{
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();

    thread::Builder::new()
        .name("hackademy-mentor".to_string())
        .spawn(move || {
            for cmd in cmd_rx.iter() {
                let event = match cmd {
                    MentorCmd::Review {
                        epoch,
                        code,
                        mission,
                    } => reply(ReplyKind::Review, epoch, client.review(&code, &mission)),
                    MentorCmd::Chat {
                        epoch,
                        history,
                        code,
                        stage,
                    } => reply(
                        ReplyKind::Chat,
                        epoch,
                        client.chat(&history, &code, &stage),
                    ),
                };
                if evt_tx.send(event).is_err() {
                    debug!("mentor event receiver dropped; stopping");
                    break;
                }
            }
        })
        .expect("spawn mentor worker");

    MentorHandle { cmd_tx, evt_rx }
}
