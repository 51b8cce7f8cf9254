use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use sync_logging::{sync_debug, sync_error, sync_info, sync_warn};
use tokio::sync::mpsc as async_mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tokio_util::sync::CancellationToken;
use upload_core::SessionId;

use crate::{
    decode_frame, encode_frame, ChannelError, ChannelEvent, ChannelSettings, ClientFrame,
    Credential,
};

enum ChannelCommand {
    Open {
        session: SessionId,
        credential: Credential,
    },
    Close {
        session: SessionId,
    },
    Send {
        session: SessionId,
        frame: ClientFrame,
    },
}

struct ActiveSession {
    session: SessionId,
    outgoing: async_mpsc::UnboundedSender<ClientFrame>,
    cancel: CancellationToken,
}

/// Fire-and-forget handle to the sync channel.
///
/// The transport runs on its own thread with a tokio runtime; commands go in
/// and [`ChannelEvent`]s come out in the order the transport observed them.
/// At most one session is live at a time.
pub struct ChannelHandle {
    cmd_tx: mpsc::Sender<ChannelCommand>,
    event_rx: mpsc::Receiver<ChannelEvent>,
}

impl ChannelHandle {
    pub fn new(settings: ChannelSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    sync_error!("failed to start channel runtime: {}", err);
                    return;
                }
            };

            let mut active: Option<ActiveSession> = None;
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &settings, &event_tx, &mut active, command);
            }
            if let Some(session) = active.take() {
                session.cancel.cancel();
            }
            runtime.shutdown_timeout(Duration::from_secs(1));
        });

        Self { cmd_tx, event_rx }
    }

    /// Opens a new session, tearing down any previous one.
    pub fn open(&self, session: SessionId, credential: Credential) {
        let _ = self.cmd_tx.send(ChannelCommand::Open {
            session,
            credential,
        });
    }

    pub fn close(&self, session: SessionId) {
        let _ = self.cmd_tx.send(ChannelCommand::Close { session });
    }

    /// Queues a frame; dropped when `session` is not the live one.
    pub fn send(&self, session: SessionId, frame: ClientFrame) {
        let _ = self.cmd_tx.send(ChannelCommand::Send { session, frame });
    }

    pub fn try_recv(&self) -> Option<ChannelEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ChannelEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    settings: &ChannelSettings,
    event_tx: &mpsc::Sender<ChannelEvent>,
    active: &mut Option<ActiveSession>,
    command: ChannelCommand,
) {
    match command {
        ChannelCommand::Open {
            session,
            credential,
        } => {
            if let Some(previous) = active.take() {
                sync_debug!("session {} replaced by {}", previous.session, session);
                previous.cancel.cancel();
            }
            let (outgoing, outgoing_rx) = async_mpsc::unbounded_channel();
            let cancel = CancellationToken::new();
            runtime.spawn(run_session(
                settings.clone(),
                session,
                credential,
                outgoing_rx,
                cancel.clone(),
                event_tx.clone(),
            ));
            *active = Some(ActiveSession {
                session,
                outgoing,
                cancel,
            });
        }
        ChannelCommand::Close { session } => match active.take() {
            Some(current) if current.session == session => current.cancel.cancel(),
            other => *active = other,
        },
        ChannelCommand::Send { session, frame } => match active.as_ref() {
            Some(current) if current.session == session => {
                if current.outgoing.send(frame).is_err() {
                    sync_debug!("session {} already finished, frame dropped", session);
                }
            }
            _ => sync_debug!("no live session {}, frame dropped", session),
        },
    }
}

async fn run_session(
    settings: ChannelSettings,
    session: SessionId,
    credential: Credential,
    mut outgoing: async_mpsc::UnboundedReceiver<ClientFrame>,
    cancel: CancellationToken,
    events: mpsc::Sender<ChannelEvent>,
) {
    let closed = |reason: Option<ChannelError>| ChannelEvent::Closed {
        session,
        reason: reason.map(|err| err.to_string()),
    };

    let url = match settings.session_url(&credential) {
        Ok(url) => url,
        Err(err) => {
            sync_warn!("session {}: {}", session, err);
            let _ = events.send(closed(Some(err)));
            return;
        }
    };

    // The query string carries the credential; keep it out of the log.
    sync_info!(
        "session {} connecting to {}:{}",
        session,
        url.host_str().unwrap_or_default(),
        url.port_or_known_default().unwrap_or_default()
    );
    let connect = tokio::time::timeout(settings.connect_timeout, connect_async(url.as_str()));
    let stream = tokio::select! {
        _ = cancel.cancelled() => {
            let _ = events.send(closed(None));
            return;
        }
        result = connect => match result {
            Ok(Ok((stream, _response))) => stream,
            Ok(Err(err)) => {
                let err = ChannelError::Connect(err.to_string());
                sync_warn!("session {}: {}", session, err);
                let _ = events.send(closed(Some(err)));
                return;
            }
            Err(_) => {
                let err = ChannelError::ConnectTimeout(settings.connect_timeout);
                sync_warn!("session {}: {}", session, err);
                let _ = events.send(closed(Some(err)));
                return;
            }
        },
    };

    sync_info!("session {} connected", session);
    let _ = events.send(ChannelEvent::Opened { session });

    let (mut write, mut read) = stream.split();
    let reason = loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = write.send(Message::Close(None)).await;
                break None;
            }
            next = outgoing.recv() => {
                let Some(frame) = next else {
                    break None;
                };
                let text = match encode_frame(&frame) {
                    Ok(text) => text,
                    Err(err) => {
                        sync_warn!("session {}: failed to encode frame: {}", session, err);
                        continue;
                    }
                };
                sync_debug!("session {} -> {}", session, frame_name(&frame));
                if let Err(err) = write.send(Message::Text(text)).await {
                    break Some(ChannelError::WebSocket(err.to_string()));
                }
            }
            incoming = read.next() => match incoming {
                Some(Ok(Message::Text(text))) => match decode_frame(&text) {
                    Ok(frame) => {
                        let _ = events.send(ChannelEvent::Received { session, frame });
                    }
                    Err(err) => sync_warn!("session {}: skipping frame: {}", session, err),
                },
                Some(Ok(Message::Close(_))) | None => break Some(ChannelError::ClosedByServer),
                Some(Ok(_)) => {}
                Some(Err(err)) => break Some(ChannelError::WebSocket(err.to_string())),
            },
        }
    };

    match &reason {
        Some(err) => sync_warn!("session {} dropped: {}", session, err),
        None => sync_info!("session {} closed", session),
    }
    let _ = events.send(closed(reason));
}

fn frame_name(frame: &ClientFrame) -> &'static str {
    match frame {
        ClientFrame::ListQuery(_) => "upload/list",
        ClientFrame::Delete { .. } => "upload/delete",
    }
}
