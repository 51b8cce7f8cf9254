use sync_logging::{sync_debug, sync_info};
use upload_core::{Effect, Msg};
use upload_sync::{ChannelEvent, ChannelHandle, ChannelSettings, ClientFrame, ServerFrame};

use super::session::SessionContext;

pub struct EffectRunner {
    channel: ChannelHandle,
    context: SessionContext,
}

impl EffectRunner {
    pub fn new(settings: ChannelSettings, context: SessionContext) -> Self {
        Self {
            channel: ChannelHandle::new(settings),
            context,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::OpenChannel { session } => {
                    sync_info!("OpenChannel session={}", session);
                    self.channel.open(session, self.context.credential().clone());
                }
                Effect::CloseChannel { session } => {
                    sync_info!("CloseChannel session={}", session);
                    self.channel.close(session);
                }
                Effect::SendQuery { session, query } => {
                    sync_debug!(
                        "SendQuery session={} page={} size={} sort={:?} {:?}",
                        session,
                        query.page,
                        query.size,
                        query.sort_by,
                        query.sort_order
                    );
                    self.channel.send(session, ClientFrame::ListQuery(query));
                }
                Effect::SendDelete { session, ids } => {
                    sync_info!("SendDelete session={} ids={:?}", session, ids);
                    self.channel.send(session, ClientFrame::Delete { ids });
                }
                Effect::RequestToggle { id } => {
                    sync_debug!("RequestToggle id={}", id);
                    self.context.transfers().request_toggle(id);
                }
            }
        }
    }

    /// Channel events observed since the last call, already mapped to messages.
    pub fn drain_messages(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.channel.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

fn map_event(event: ChannelEvent) -> Msg {
    match event {
        ChannelEvent::Opened { session } => Msg::ChannelOpened { session },
        ChannelEvent::Closed { session, reason } => Msg::ChannelClosed { session, reason },
        ChannelEvent::Received {
            frame: ServerFrame::Snapshot(snapshot),
            ..
        } => Msg::SnapshotReceived(snapshot),
        ChannelEvent::Received {
            frame: ServerFrame::Error { message },
            ..
        } => Msg::ServerError { message },
    }
}
