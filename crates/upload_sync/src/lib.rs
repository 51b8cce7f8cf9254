//! Upload monitor sync channel: websocket transport and frame codec.
mod channel;
mod frame;
mod settings;
mod types;

pub use channel::ChannelHandle;
pub use frame::{decode_frame, encode_frame, ClientFrame, FrameError, ServerFrame};
pub use settings::{ChannelSettings, Credential};
pub use types::{ChannelError, ChannelEvent};
