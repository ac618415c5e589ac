//! Client-side session glue for CollabStudio.
//!
//! Everything here sits between the editing surface and the outside
//! world: which server to talk to ([`config`]), whether this client hosts
//! the room or joins one ([`discovery`]), what the server says over the
//! wire ([`protocol`]), and the per-document session that keeps remote
//! carets in sync ([`session`]). The editing engine and the websocket
//! transport themselves live elsewhere.
#![warn(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod discovery;
pub mod protocol;
pub mod session;

mod error;

pub use config::ServerConfig;
pub use discovery::{bootstrap, Bootstrap, ServerRole};
pub use error::{StudioError, StudioResult};
pub use protocol::WireMessage;
pub use session::EditorSession;
