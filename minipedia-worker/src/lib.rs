//! Conversational encyclopedia front-end
//!
//! Ties the text algorithms of `minipedia-core` to the messaging channels:
//! a session-keyed state machine walks each user from search prompt to
//! article section, answering on the USSD channel and delivering full
//! content over SMS. Networking, persistence and message routing stay
//! behind the [`client`], [`store`], [`cache`] and [`transport`] seams, so
//! the worker itself is synchronous and runs unchanged under any frontend.

#![warn(missing_docs)]

pub mod cache;
pub mod client;
pub mod error;
pub mod menu;
pub mod message;
pub mod session;
pub mod store;
pub mod transport;
pub mod worker;

pub use cache::{ExtractCache, InMemoryExtractCache};
pub use client::EncyclopediaClient;
pub use error::{ClientError, StoreError, TransportError, WorkerError};
pub use message::{InboundMessage, SessionEvent};
pub use session::{Session, SessionState};
pub use store::{InMemorySessionStore, SessionStore};
pub use transport::ReplyTransport;
pub use worker::{UssdWorker, WorkerConfig};
