//! Query-session controller for a retrieval Q&A panel.
//!
//! A user types a question, the session issues one `POST /search` to the
//! retrieval service and exposes the ranked passages, the request lifecycle and
//! the user's feedback as an observable snapshot.
//!
//! ```text
//! submit(text) ──▶ SessionStateStore (Pending) ──▶ SearchRequestExecutor::run
//!                        ▲                                   │
//!                        └──── resolve_success / failure ◀───┘
//! presentation ◀── snapshot() / subscribe()
//! ```
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`store`] | Sole owner of session state, lifecycle guards |
//! | [`executor`] | One backend call per accepted submission |
//! | [`backend`] | Backend trait, HTTP client, payload normalization |
//! | [`session`] | Facade wiring store, executor and config |
//! | [`view`] | Answer bubble, reference cards, star fills |
//! | [`config`] | Backend base URL from the environment |
//! | [`telemetry`] | Global subscriber setup (stderr, `RUST_LOG`) |

pub mod backend;
pub mod config;
pub mod error_handler;
pub mod executor;
pub mod models;
pub mod session;
pub mod store;
pub mod telemetry;
pub mod view;

pub use error_handler::{QuerySessionError, Result};
pub use models::{ActiveTab, RequestStatus, ResultPassage, SessionSnapshot};
pub use session::QuerySession;
pub use store::{Resolution, SessionStateStore};
