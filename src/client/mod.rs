//! Client-side state synchronizer.
//!
//! Mirrors the browser data layer: workers call the HTTP endpoints,
//! reformat date fields for display, and publish results into an explicit
//! state container. Each action type is a latest-wins lane; a newer dispatch
//! of the same type supersedes any in-flight one, and superseded responses
//! are discarded without touching state. Mutations never update state
//! directly; on success they trigger a full collection re-fetch.

pub mod api;
pub mod dates;
pub mod store;
pub mod sync;

pub use api::{ApplicationApi, ClientError, HttpApi};
pub use store::{ClientState, ClientStore};
pub use sync::{Action, Synchronizer};
