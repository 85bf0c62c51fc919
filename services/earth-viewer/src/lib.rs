//! Interactive NASA Earth imagery viewer.
//!
//! The view owns a [`ViewState`] and a map widget through the
//! [`Controller`]. Inputs, map clicks and fetch settlements are handled one
//! at a time by the event loop in [`app`].

pub mod app;
pub mod commands;
pub mod controller;
pub mod presentation;
pub mod state;

pub use app::App;
pub use commands::Command;
pub use controller::{Controller, FetchStart, RequestToken, Settlement};
pub use presentation::{present, Presentation};
pub use state::ViewState;
