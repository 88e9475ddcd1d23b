//! Core library for the Muezzin prayer times app: the place selection
//! flow (country → city → district) and the on-device file storage layer.
//!
//! The crate is UI-agnostic. The embedding application renders whatever
//! [`flow::Step`] the controller currently presents, feeds the user's
//! choice back as a [`flow::StepOutcome`], and receives the final
//! [`flow::PlaceSelection`] handoff when the flow completes.

pub mod config;
pub mod flow;
pub mod logging;
pub mod model;
pub mod storage;

pub use flow::{PlaceSelection, PlaceSelectionFlow, Step, StepOutcome, Transition};
pub use model::{City, Country, District};
pub use storage::{DataDirPolicy, FileStore};
