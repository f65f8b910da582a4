//! This crate contains all shared UI for the birth registry.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod controller;
pub use controller::{MessageKind, Session, StatusMessage, View, ViewController, ViewState};

mod registry;
pub use registry::{dispatch, make_registry, use_registry, Registry, RegistryProvider};

pub mod views;
pub use views::RegistryShell;

pub const REGISTRY_CSS: Asset = asset!("/assets/registry.css");

mod navbar;
pub use navbar::Navbar;
