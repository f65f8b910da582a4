use dioxus::prelude::*;

use super::{ChildDetails, ChildForm, ChildList, ConfirmDelete, ContactUs, SignIn};
use crate::controller::{MessageKind, View};
use crate::registry::use_registry;
use crate::{Navbar, REGISTRY_CSS};

/// Top-level layout: header, status line and whichever view is active.
#[component]
pub fn RegistryShell() -> Element {
    let registry = use_registry();
    let state = registry.read().state.clone();
    let signed_in = state.session.is_authenticated();

    let main_class = if state.view == View::SignIn {
        "sign-in-background"
    } else {
        "registry"
    };

    rsx! {
        document::Stylesheet { href: REGISTRY_CSS }
        main {
            class: main_class,
            h1 { i { "BIRTH RECORD MANAGEMENT SYSTEM" } }
            StatusLine {}
            if signed_in {
                Navbar {}
                {active_view(state.view.clone())}
                if state.pending_delete.is_some() {
                    ConfirmDelete {}
                }
            } else if state.view == View::SignIn {
                SignIn {}
            }
        }
    }
}

fn active_view(view: View) -> Element {
    match view {
        View::AddChild => rsx! { ChildForm {} },
        View::ViewChildren => rsx! { ChildList {} },
        View::ViewChildDetails(child) => rsx! { ChildDetails { child } },
        View::ContactUs => rsx! { ContactUs {} },
        View::None | View::SignIn => rsx! {},
    }
}

#[component]
fn StatusLine() -> Element {
    let mut registry = use_registry();
    let Some(message) = registry.read().state.message.clone() else {
        return rsx! {};
    };
    let class = match message.kind {
        MessageKind::Success => "status success",
        MessageKind::Failure => "status failure",
    };

    rsx! {
        p {
            class,
            onclick: move |_| registry.write().dismiss_message(),
            "{message.text}"
        }
    }
}
