use dioxus::prelude::*;

use super::ModalOverlay;
use crate::registry::{dispatch, use_registry};

/// Confirmation prompt for the delete awaiting in the registry.
#[component]
pub fn ConfirmDelete() -> Element {
    let mut registry = use_registry();
    let (name, busy) = {
        let ctl = registry.read();
        let name = ctl.state.pending_delete.and_then(|id| {
            ctl.state
                .children
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.full_name())
        });
        (name, ctl.state.busy)
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| registry.write().cancel_delete(),
            p { "Are you sure you want to delete this child?" }
            if let Some(name) = name {
                p { strong { "{name}" } }
            }
            div {
                class: "modal-actions",
                button {
                    class: "danger",
                    disabled: busy,
                    onclick: move |_| {
                        dispatch(registry, |mut ctl| async move {
                            ctl.confirm_delete().await;
                            ctl
                        })
                    },
                    if busy { "Deleting..." } else { "Delete" }
                }
                button {
                    disabled: busy,
                    onclick: move |_| registry.write().cancel_delete(),
                    "Cancel"
                }
            }
        }
    }
}
