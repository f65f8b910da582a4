use dioxus::prelude::*;

use crate::controller::View;
use crate::icons::{FaEnvelope, FaList, FaPlus, FaRightFromBracket};
use crate::registry::{dispatch, use_registry};
use crate::Icon;

/// Action buttons shown to signed-in users.
#[component]
pub fn Navbar() -> Element {
    let mut registry = use_registry();
    let user = registry
        .read()
        .state
        .session
        .principal()
        .map(|p| p.display_name().to_string())
        .unwrap_or_default();

    rsx! {
        div {
            class: "navbar",
            span { class: "principal", title: "Signed in as", "{user}" }
            button {
                onclick: move |_| {
                    dispatch(registry, |mut ctl| async move {
                        ctl.sign_out().await;
                        ctl
                    })
                },
                Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                "Sign Out"
            }
            button {
                onclick: move |_| registry.write().new_record(),
                Icon { icon: FaPlus, width: 14, height: 14 }
                "Add New Child"
            }
            button {
                onclick: move |_| {
                    dispatch(registry, |mut ctl| async move {
                        ctl.show_children().await;
                        ctl
                    })
                },
                Icon { icon: FaList, width: 14, height: 14 }
                "View Children"
            }
            button {
                onclick: move |_| registry.write().navigate(View::ContactUs),
                Icon { icon: FaEnvelope, width: 14, height: 14 }
                "Contact Us"
            }
        }
    }
}
