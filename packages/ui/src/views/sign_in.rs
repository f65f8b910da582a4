use dioxus::prelude::*;

use crate::registry::{dispatch, use_registry};

/// Sign-in screen: a single button handing over to the identity provider.
#[component]
pub fn SignIn() -> Element {
    let registry = use_registry();
    let busy = registry.read().state.busy;

    rsx! {
        div {
            class: "sign-in",
            button {
                disabled: busy,
                onclick: move |_| {
                    dispatch(registry, |mut ctl| async move {
                        ctl.sign_in().await;
                        ctl
                    })
                },
                if busy { "Signing in..." } else { "Sign In" }
            }
        }
    }
}
