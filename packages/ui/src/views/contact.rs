use dioxus::prelude::*;

use crate::registry::use_registry;

#[component]
pub fn ContactUs() -> Element {
    let mut registry = use_registry();
    let contact = registry.read().state.contact.clone();

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        registry.write().submit_contact();
    };

    rsx! {
        h2 { "Contact Us" }
        form {
            class: "contact-form",
            onsubmit: handle_submit,
            label {
                "Name:"
                input {
                    r#type: "text",
                    value: contact.name,
                    required: true,
                    oninput: move |evt: FormEvent| registry.write().state.contact.name = evt.value(),
                }
            }
            label {
                "Email:"
                input {
                    r#type: "email",
                    value: contact.email,
                    required: true,
                    oninput: move |evt: FormEvent| registry.write().state.contact.email = evt.value(),
                }
            }
            label {
                "Message:"
                textarea {
                    value: contact.message,
                    required: true,
                    oninput: move |evt: FormEvent| registry.write().state.contact.message = evt.value(),
                }
            }
            button { r#type: "submit", "Submit" }
        }
    }
}
