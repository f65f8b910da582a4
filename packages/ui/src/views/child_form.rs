use dioxus::prelude::*;
use store::{ChildField, Gender};

use crate::registry::{dispatch, use_registry};

/// Add / edit form. Submitting updates the record being edited, if any.
#[component]
pub fn ChildForm() -> Element {
    let registry = use_registry();
    let editing = registry.read().state.editing.is_some();
    let busy = registry.read().state.busy;

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        dispatch(registry, |mut ctl| async move {
            ctl.save_record().await;
            ctl
        });
    };

    rsx! {
        h2 { if editing { "Edit Child" } else { "Add New Child" } }
        form {
            class: "child-form",
            onsubmit: handle_submit,
            for field in ChildField::ALL {
                if field == ChildField::Gender {
                    GenderSelect {}
                } else {
                    FormField { field }
                }
            }
            button {
                r#type: "submit",
                disabled: busy,
                if editing { "Update Child" } else { "Save Child" }
            }
        }
    }
}

#[component]
fn FormField(field: ChildField) -> Element {
    let mut registry = use_registry();
    let value = registry.read().state.form.get(field).to_string();

    rsx! {
        label {
            "{field.label()}:"
            input {
                r#type: field.input_type(),
                step: if field == ChildField::Weight { "any" } else { "" },
                value,
                required: true,
                oninput: move |evt: FormEvent| registry.write().state.form.set(field, evt.value()),
            }
        }
    }
}

#[component]
fn GenderSelect() -> Element {
    let mut registry = use_registry();
    let value = registry.read().state.form.gender.clone();

    rsx! {
        label {
            "{ChildField::Gender.label()}:"
            select {
                value,
                required: true,
                onchange: move |evt: FormEvent| {
                    registry.write().state.form.set(ChildField::Gender, evt.value())
                },
                option { value: "", "Select Gender" }
                for gender in Gender::ALL {
                    option { value: gender.as_str(), "{gender}" }
                }
            }
        }
    }
}
