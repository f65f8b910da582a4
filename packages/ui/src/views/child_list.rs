use dioxus::prelude::*;
use store::ChildRecord;

use crate::icons::{FaEye, FaPenToSquare, FaTrashCan};
use crate::registry::use_registry;
use crate::Icon;

/// Table of the cached birth records.
#[component]
pub fn ChildList() -> Element {
    let registry = use_registry();
    let children = registry.read().state.children.clone();

    rsx! {
        h2 { "Child List" }
        if children.is_empty() {
            p { class: "empty", "No children registered yet." }
        } else {
            table {
                class: "child-table",
                thead {
                    tr {
                        th { "First Name" }
                        th { "Last Name" }
                        th { "Gender" }
                        th { "Mother's Name" }
                        th { "Father's Name" }
                        th { "Weight (kg)" }
                        th { "Birth Date" }
                        th { "Birth Place" }
                        th { "Actions" }
                    }
                }
                tbody {
                    for child in children {
                        ChildRow { key: "{child.id}", child }
                    }
                }
            }
        }
    }
}

#[component]
fn ChildRow(child: ChildRecord) -> Element {
    let mut registry = use_registry();
    let id = child.id;
    let f = child.fields.clone();
    let for_edit = child.clone();
    let for_view = child.clone();

    rsx! {
        tr {
            td { "{f.first_name}" }
            td { "{f.last_name}" }
            td { "{f.gender}" }
            td { "{f.mother_name}" }
            td { "{f.father_name}" }
            td { "{f.weight}" }
            td { "{f.birth_date}" }
            td { "{f.birth_place}" }
            td {
                class: "row-actions",
                button {
                    onclick: move |_| registry.write().edit_record(&for_edit),
                    Icon { icon: FaPenToSquare, width: 14, height: 14 }
                    "Edit"
                }
                button {
                    class: "danger",
                    onclick: move |_| registry.write().request_delete(id),
                    Icon { icon: FaTrashCan, width: 14, height: 14 }
                    "Delete"
                }
                button {
                    onclick: move |_| registry.write().view_record(for_view.clone()),
                    Icon { icon: FaEye, width: 14, height: 14 }
                    "View"
                }
            }
        }
    }
}
