use dioxus::prelude::*;
use store::ChildRecord;

use crate::registry::use_registry;

#[component]
pub fn ChildDetails(child: ChildRecord) -> Element {
    let mut registry = use_registry();
    let f = &child.fields;

    rsx! {
        h2 { "Child Details" }
        dl {
            class: "child-details",
            dt { "First Name" } dd { "{f.first_name}" }
            dt { "Last Name" } dd { "{f.last_name}" }
            dt { "Gender" } dd { "{f.gender}" }
            dt { "Mother's Name" } dd { "{f.mother_name}" }
            dt { "Father's Name" } dd { "{f.father_name}" }
            dt { "Weight (kg)" } dd { "{f.weight}" }
            dt { "Birth Date" } dd { "{f.birth_date}" }
            dt { "Birth Place" } dd { "{f.birth_place}" }
        }
        button {
            onclick: move |_| registry.write().back_to_list(),
            "Back to List"
        }
    }
}
