mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod confirm_delete;
pub use confirm_delete::ConfirmDelete;

mod sign_in;
pub use sign_in::SignIn;

mod child_list;
pub use child_list::ChildList;

mod child_form;
pub use child_form::ChildForm;

mod child_details;
pub use child_details::ChildDetails;

mod contact;
pub use contact::ContactUs;

mod shell;
pub use shell::RegistryShell;
