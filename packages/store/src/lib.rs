pub mod backend;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;

mod memory;
pub use memory::{MemoryBackend, MemoryIdentity};

pub use backend::{IdentityClient, LoginConfig, LoginOutcome, RecordBackend};
pub use config::RegistryConfig;
pub use error::{BackendError, FormError, IdentityError};
pub use forms::{ChildField, ChildForm, ContactForm};
pub use models::{BirthPlace, ChildFields, ChildId, ChildRecord, Gender, Principal};
