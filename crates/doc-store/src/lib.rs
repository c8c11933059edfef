pub mod batch;
pub mod document;
pub mod error;
pub mod memory;
pub mod path;
pub mod store;
pub mod subscribe;

pub use batch::{WriteBatch, WriteOp};
pub use document::Document;
pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use path::{CollectionPath, DocumentPath, Scope};
pub use store::{DocumentStore, DocumentStoreExt};
pub use subscribe::{CollectionSnapshot, Subscription, SubscriptionUpdate, TransportError};
