pub mod context;
pub mod memory;
pub mod ports;
pub mod postgres;
pub mod seed;

pub use context::DatabaseContext;
pub use memory::InMemoryDatabase;
pub use ports::{ContactRepository, EmailRecipientRepository, GalleryRepository};
pub use postgres::PostgresDatabase;
