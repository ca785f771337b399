pub mod contact;
pub mod gallery;
pub mod recipients;

pub use contact::ContactRepository;
pub use gallery::GalleryRepository;
pub use recipients::EmailRecipientRepository;
