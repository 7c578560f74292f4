//! Repositories over the content tables.

pub mod block;
pub mod category;
pub mod locale;
pub mod page;
pub mod picture;
pub mod tag;

pub use block::{BlockDescriptor, BlockRepository};
pub use category::CategoryRepository;
pub use locale::{LocaleDescriptor, LocaleRepository};
pub use page::PageRepository;
pub use picture::{PictureDescriptor, PictureRepository};
pub use tag::TagRepository;
