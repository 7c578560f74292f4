//! Business logic services.

pub mod category;
pub mod locale;
pub mod page;
pub mod picture;
pub mod tag;

pub use category::{CategoryService, CreateCategoryInput};
pub use locale::LocaleService;
pub use page::{
    BlockDescriptor, CreatePageInput, LocaleDescriptor, PageService, PictureDescriptor,
    UpdatePageInput,
};
pub use picture::PictureService;
pub use tag::TagService;
