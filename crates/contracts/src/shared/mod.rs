pub mod metadata;
pub mod paging;
