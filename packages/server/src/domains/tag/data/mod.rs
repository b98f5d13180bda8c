pub mod tag;

pub use tag::TagData;
