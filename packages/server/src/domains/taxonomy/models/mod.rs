pub mod category;
pub mod country;
pub mod language;

pub use category::{Category, CategoryWithCount};
pub use country::Country;
pub use language::Language;
