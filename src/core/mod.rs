/// Page slicing shared by the listing endpoints
pub mod pagination;
/// Quiz question selection
pub mod quiz;

pub use pagination::paginate;
pub use quiz::{choose_next_question, CategorySelector};
