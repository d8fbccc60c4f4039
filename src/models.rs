mod field;
mod header;
mod ids;
mod note;
mod suggestion;

pub use field::{FieldValue, HeaderField, keys};
pub use header::Header;
pub use ids::NoteId;
pub use note::{Note, NoteBuilder};
pub use suggestion::Suggestion;
