pub mod book;
pub mod marks;
pub mod records;

pub use book::MarkBook;
pub use marks::MarkEntry;
pub use records::{Event, MarkRecord, Snapshot, Student, TeamLabel};
