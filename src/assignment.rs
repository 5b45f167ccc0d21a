pub mod builder;
pub mod records;
pub mod result;

pub use builder::{assign, AssignmentBuilder};
pub use records::{read_subjects, read_teachers, SubjectRecord, SubjectTable, TeacherRecord};
pub use result::{Allocation, Assignment};
