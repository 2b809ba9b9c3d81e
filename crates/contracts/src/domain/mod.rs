pub mod a001_mosque;
pub mod a002_charity;
pub mod a003_student;
pub mod a004_file;
pub mod common;
