//! Student Roster - student records with grade statistics
//!
//! Core modules:
//! - `record`: Student record, averages and letter grades
//! - `roster`: Keyed collection with CRUD, ranking and filtering
//! - `store`: JSON backing store (load/save)
//! - `report`: Class-wide statistics and formatted report
//! - `settings`: Store location and ranking sizes

pub mod record;
pub mod report;
pub mod roster;
pub mod settings;
pub mod store;

pub use record::{LetterGrade, StudentRecord};
pub use report::{ClassReport, GradeDistribution, generate_report};
pub use roster::Roster;
pub use settings::Settings;
pub use store::{StoreError, StoreResult};
