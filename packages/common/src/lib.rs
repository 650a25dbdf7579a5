pub mod extract;
pub mod names;
pub mod scan;
pub mod tags;

pub use extract::extract_surnames;
pub use names::{NameList, extract_group_surnames, normalize_doctor_name};
pub use scan::{TagVocabulary, scan_text};
pub use tags::TagList;
