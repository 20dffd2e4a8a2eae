pub mod lead;
pub mod row;

pub use lead::{Lead, LeadFormData, LeadPatch, LeadStatus, Priority, Task};
