//! 领域模型定义

mod appointment;
mod catalog;
mod content;
mod customer;
mod enums;
mod loyalty;
mod staff;

pub use appointment::Appointment;
pub use catalog::{ServiceCategory, SpaService};
pub use content::{BlogPost, Faq};
pub use customer::Customer;
pub use enums::{AppointmentStatus, EntryKind, StaffRole};
pub use loyalty::{ConversionPolicy, LedgerEntry, PointBalance};
pub use staff::Staff;
