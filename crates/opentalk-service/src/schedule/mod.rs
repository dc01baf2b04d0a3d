//! Event list assembly.

mod instances;
mod order;

pub use instances::{
    append_recurrence_instances, append_recurrence_instances_at, build_schedule,
    retain_invite_status,
};
pub use order::order_by_date;
