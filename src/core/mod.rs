//! Core abstractions for quickdue.
//!
//! Date arithmetic, deadline assembly and traits shared across features.

mod datetime;
mod deadline;
mod traits;

pub use datetime::{
    add_days, combine, days_until_weekday, format_date, format_datetime, format_time, local_now,
    midnight, parse_date_arg, parse_datetime_arg, parse_time_arg, weekday_from_name,
};
pub use deadline::{assemble_deadline, Schedule};
pub use traits::Schedulable;
