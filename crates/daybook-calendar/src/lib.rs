//! Calendar dates, closed date ranges and day-granularity set algebra over
//! collections of ranges.
//!
//! ```
//! use daybook_calendar::{Date, Range, RangeSet};
//!
//! let booked = RangeSet::from(vec![Range::new(
//!     Date::new(2018, 7, 1),
//!     Date::new(2018, 7, 31),
//! )]);
//! let free = booked.sub(&[Range::new(Date::new(2018, 7, 10), Date::new(2018, 7, 20))]);
//!
//! assert_eq!(free.len(), 2);
//! ```

pub mod date;
pub mod error;
pub mod range;
pub mod reconstruct;
pub mod set;

pub use date::Date;
pub use error::{DateError, DateResult};
pub use range::Range;
pub use reconstruct::build_ranges;
pub use set::RangeSet;
