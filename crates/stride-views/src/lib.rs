//! Derived state for the dashboard's listing views.
//!
//! None of this touches the session. These are the small computations the
//! athlete, plan, event and assessment listings run over data fetched from
//! the backend: paging and search, BMI banding, and "how far away is this
//! date" labels.

mod calendar;
mod health;
mod paging;

pub use calendar::{Countdown, PlanRemaining, RaceDistance, Urgency, days_until, parse_api_date};
pub use health::ImcBand;
pub use paging::{Page, filter_by_query};
