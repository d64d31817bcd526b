//! Session state, time, and the services front ends call into.

pub mod clock;
pub mod intro;
pub mod services;
pub mod store;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use intro::IntroState;
pub use store::BudgetStore;
