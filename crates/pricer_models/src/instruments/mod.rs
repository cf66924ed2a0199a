//! Option terms.
//!
//! Only the American vanilla exists: the exercise window opens at the
//! market valuation date and closes at the exercise date.

mod american;

pub use american::AmericanOption;
