//! Aggregation Module
//!
//! Turns token streams into top-K frequency tables and amendment histories
//! into per-year churn maps.

mod churn;
mod frequency;

pub use churn::churn_by_year;
pub use frequency::{default_stopwords, top_words, FrequencyConfig, FrequencyCounter, STOPWORDS};
