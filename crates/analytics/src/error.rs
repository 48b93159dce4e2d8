use crate::report::{Cohort, CorrelationPair};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: no daily records were supplied")]
    EmptyInput,

    #[error("Average sales for {0} days is undefined: no day falls into that cohort")]
    EmptyCohort(Cohort),

    #[error("Correlation {0} is undefined: at least one series has zero variance")]
    DegenerateSeries(CorrelationPair),

    #[error("More than one daily record for {0}")]
    DuplicateDate(NaiveDate),
}
