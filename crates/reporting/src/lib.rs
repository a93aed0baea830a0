//! URL preparation for report jobs.
//!
//! - Job descriptor and the pass-through execution context
//! - Absolute URL factory for jobs that only carry a relative URL
//! - Codec for the route nested in a URL fragment
//! - `forceNow` injection so time-relative pages render deterministically

pub mod absolute_url;
pub mod error;
pub mod force_now;
pub mod fragment;
pub mod job;

pub use error::{ReportingError, Result};
pub use force_now::{add_force_now_query_string, with_force_now, FORCE_NOW_PARAM};
pub use fragment::FragmentRoute;
pub use job::{ConditionalHeaders, ExecuteJobContext, ForceNowOutput, HeaderConditions, ReportingJob};
