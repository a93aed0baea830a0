//! Pin the rendered page's "now" by injecting `forceNow` into report URLs.
//!
//! Time-relative visualizations read `forceNow` from the query string of the
//! route nested in the URL fragment. Rewriting happens in two layers: the
//! outer URL is parsed with `url`, its fragment with [`FragmentRoute`].

use tracing::debug;
use url::Url;

use vizkit_core::config::ServerConfig;

use crate::absolute_url::AbsoluteUrlFactory;
use crate::error::{ReportingError, Result};
use crate::fragment::FragmentRoute;
use crate::job::{ExecuteJobContext, ForceNowOutput, ReportingJob};

/// Query parameter the rendered page reads.
pub const FORCE_NOW_PARAM: &str = "forceNow";

/// Resolve the job's URLs and pin "now" on each of them.
///
/// A job with only `relative_url` gets that URL resolved against its base
/// path and the server, and stored back as the job's single URL, before any
/// rewriting. Every other part of the context is passed through untouched.
pub async fn add_force_now_query_string(ctx: ExecuteJobContext<'_>) -> Result<ForceNowOutput<'_>> {
    let ExecuteJobContext {
        mut job,
        conditional_headers,
        logo,
        server,
    } = ctx;

    let job_urls = resolve_job_urls(&job, server)?;
    job.urls = Some(job_urls.clone());

    let urls = match job.force_now() {
        Some(force_now) => job_urls
            .iter()
            .map(|u| with_force_now(u, force_now))
            .collect::<Result<Vec<_>>>()?,
        None => job_urls,
    };

    Ok(ForceNowOutput {
        job,
        conditional_headers,
        logo,
        urls,
        server,
    })
}

/// The absolute URLs a job captures.
pub fn resolve_job_urls(job: &ReportingJob, server: &ServerConfig) -> Result<Vec<String>> {
    if let Some(urls) = &job.urls {
        return Ok(urls.clone());
    }

    let relative = job.relative_url.as_deref().ok_or(ReportingError::UrlNotDefined)?;
    let absolute = AbsoluteUrlFactory::new(server).resolve(job.base_path.as_deref(), relative)?;
    debug!(relative_url = relative, url = %absolute, "resolved relative report url");
    Ok(vec![absolute])
}

/// `url` with `forceNow=<force_now>` set in its fragment route. Everything
/// before the first `#` is kept byte for byte; `url` only validates the input.
/// A URL without a fragment gets one holding just the parameter.
pub fn with_force_now(url: &str, force_now: &str) -> Result<String> {
    Url::parse(url).map_err(|source| ReportingError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let (head, fragment) = url.split_once('#').unwrap_or((url, ""));
    let mut route = FragmentRoute::parse(fragment);
    route.set(FORCE_NOW_PARAM, force_now);
    let rewritten = format!("{}#{}", head, route.format());

    debug!(url, rewritten = %rewritten, "pinned report time");
    Ok(rewritten)
}
