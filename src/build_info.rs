use serde::Serialize;
use tracing::info;

use crate::error::BuildInfoError;

const CI_FLAG: &str = "CI";
const BRANCH: &str = "CI_COMMIT_REF_NAME";
const SHORT_SHA: &str = "CI_COMMIT_SHORT_SHA";
const MESSAGE: &str = "CI_COMMIT_MESSAGE";
const PIPELINE_IID: &str = "CI_PIPELINE_IID";
const PIPELINE_SOURCE: &str = "CI_PIPELINE_SOURCE";
const PIPELINE_URL: &str = "CI_PIPELINE_URL";

/// Provenance stamped onto the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub branch: Option<String>,
    pub commit: Option<String>,
    pub pipeline_url: Option<String>,
    pub timestamp: i64,
}

impl BuildInfo {
    /// Read the process environment, stamped with the current time.
    pub fn from_env() -> Result<Self, BuildInfoError> {
        collect(|key| std::env::var(key).ok(), chrono::Utc::now().timestamp())
    }
}

/// Build provenance from an environment lookup.
///
/// Outside CI every field except `timestamp` is null. On CI every variable
/// is mandatory.
pub fn collect<F>(lookup: F, timestamp: i64) -> Result<BuildInfo, BuildInfoError>
where
    F: Fn(&str) -> Option<String>,
{
    let on_ci = lookup(CI_FLAG).is_some_and(|v| !v.is_empty());
    if !on_ci {
        info!("Building locally.");
        return Ok(BuildInfo {
            branch: None,
            commit: None,
            pipeline_url: None,
            timestamp,
        });
    }

    info!("Building on CI");
    let require = |key: &'static str| lookup(key).ok_or(BuildInfoError::MissingEnv(key));

    let commit = format!(
        "{} ({}), build #{}, reason: {}",
        require(SHORT_SHA)?,
        require(MESSAGE)?.replace('\n', ""),
        require(PIPELINE_IID)?,
        require(PIPELINE_SOURCE)?,
    );

    Ok(BuildInfo {
        branch: Some(require(BRANCH)?),
        commit: Some(commit),
        pipeline_url: Some(require(PIPELINE_URL)?),
        timestamp,
    })
}
