use crate::credential::{Credential, CredentialError};
use loadcheck::http::RequestDescriptor;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Base URL `{0}` cannot carry a path")]
    CannotBeABase(String),

    #[error("Project id is empty")]
    EmptyProjectId,

    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// The endpoint being exercised: one project's ask route with a fixed question.
#[derive(Clone, Debug)]
pub struct AskTarget {
    base_url: Url,
    project_id: String,
    question: String,
    credential: Credential,
}

impl AskTarget {
    pub fn new(
        base_url: &str,
        project_id: &str,
        question: &str,
        credential: Credential,
    ) -> Result<Self, TargetError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(TargetError::CannotBeABase(base_url.to_string()));
        }

        if project_id.trim().is_empty() {
            return Err(TargetError::EmptyProjectId);
        }

        let target = Self {
            base_url,
            project_id: project_id.trim().to_string(),
            question: question.to_string(),
            credential,
        };
        target.request()?;
        Ok(target)
    }

    /// `<base>/api/ai/projects/<project-id>/ask/?q=<question>`
    pub fn url(&self) -> Result<Url, TargetError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        url.path_segments_mut()
            .map_err(|_| TargetError::CannotBeABase(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "ai", "projects", self.project_id.as_str(), "ask", ""]);
        url.query_pairs_mut().append_pair("q", &self.question);

        Ok(url)
    }

    /// Build the request sent on every iteration.
    pub fn request(&self) -> Result<RequestDescriptor, TargetError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            self.credential
                .authorization()
                .map_err(CredentialError::from)?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(RequestDescriptor {
            url: self.url()?,
            headers,
        })
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}
