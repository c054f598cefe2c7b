//! HTTP [`Backend`] implementation.

use std::time::Duration;

use common::operations::{By, Perform, Select};
use derive_more::{Display, Error as StdError};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        payment::{self, Period},
        screening::{Email, Screening},
    },
    infra::backend::{self, Authorized, Backend},
};

/// Path of the applicant screening endpoint.
const SCREEN_APPLICANT: &str = "api/tenants/screen-applicant";

/// Path of the bulk rent payments generation endpoint.
const GENERATE_PAYMENTS: &str = "api/payments/generate";

/// REST API [`Backend`] client.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP [`Client`].
    client: Client,

    /// Base [`Url`] every endpoint is resolved against.
    base_url: Url,
}

impl Http {
    /// Creates a new [`Http`] client of the API served at the provided
    /// `base_url`, failing requests taking longer than `timeout`.
    ///
    /// # Errors
    ///
    /// If the `base_url` is not a valid absolute URL, or the HTTP [`Client`]
    /// cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, Traced<backend::Error>> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| {
                tracerr::new!(Error::InvalidUrl(format!("`{base_url}`: {e}")))
            })
            .map_err(tracerr::map_from)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| tracerr::new!(Error::Request(e)))
            .map_err(tracerr::map_from)?;

        Ok(Self { client, base_url })
    }

    /// Returns the base [`Url`] of this [`Http`] client.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Starts an authorized `POST` request to the provided `path`.
    fn post(
        &self,
        path: &str,
        credential: &backend::Credential,
    ) -> Result<RequestBuilder, Traced<Error>> {
        let url = self.base_url.join(path).map_err(|e| {
            tracerr::new!(Error::InvalidUrl(format!("`{path}`: {e}")))
        })?;
        Ok(self.client.post(url).bearer_auth(credential.expose()))
    }
}

/// Response envelope of the API.
#[derive(Clone, Debug, Deserialize)]
struct Envelope<T> {
    /// Payload of the response.
    data: T,
}

/// Body of an applicant screening request.
#[derive(Clone, Copy, Debug, Serialize)]
struct ScreenApplicantRequest<'a> {
    /// Email of the screened applicant.
    email: &'a str,
}

/// Body of a bulk rent payments generation request.
#[derive(Clone, Copy, Debug, Serialize)]
struct GeneratePaymentsRequest {
    /// Month to generate payments for.
    month: u8,

    /// Year to generate payments for.
    year: i32,
}

impl Backend<Authorized<Select<By<Screening, Email>>>> for Http {
    type Ok = Screening;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        op: Authorized<Select<By<Screening, Email>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Authorized {
            credential,
            operation: Select(by),
        } = op;
        let email = by.into_inner();

        log::debug!("screening applicant `{email}`");

        let req = self
            .post(SCREEN_APPLICANT, &credential)
            .map_err(tracerr::map_from_and_wrap!())?
            .json(&ScreenApplicantRequest {
                email: email.as_ref(),
            });
        send(req).await.map_err(tracerr::map_from_and_wrap!())
    }
}

impl Backend<Authorized<Perform<By<payment::Generation, Period>>>> for Http {
    type Ok = payment::Generation;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        op: Authorized<Perform<By<payment::Generation, Period>>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Authorized {
            credential,
            operation: Perform(by),
        } = op;
        let period = by.into_inner();

        log::debug!("generating rent payments for {period}");

        let req = self
            .post(GENERATE_PAYMENTS, &credential)
            .map_err(tracerr::map_from_and_wrap!())?
            .json(&GeneratePaymentsRequest {
                month: period.month.into(),
                year: period.year,
            });
        send(req).await.map_err(tracerr::map_from_and_wrap!())
    }
}

/// Sends the provided request and decodes the [`Envelope`]d payload of its
/// successful response.
async fn send<T: DeserializeOwned>(
    req: RequestBuilder,
) -> Result<T, Traced<Error>> {
    let resp = req
        .send()
        .await
        .map_err(|e| tracerr::new!(Error::Request(e)))?;
    let resp = check_response(resp).await.map_err(tracerr::wrap!())?;
    resp.json::<Envelope<T>>()
        .await
        .map(|env| env.data)
        .map_err(|e| tracerr::new!(Error::Decode(e)))
}

/// Checks the provided [`Response`] for a non-success status.
///
/// # Errors
///
/// [`Error::Status`] with the status code and the response body, if the
/// status is not a success one.
async fn check_response(resp: Response) -> Result<Response, Error> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp.text().await.unwrap_or_default();
        log::warn!("API responded with `{status}`: {message}");
        return Err(Error::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp)
}

/// [`Http`] backend error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Invalid URL of an endpoint.
    #[display("Invalid URL {_0}")]
    InvalidUrl(#[error(not(source))] String),

    /// Request failed to be performed.
    #[display("Request failed: {_0}")]
    Request(reqwest::Error),

    /// API responded with a non-success status.
    #[display("API responded with `{status}` status: {message}")]
    Status {
        /// HTTP status code of the response.
        status: u16,

        /// Body of the response.
        #[error(not(source))]
        message: String,
    },

    /// Response payload failed to be decoded.
    #[display("Failed to decode response: {_0}")]
    Decode(reqwest::Error),
}

impl Error {
    /// Indicates whether this [`Error`] is caused by a rejected credential.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use serde_json::json;

    use crate::domain::{payment, screening::Recommendation, Screening};

    use super::{check_response, Envelope, Error, Http};

    fn response(status: u16, body: impl Into<String>) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
    }

    #[test]
    fn resolves_endpoints_against_base_path() {
        let http = Http::new("http://localhost:5000/v2", Duration::from_secs(5))
            .unwrap();
        assert_eq!(http.base_url().as_str(), "http://localhost:5000/v2/");
        assert_eq!(
            http.base_url().join(super::SCREEN_APPLICANT).unwrap().as_str(),
            "http://localhost:5000/v2/api/tenants/screen-applicant",
        );

        assert!(Http::new("not a url", Duration::from_secs(5)).is_err());
    }

    #[tokio::test]
    async fn reports_non_success_status() {
        let err = check_response(response(401, "token expired"))
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(matches!(
            err,
            Error::Status { status: 401, ref message } if message == "token expired",
        ));
        assert!(check_response(response(201, "{}")).await.is_ok());
    }

    #[tokio::test]
    async fn decodes_enveloped_payload() {
        let body = json!({"data": {
            "isBlacklisted": false,
            "recommendation": "review",
            "recommendationReason": "Thin credit file",
        }});
        let env: Envelope<Screening> =
            response(200, body.to_string()).json().await.unwrap();
        assert_eq!(env.data.recommendation, Recommendation::Review);

        let env: Envelope<payment::Generation> =
            response(200, r#"{"data": {"generated": 12}}"#)
                .json()
                .await
                .unwrap();
        assert_eq!(env.data.generated, 12);
    }
}
