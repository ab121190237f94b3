//! Endpoint catalog.
//!
//! [`Client`] wraps a [`Session`] with one method per Bakaláři endpoint. The
//! methods hand back the JSON sub-document the server nests the data under
//! (`Subjects`, `Homeworks`, ...) without reshaping it.

pub mod endpoints;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::auth::{Credentials, Login, Session};
use crate::config::SessionConfig;
use crate::error::{ApiError, Error};
use crate::http::RequestOptions;
use crate::route::{PathParam, Route};
use crate::types::BaseUrl;
use crate::Method;

/// Which events to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventScope {
    /// Every event visible to the user.
    #[default]
    All,
    /// Events the user takes part in.
    My,
    /// Events published school-wide.
    Public,
}

impl EventScope {
    fn segment(self) -> Option<&'static str> {
        match self {
            EventScope::All => None,
            EventScope::My => Some("my"),
            EventScope::Public => Some("public"),
        }
    }
}

/// Which timetable to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimetableKind {
    /// The week as it will actually happen, substitutions included.
    #[default]
    Actual,
    /// The regular timetable.
    Permanent,
}

impl TimetableKind {
    fn segment(self) -> &'static str {
        match self {
            TimetableKind::Actual => "actual",
            TimetableKind::Permanent => "permanent",
        }
    }
}

/// High-level API client.
///
/// Cheap to clone; clones share one [`Session`].
#[derive(Debug, Clone)]
pub struct Client {
    session: Session,
}

impl Client {
    /// Create a client for the server at `base`.
    pub fn new(base: BaseUrl) -> Self {
        Self::from_session(Session::new(base))
    }

    /// Create a client with a custom session configuration.
    pub fn with_config(base: BaseUrl, config: SessionConfig) -> Self {
        Self::from_session(Session::with_config(base, config))
    }

    /// Wrap an existing session.
    pub fn from_session(session: Session) -> Self {
        Self { session }
    }

    /// Returns the underlying session, for raw requests.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Log in; see [`Session::login`].
    pub async fn login(&self, credentials: Credentials, auto_refresh: bool) -> Result<Login, Error> {
        self.session.login(credentials, auto_refresh).await
    }

    /// API version reported at login.
    pub async fn api_version(&self) -> Option<String> {
        self.session.api_version().await
    }

    /// Close the underlying session; see [`Session::close`].
    pub async fn close(&self) {
        self.session.close().await;
    }

    /// Versions of the API the server exposes.
    pub async fn api_versions(&self) -> Result<Value, Error> {
        self.get(endpoints::API, RequestOptions::new()).await
    }

    /// Information about the v3 API.
    pub async fn api_v3(&self) -> Result<Value, Error> {
        self.get(endpoints::API_V3, RequestOptions::new()).await
    }

    /// The logged-in user.
    pub async fn user(&self) -> Result<Value, Error> {
        self.get(endpoints::USER, RequestOptions::new()).await
    }

    /// The user's subjects.
    pub async fn subjects(&self) -> Result<Value, Error> {
        let data = self.get(endpoints::SUBJECTS, RequestOptions::new()).await?;
        take_field(data, "Subjects")
    }

    /// Themes taught in one subject.
    #[instrument(skip(self))]
    pub async fn themes(&self, subject_id: &str) -> Result<Value, Error> {
        let route = Route::with_params(
            self.session.base_url(),
            Method::GET,
            endpoints::SUBJECT_THEMES,
            [("subject_id", PathParam::from(subject_id))],
        )?;
        let data = self.session.request_json(&route, RequestOptions::new()).await?;
        take_field(data, "Themes")
    }

    /// Absence summary.
    pub async fn absence(&self) -> Result<Value, Error> {
        self.get(endpoints::ABSENCE, RequestOptions::new()).await
    }

    /// Events in the given scope, optionally bounded by date.
    #[instrument(skip(self))]
    pub async fn events(
        &self,
        scope: EventScope,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Value, Error> {
        let base = self.session.base_url();
        let route = match scope.segment() {
            Some(segment) => Route::with_params(
                base,
                Method::GET,
                endpoints::EVENTS_SCOPED,
                [("scope", PathParam::from(segment))],
            )?,
            None => Route::new(base, Method::GET, endpoints::EVENTS)?,
        };
        let data = self
            .session
            .request_json(&route, date_range(since, until))
            .await?;
        take_field(data, "Events")
    }

    /// GDPR commissioners of the school.
    pub async fn gdpr_commissioners(&self) -> Result<Value, Error> {
        let data = self
            .get(endpoints::GDPR_COMMISSIONERS, RequestOptions::new())
            .await?;
        take_field(data, "Commissioners")
    }

    /// Homework, optionally bounded by date.
    pub async fn homework(
        &self,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Value, Error> {
        let data = self
            .get(endpoints::HOMEWORKS, date_range(since, until))
            .await?;
        take_field(data, "Homeworks")
    }

    /// Number of homework not yet done.
    pub async fn homework_count_actual(&self) -> Result<u64, Error> {
        let data = self
            .get(endpoints::HOMEWORK_COUNT_ACTUAL, RequestOptions::new())
            .await?;
        as_count(&data)
    }

    /// Mark a homework as done or not done.
    #[instrument(skip(self))]
    pub async fn set_homework_done(&self, homework_id: &str, done: bool) -> Result<(), Error> {
        let route = Route::with_params(
            self.session.base_url(),
            Method::PUT,
            endpoints::HOMEWORK_DONE,
            [
                ("homework_id", PathParam::from(homework_id)),
                ("done", PathParam::from(done)),
            ],
        )?;
        // The body is empty or a bare acknowledgement
        self.session.request_raw(&route, RequestOptions::new()).await?;
        Ok(())
    }

    /// Marks grouped by subject.
    pub async fn marks(&self) -> Result<Value, Error> {
        let data = self.get(endpoints::MARKS, RequestOptions::new()).await?;
        take_field(data, "Subjects")
    }

    /// Final (certificate) marks per term.
    pub async fn marks_final(&self) -> Result<Value, Error> {
        let data = self.get(endpoints::MARKS_FINAL, RequestOptions::new()).await?;
        take_field(data, "CertificateTerms")
    }

    /// Pedagogical measures given to the user.
    pub async fn marks_measures(&self) -> Result<Value, Error> {
        let data = self
            .get(endpoints::MARKS_MEASURES, RequestOptions::new())
            .await?;
        take_field(data, "PedagogicalMeasures")
    }

    /// Number of marks the user has not seen yet.
    pub async fn marks_count_new(&self) -> Result<u64, Error> {
        let data = self
            .get(endpoints::MARKS_COUNT_NEW, RequestOptions::new())
            .await?;
        as_count(&data)
    }

    /// Timetable changes, optionally bounded by date.
    pub async fn substitutions(
        &self,
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Value, Error> {
        let data = self
            .get(endpoints::SUBSTITUTIONS, date_range(since, until))
            .await?;
        take_field(data, "Changes")
    }

    /// Timetable of the given kind; `date` selects the week.
    #[instrument(skip(self))]
    pub async fn timetable(
        &self,
        kind: TimetableKind,
        date: Option<NaiveDate>,
    ) -> Result<Value, Error> {
        let route = Route::with_params(
            self.session.base_url(),
            Method::GET,
            endpoints::TIMETABLE,
            [("kind", PathParam::from(kind.segment()))],
        )?;
        let options = RequestOptions::new().query_opt("date", date.map(format_date));
        self.session.request_json(&route, options).await
    }

    /// Messages received through Komens.
    pub async fn received_messages(&self) -> Result<Value, Error> {
        let data = self
            .post(endpoints::MESSAGES_RECEIVED, RequestOptions::new())
            .await?;
        take_field(data, "Messages")
    }

    /// Messages pinned to the noticeboard.
    pub async fn noticeboard(&self) -> Result<Value, Error> {
        let data = self
            .post(endpoints::MESSAGES_NOTICEBOARD, RequestOptions::new())
            .await?;
        take_field(data, "Messages")
    }

    /// Download a message attachment.
    #[instrument(skip(self))]
    pub async fn attachment(&self, attachment_id: &str) -> Result<Vec<u8>, Error> {
        let route = Route::with_params(
            self.session.base_url(),
            Method::GET,
            endpoints::ATTACHMENT,
            [("attachment_id", PathParam::from(attachment_id))],
        )?;
        let bytes = self.session.request_raw(&route, RequestOptions::new()).await?;
        debug!(size = bytes.len(), "Attachment downloaded");
        Ok(bytes)
    }

    async fn get(&self, path: &str, options: RequestOptions) -> Result<Value, Error> {
        let route = Route::new(self.session.base_url(), Method::GET, path)?;
        self.session.request_json(&route, options).await
    }

    async fn post(&self, path: &str, options: RequestOptions) -> Result<Value, Error> {
        let route = Route::new(self.session.base_url(), Method::POST, path)?;
        self.session.request_json(&route, options).await
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `from` / `to` query parameters.
fn date_range(since: Option<NaiveDate>, until: Option<NaiveDate>) -> RequestOptions {
    RequestOptions::new()
        .query_opt("from", since.map(format_date))
        .query_opt("to", until.map(format_date))
}

/// Extract the named member of a response object.
fn take_field(mut data: Value, field: &str) -> Result<Value, Error> {
    match data.get_mut(field) {
        Some(value) => Ok(value.take()),
        None => Err(ApiError::invalid_response(format!("response is missing '{field}'")).into()),
    }
}

fn as_count(data: &Value) -> Result<u64, Error> {
    data.as_u64().ok_or_else(|| {
        ApiError::invalid_response(format!("expected a non-negative integer, got {data}")).into()
    })
}
