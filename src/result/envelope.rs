// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The result envelope: every response this service writes.
//!
//! An envelope is built once, serialized once, and discarded. The wire
//! representation is sparse JSON — absent fields are omitted entirely, and
//! an envelope that carries nothing but a status produces an empty body
//! rather than `{}`. The `status` field never appears in the body; it only
//! selects the HTTP status line.
//!
//! ## Wire shape
//!
//! ```json
//! {
//!   "code": "40100",
//!   "message": "Unauthorized",
//!   "data": { },
//!   "datetime": "2020-06-08T10:00:00.000Z"
//! }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::code::ResultCode;

/// Wire format for the `datetime` field: ISO-8601 with millisecond
/// precision and a literal `Z`. The value is a true UTC instant.
const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

fn serialize_datetime<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.serialize_str(&dt.format(WIRE_DATETIME_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

/// A normalized API response: optional code/message/payload/timestamp plus
/// a mandatory HTTP status.
///
/// Construct via [`ResultEnvelope::builder`] or one of the named
/// constructors below; the value is immutable once built.
#[derive(Debug, Serialize)]
pub struct ResultEnvelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip)]
    status: StatusCode,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_datetime"
    )]
    datetime: Option<DateTime<Utc>>,
}

/// Accumulates envelope fields; terminated by [`Builder::data`] or
/// [`Builder::build`].
#[derive(Debug)]
pub struct Builder {
    code: Option<&'static str>,
    message: Option<String>,
    status: StatusCode,
    datetime: Option<DateTime<Utc>>,
}

impl Builder {
    pub fn code(mut self, code: &'static str) -> Self {
        self.code = Some(code);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn datetime(mut self, datetime: DateTime<Utc>) -> Self {
        self.datetime = Some(datetime);
        self
    }

    /// Finish the envelope with a typed payload.
    pub fn data<T>(self, data: T) -> ResultEnvelope<T> {
        ResultEnvelope {
            code: self.code,
            message: self.message,
            data: Some(data),
            status: self.status,
            datetime: self.datetime,
        }
    }

    /// Finish the envelope without a payload.
    pub fn build(self) -> ResultEnvelope<()> {
        ResultEnvelope {
            code: self.code,
            message: self.message,
            data: None,
            status: self.status,
            datetime: self.datetime,
        }
    }
}

impl ResultEnvelope<()> {
    /// Start an empty builder. Status defaults to 200 until set.
    pub fn builder() -> Builder {
        Builder {
            code: None,
            message: None,
            status: StatusCode::OK,
            datetime: None,
        }
    }

    /// 200 with an empty body.
    pub fn ok() -> ResultEnvelope<()> {
        Self::builder().status(StatusCode::OK).build()
    }

    /// 201 with an empty body.
    pub fn created() -> ResultEnvelope<()> {
        Self::builder().status(StatusCode::CREATED).build()
    }

    /// 201 carrying a catalog entry's code and message.
    pub fn created_from(code: ResultCode) -> ResultEnvelope<()> {
        Self::builder()
            .status(StatusCode::CREATED)
            .code(code.value())
            .message(code.message())
            .build()
    }

    /// 204 with an empty body.
    pub fn no_content() -> ResultEnvelope<()> {
        Self::builder().status(StatusCode::NO_CONTENT).build()
    }

    /// Envelope populated entirely from a catalog entry, timestamped.
    pub fn from_code(code: ResultCode) -> ResultEnvelope<()> {
        Self::builder()
            .status(code.status())
            .code(code.value())
            .message(code.message())
            .datetime(Utc::now())
            .build()
    }

    /// Generic failure: the ERROR catalog entry throughout.
    pub fn error() -> ResultEnvelope<()> {
        Self::from_code(ResultCode::Error)
    }

    /// Failure with a caller-chosen status and message; the code stays
    /// ERROR's.
    pub fn error_with(status: StatusCode, message: impl Into<String>) -> ResultEnvelope<()> {
        Self::builder()
            .status(status)
            .code(ResultCode::Error.value())
            .message(message)
            .datetime(Utc::now())
            .build()
    }

    /// 404 carrying the given catalog entry, timestamped.
    pub fn not_found(code: ResultCode) -> ResultEnvelope<()> {
        Self::builder()
            .status(StatusCode::NOT_FOUND)
            .code(code.value())
            .message(code.message())
            .datetime(Utc::now())
            .build()
    }

    /// 400 carrying the given catalog entry.
    pub fn bad_request(code: ResultCode) -> ResultEnvelope<()> {
        Self::builder()
            .status(StatusCode::BAD_REQUEST)
            .code(code.value())
            .message(code.message())
            .build()
    }

    /// 401 carrying the given catalog entry, timestamped.
    pub fn unauthorized(code: ResultCode) -> ResultEnvelope<()> {
        Self::builder()
            .status(StatusCode::UNAUTHORIZED)
            .code(code.value())
            .message(code.message())
            .datetime(Utc::now())
            .build()
    }

    /// 401 with a custom message under ERROR's code, timestamped.
    pub fn unauthorized_with(message: impl Into<String>) -> ResultEnvelope<()> {
        Self::builder()
            .status(StatusCode::UNAUTHORIZED)
            .code(ResultCode::Error.value())
            .message(message)
            .datetime(Utc::now())
            .build()
    }

    /// 403 carrying the given catalog entry, timestamped.
    pub fn forbidden(code: ResultCode) -> ResultEnvelope<()> {
        Self::builder()
            .status(StatusCode::FORBIDDEN)
            .code(code.value())
            .message(code.message())
            .datetime(Utc::now())
            .build()
    }

    /// 500 with the INTERNAL_SERVER_ERROR catalog entry, timestamped.
    pub fn internal_server_error() -> ResultEnvelope<()> {
        Self::from_code(ResultCode::InternalServerError)
    }

    /// 500 carrying the given catalog entry, timestamped.
    pub fn internal_server_error_from(code: ResultCode) -> ResultEnvelope<()> {
        Self::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .code(code.value())
            .message(code.message())
            .datetime(Utc::now())
            .build()
    }
}

impl<T> ResultEnvelope<T> {
    /// 200 with a payload, timestamped.
    pub fn ok_with(data: T) -> ResultEnvelope<T> {
        ResultEnvelope::builder()
            .status(StatusCode::OK)
            .datetime(Utc::now())
            .data(data)
    }

    /// 201 with a payload.
    pub fn created_with(data: T) -> ResultEnvelope<T> {
        ResultEnvelope::builder().status(StatusCode::CREATED).data(data)
    }

    pub fn code(&self) -> Option<&'static str> {
        self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        self.datetime
    }
}

impl<T: Serialize> IntoResponse for ResultEnvelope<T> {
    fn into_response(self) -> Response {
        // Status-only envelopes write no body at all.
        if self.code.is_none() && self.message.is_none() && self.data.is_none() {
            return self.status.into_response();
        }
        (self.status, Json(self)).into_response()
    }
}
