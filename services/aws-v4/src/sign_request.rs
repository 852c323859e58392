// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::canonical::{canonical_headers, canonical_request};
use crate::constants::{AWS4_HMAC_SHA256, UNSIGNED_PAYLOAD, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE};
use crate::presign::presign;
use crate::signing_key::{CredentialScope, SigningKey};
use crate::{AuthParams, Credential};
use http::request::Parts;
use http::{header, HeaderValue};
use log::debug;
use sigv4_core::hash::hex_sha256;
use sigv4_core::time::{format_iso8601, now, DateTime};
use sigv4_core::{Result, SignRequest, SigningMethod, SigningRequest};
use std::fmt::Write;

/// Intermediate values of one signing operation.
///
/// Pass it to [`authenticate_with_trace`] or
/// [`presign_with_trace`](crate::presign_with_trace) to inspect what has been
/// signed. The signed request is the same with or without a trace.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SigningTrace {
    /// The canonical request.
    pub canonical_request: String,
    /// The string to sign.
    pub string_to_sign: String,
    /// The hex encoded signature.
    pub signature: String,
}

/// Build the string to sign.
///
/// ```shell
/// AWS4-HMAC-SHA256
/// 20220313T072004Z
/// 20220313/<region>/<service>/aws4_request
/// <hashed_canonical_request>
/// ```
pub fn string_to_sign(
    time: DateTime,
    scope: &CredentialScope,
    canonical_request: &str,
) -> Result<String> {
    let mut f = String::with_capacity(128);
    writeln!(f, "{AWS4_HMAC_SHA256}")?;
    writeln!(f, "{}", format_iso8601(time))?;
    writeln!(f, "{scope}")?;
    write!(f, "{}", hex_sha256(canonical_request.as_bytes()))?;
    Ok(f)
}

/// Sign the request by adding `x-amz-content-sha256`, `x-amz-date` and
/// `Authorization` headers, in that order.
///
/// With `signed_payload` the SHA256 of `body` is signed, otherwise the
/// payload is `UNSIGNED-PAYLOAD`. No header may be added to the request
/// after it has been signed.
///
/// On error the request is left untouched and must not be sent.
pub fn authenticate(
    req: &mut Parts,
    body: &[u8],
    params: &AuthParams,
    signed_payload: bool,
) -> Result<()> {
    sign_headers(req, body, params, signed_payload, None)
}

/// Same as [`authenticate`], and records the intermediate values into `trace`.
pub fn authenticate_with_trace(
    req: &mut Parts,
    body: &[u8],
    params: &AuthParams,
    signed_payload: bool,
    trace: &mut SigningTrace,
) -> Result<()> {
    sign_headers(req, body, params, signed_payload, Some(trace))
}

fn sign_headers(
    req: &mut Parts,
    body: &[u8],
    params: &AuthParams,
    signed_payload: bool,
    trace: Option<&mut SigningTrace>,
) -> Result<()> {
    let mut signed_req = SigningRequest::build(req)?;

    let payload_hash = if signed_payload {
        hex_sha256(body)
    } else {
        UNSIGNED_PAYLOAD.to_string()
    };
    signed_req
        .headers
        .insert(X_AMZ_CONTENT_SHA_256, HeaderValue::try_from(payload_hash)?);
    signed_req.headers.insert(
        X_AMZ_DATE,
        HeaderValue::try_from(format_iso8601(params.time))?,
    );

    // Both headers must take part in the canonical headers.
    signed_req.header_get(X_AMZ_DATE)?;
    let payload_hash = signed_req.header_get(X_AMZ_CONTENT_SHA_256)?;

    // A previous signature is never part of the signed content, it gets
    // replaced in place below.
    let canonical_headers =
        canonical_headers(&signed_req.headers_without(&header::AUTHORIZATION))?;
    let creq = canonical_request(
        &signed_req.method,
        &signed_req.path,
        &signed_req.query,
        &canonical_headers,
        payload_hash,
    )?;
    debug!("calculated canonical request: {creq}");

    // Scope: "20220313/<region>/<service>/aws4_request"
    let scope = params.scope();
    debug!("calculated scope: {scope}");

    let string_to_sign = string_to_sign(params.time, &scope, &creq)?;
    debug!("calculated string to sign: {string_to_sign}");

    let signing_key = SigningKey::derive(&params.secret_access_key, &scope)?;
    let signature = signing_key.hex_sign(string_to_sign.as_bytes());

    let mut authorization = HeaderValue::try_from(format!(
        "{AWS4_HMAC_SHA256} Credential={}/{scope},SignedHeaders={},Signature={signature}",
        params.access_key_id, canonical_headers.signed_headers,
    ))?;
    authorization.set_sensitive(true);
    signed_req
        .headers
        .insert(header::AUTHORIZATION, authorization);

    if let Some(trace) = trace {
        trace.canonical_request = creq;
        trace.string_to_sign = string_to_sign;
        trace.signature = signature;
    }

    signed_req.apply_headers(req);
    Ok(())
}

/// RequestSigner that implement AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,
    signed_payload: bool,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new builder for AWS V4 signer.
    ///
    /// Payload is not signed by default.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
            signed_payload: false,

            time: None,
        }
    }

    /// Sign the SHA256 of the payload instead of `UNSIGNED-PAYLOAD`.
    ///
    /// Only applies to header signing, presigned requests never sign the payload.
    pub fn with_signed_payload(mut self, signed_payload: bool) -> Self {
        self.signed_payload = signed_payload;
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(
        &self,
        req: &mut Parts,
        body: &[u8],
        credential: &Self::Credential,
        method: SigningMethod,
    ) -> Result<()> {
        let now = self.time.unwrap_or_else(now);
        let params = AuthParams::new(credential, &self.region, &self.service, now);

        match method {
            SigningMethod::Header => authenticate(req, body, &params, self.signed_payload),
            SigningMethod::Query(expires_in) => presign(req, &params, expires_in),
        }
    }
}
