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

use crate::canonical::{canonical_headers, canonical_query_string, canonical_request};
use crate::constants::*;
use crate::sign_request::{string_to_sign, SigningTrace};
use crate::signing_key::SigningKey;
use crate::AuthParams;
use http::request::Parts;
use http::{header, HeaderValue};
use log::debug;
use sigv4_core::time::format_iso8601;
use sigv4_core::{Error, Result, SigningRequest};
use std::time::Duration;

/// Presign the request so that it can be sent without any extra header
/// within `expires_in`.
///
/// The signature goes into the query: `X-Amz-Algorithm`, `X-Amz-Credential`,
/// `X-Amz-Date`, `X-Amz-Expires`, `X-Amz-SignedHeaders` and finally
/// `X-Amz-Signature` are added to the uri. Headers of the request are left
/// as is. The payload is always `UNSIGNED-PAYLOAD`.
///
/// `expires_in` must be between 1 second and 7 days.
pub fn presign(req: &mut Parts, params: &AuthParams, expires_in: Duration) -> Result<()> {
    presign_query(req, params, expires_in, None)
}

/// Same as [`presign`], and records the intermediate values into `trace`.
pub fn presign_with_trace(
    req: &mut Parts,
    params: &AuthParams,
    expires_in: Duration,
    trace: &mut SigningTrace,
) -> Result<()> {
    presign_query(req, params, expires_in, Some(trace))
}

fn presign_query(
    req: &mut Parts,
    params: &AuthParams,
    expires_in: Duration,
    trace: Option<&mut SigningTrace>,
) -> Result<()> {
    let expires = expires_in.as_secs();
    if expires == 0 || expires > MAX_PRESIGN_EXPIRES_SECS {
        return Err(Error::request_invalid(format!(
            "presigned request must expire in 1 to {MAX_PRESIGN_EXPIRES_SECS} seconds, got {expires}"
        )));
    }

    let mut signed_req = SigningRequest::build(req)?;
    let mut headers = signed_req.headers_without(&header::AUTHORIZATION);

    // Host is signed even if the transport only adds it later.
    if headers.get(header::HOST).is_none() {
        let authority = signed_req.authority.as_ref().ok_or_else(|| {
            Error::request_invalid("request without authority is invalid for presigning")
        })?;
        headers.insert(header::HOST, HeaderValue::from_str(authority.as_str())?);
    }

    let scope = params.scope();
    debug!("calculated scope: {scope}");

    let canonical_headers = canonical_headers(&headers)?;
    signed_req
        .query
        .push((X_AMZ_ALGORITHM.into(), AWS4_HMAC_SHA256.into()));
    signed_req.query.push((
        X_AMZ_CREDENTIAL.into(),
        format!("{}/{scope}", params.access_key_id),
    ));
    signed_req
        .query
        .push((X_AMZ_DATE_QUERY.into(), format_iso8601(params.time)));
    signed_req
        .query
        .push((X_AMZ_EXPIRES.into(), expires.to_string()));
    signed_req.query.push((
        X_AMZ_SIGNED_HEADERS.into(),
        canonical_headers.signed_headers.clone(),
    ));

    let creq = canonical_request(
        &signed_req.method,
        &signed_req.path,
        &signed_req.query,
        &canonical_headers,
        UNSIGNED_PAYLOAD,
    )?;
    debug!("calculated canonical request: {creq}");

    let string_to_sign = string_to_sign(params.time, &scope, &creq)?;
    debug!("calculated string to sign: {string_to_sign}");

    let signing_key = SigningKey::derive(&params.secret_access_key, &scope)?;
    let signature = signing_key.hex_sign(string_to_sign.as_bytes());

    let query = format!(
        "{}&{X_AMZ_SIGNATURE}={signature}",
        canonical_query_string(&signed_req.query)
    );

    if let Some(trace) = trace {
        trace.canonical_request = creq;
        trace.string_to_sign = string_to_sign;
        trace.signature = signature;
    }

    signed_req.apply_query(req, &query)
}
