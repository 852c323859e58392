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

//! Canonicalization of requests.
//!
//! Every function here is a pure function of its input: the same request
//! always canonicalizes to the same bytes.

use crate::uri::uri_encode;
use http::HeaderMap;
use http::Method;
use percent_encoding::percent_decode_str;
use sigv4_core::{Error, Result};
use std::fmt::Write;

/// Build the canonical query string from decoded query pairs.
///
/// Every key and value is percent-encoded (with `/` encoded too), joined as
/// `key=value`, sorted by the bytes of that joined form and then joined with
/// `&`. Duplicated keys are kept, and a key without value still gets a `=`.
///
/// ```shell
/// [(prefix, J), (max-keys, 2), (lifecycle, )] => "lifecycle=&max-keys=2&prefix=J"
/// ```
pub fn canonical_query_string(query: &[(String, String)]) -> String {
    if query.is_empty() {
        return String::new();
    }

    let mut pairs = query
        .iter()
        .map(|(k, v)| format!("{}={}", uri_encode(k, true), uri_encode(v, true)))
        .collect::<Vec<_>>();
    pairs.sort_unstable();

    pairs.join("&")
}

/// Canonical headers of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalHeaders {
    /// `name:value\n` for every header name, sorted by name.
    pub headers: String,
    /// Sorted header names joined by `;`.
    pub signed_headers: String,
}

/// Build the canonical headers and the signed headers list.
///
/// Names are lower-cased and values trimmed, interior whitespace is kept.
/// A name that shows up more than once gets a single `name:v1,v2` line with
/// its values joined by `,` in their original order, the same form AWS
/// computes on the server side. Every name shows up once in
/// `signed_headers`.
pub fn canonical_headers(headers: &HeaderMap) -> Result<CanonicalHeaders> {
    let mut entries = Vec::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        entries.push((name.as_str().to_ascii_lowercase(), value.to_str()?.trim()));
    }
    // Stable sort keeps the values of one name in their original order.
    entries.sort_by(|(l, _), (r, _)| l.cmp(r));

    let mut canonical = String::with_capacity(256);
    let mut names: Vec<&str> = Vec::with_capacity(entries.len());
    for (name, value) in entries.iter() {
        if names.last() == Some(&name.as_str()) {
            // Replace the `\n` of the previous value of this name.
            canonical.pop();
            canonical.push(',');
        } else {
            canonical.push_str(name);
            canonical.push(':');
            names.push(name);
        }
        canonical.push_str(value);
        canonical.push('\n');
    }

    Ok(CanonicalHeaders {
        headers: canonical,
        signed_headers: names.join(";"),
    })
}

/// Build the canonical uri from the request path.
///
/// The path of an `http::Uri` is already percent-encoded, so it is decoded
/// first and then encoded once with `/` kept. A leading `/` is added when
/// missing. Returns a `RequestInvalid` error if the decoded path is not
/// valid UTF-8.
pub fn canonical_uri(path: &str) -> Result<String> {
    let path = percent_decode_str(path).decode_utf8().map_err(|e| {
        Error::request_invalid(format!("path {path:?} is not valid UTF-8 once decoded"))
            .with_source(e)
    })?;

    let encoded = uri_encode(&path, false);
    if encoded.starts_with('/') {
        Ok(encoded)
    } else {
        Ok(format!("/{encoded}"))
    }
}

/// Build the canonical request.
///
/// ```shell
/// HTTPMethod
/// CanonicalURI
/// CanonicalQueryString
/// CanonicalHeaders
/// SignedHeaders
/// HashedPayload
/// ```
///
/// `headers` must already contain `x-amz-content-sha256` and `x-amz-date`
/// when signing with headers.
pub fn canonical_request(
    method: &Method,
    path: &str,
    query: &[(String, String)],
    headers: &CanonicalHeaders,
    payload_hash: &str,
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    writeln!(f, "{method}")?;
    writeln!(f, "{}", canonical_uri(path)?)?;
    writeln!(f, "{}", canonical_query_string(query))?;
    // Canonical headers end with `\n` already, which leaves an empty line here.
    writeln!(f, "{}", headers.headers)?;
    writeln!(f, "{}", headers.signed_headers)?;
    write!(f, "{payload_hash}")?;

    Ok(f)
}
