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

use std::str::FromStr;
use std::time::Duration;

use http::header::HeaderName;
use http::request::Parts;
use http::uri::Authority;
use http::uri::PathAndQuery;
use http::HeaderMap;
use http::Method;
use http::Uri;

use crate::Error;
use crate::Result;

/// Signing context for request.
///
/// It works on a copy of the request headers so that a failed signing never
/// leaves a half-signed request behind. Call one of the `apply_*` functions
/// to write the result back.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP authority, if the uri carries one.
    pub authority: Option<Authority>,
    /// HTTP path, as it appears on the wire.
    pub path: String,
    /// HTTP query parameters, decoded and in their original order.
    pub query: Vec<(String, String)>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &Parts) -> Result<Self> {
        let uri = &parts.uri;

        Ok(SigningRequest {
            method: parts.method.clone(),
            authority: uri.authority().cloned(),
            path: uri.path().to_string(),
            query: uri.query().map(decode_query).unwrap_or_default(),
            headers: parts.headers.clone(),
        })
    }

    /// Get header value by name.
    ///
    /// Returns a `MissingHeader` error if the header is not present.
    pub fn header_get(&self, key: &str) -> Result<&str> {
        match self.headers.get(key) {
            Some(v) => Ok(v.to_str()?),
            None => Err(Error::missing_header(format!(
                "header {key} is not present on the request"
            ))),
        }
    }

    /// Copy the headers of the signing context without the given header.
    ///
    /// The remaining headers keep their order, the headers of the signing
    /// context itself are left untouched.
    pub fn headers_without(&self, key: &HeaderName) -> HeaderMap {
        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in self.headers.iter() {
            if name != key {
                headers.append(name.clone(), value.clone());
            }
        }
        headers
    }

    /// Write the headers of the signing context back to the request.
    ///
    /// Method and uri of the request are left untouched.
    pub fn apply_headers(self, parts: &mut Parts) {
        parts.headers = self.headers;
    }

    /// Rebuild the request uri with the given, already encoded, query string.
    ///
    /// Headers of the request are left untouched.
    pub fn apply_query(self, parts: &mut Parts, query: &str) -> Result<()> {
        let mut uri_parts = parts.uri.clone().into_parts();

        let paq = if query.is_empty() {
            self.path
        } else {
            let mut s = self.path;
            s.reserve(query.len() + 1);
            s.push('?');
            s.push_str(query);
            s
        };
        uri_parts.path_and_query = Some(PathAndQuery::from_str(&paq)?);

        parts.uri = Uri::from_parts(uri_parts)?;
        Ok(())
    }
}

/// Decode a raw query string into key value pairs.
///
/// Duplicated keys are kept as separate pairs and a key without `=` gets an
/// empty value.
///
/// ```shell
/// "b=2&a=1&a&c=%2F" => [(b, 2), (a, 1), (a, ), (c, /)]
/// ```
pub fn decode_query(query: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// SigningMethod is the method that used in signing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SigningMethod {
    /// Signing with header.
    Header,
    /// Signing with query.
    Query(Duration),
}
