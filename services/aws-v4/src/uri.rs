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

//! UriEncode as defined by SigV4.

use crate::constants::{AWS_QUERY_ENCODE_SET, AWS_URI_ENCODE_SET};
use percent_encoding::{utf8_percent_encode, AsciiSet};
use sigv4_core::{Error, Result};

fn encode_set(encode_slash: bool) -> &'static AsciiSet {
    if encode_slash {
        &AWS_QUERY_ENCODE_SET
    } else {
        &AWS_URI_ENCODE_SET
    }
}

/// Percent-encode `input` the way SigV4 expects.
///
/// Unreserved characters `A-Z a-z 0-9 - . _ ~` pass through. `/` passes
/// through unless `encode_slash` is set, in which case it becomes `%2F`.
/// Every other byte of the UTF-8 input becomes `%XY` with uppercase hex.
pub fn uri_encode(input: &str, encode_slash: bool) -> String {
    utf8_percent_encode(input, encode_set(encode_slash)).to_string()
}

/// Same as [`uri_encode`], but writes into `out` and returns the number of
/// bytes written.
///
/// Returns an `EncodingOverflow` error instead of truncating when the encoded
/// form doesn't fit. The content of `out` is unspecified after an error.
pub fn uri_encode_to_slice(input: &str, encode_slash: bool, out: &mut [u8]) -> Result<usize> {
    let mut written = 0;
    for chunk in utf8_percent_encode(input, encode_set(encode_slash)) {
        let end = written + chunk.len();
        if end > out.len() {
            return Err(Error::encoding_overflow(format!(
                "output buffer of {} bytes is too small to encode {input:?}",
                out.len()
            )));
        }
        out[written..end].copy_from_slice(chunk.as_bytes());
        written = end;
    }
    Ok(written)
}
