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

use super::*;
use http::Method;
use pretty_assertions::assert_eq;
use sigv4_aws_v4::{authenticate_with_trace, SigningTrace};
use test_case::test_case;

fn canonical_request_of(path_and_query: &str) -> String {
    init_signing_test();

    let mut parts = test_parts(Method::GET, path_and_query, &[("host", HOST)]);
    let mut trace = SigningTrace::default();
    authenticate_with_trace(&mut parts, b"", &test_params(), false, &mut trace)
        .expect("sign must succeed");
    trace.canonical_request
}

#[test_case("/a+b=c&d.txt", "/a%2Bb%3Dc%26d.txt"; "reserved characters")]
#[test_case("/dir/sub-dir_1/file~.txt", "/dir/sub-dir_1/file~.txt"; "unreserved characters")]
#[test_case("/%E4%BD%A0%E5%A5%BD", "/%E4%BD%A0%E5%A5%BD"; "utf8 path is encoded once")]
#[test_case("/photos/my%20cat.jpg", "/photos/my%20cat.jpg"; "encoded space is encoded once")]
#[test_case("/a%2Bb.txt", "/a%2Bb.txt"; "encoded plus")]
#[test_case("/file!'()*.txt", "/file%21%27%28%29%2A.txt"; "sub delims")]
fn test_canonical_uri(path: &str, expected: &str) {
    let creq = canonical_request_of(path);

    assert_eq!(creq.lines().nth(1), Some(expected));
}

#[test_case("/?prefix=CI/", "prefix=CI%2F"; "slash in value")]
#[test_case("/?q=a+b", "q=a%20b"; "plus decodes to space")]
#[test_case("/?q=a%2Bb", "q=a%2Bb"; "encoded plus")]
#[test_case("/?b=2&a=1&a=0", "a=0&a=1&b=2"; "duplicated keys")]
#[test_case("/?x=%E4%BD%A0", "x=%E4%BD%A0"; "utf8 value")]
#[test_case("/?tagging&acl", "acl=&tagging="; "keys without value")]
fn test_canonical_query(path_and_query: &str, expected: &str) {
    let creq = canonical_request_of(path_and_query);

    assert_eq!(creq.lines().nth(2), Some(expected));
}

#[test]
fn test_header_values_are_trimmed() {
    init_signing_test();

    let mut parts = test_parts(
        Method::GET,
        "/test.txt",
        &[("host", HOST), ("x-amz-meta-note", "  two  spaces  ")],
    );
    let mut trace = SigningTrace::default();
    authenticate_with_trace(&mut parts, b"", &test_params(), false, &mut trace)
        .expect("sign must succeed");

    assert!(trace
        .canonical_request
        .contains("\nx-amz-meta-note:two  spaces\n"));
}

#[test]
fn test_duplicated_headers_are_joined() {
    init_signing_test();

    let mut parts = test_parts(
        Method::GET,
        "/test.txt",
        &[("host", HOST), ("x-amz-meta-tag", "a"), ("x-amz-meta-tag", "b")],
    );
    let mut trace = SigningTrace::default();
    authenticate_with_trace(&mut parts, b"", &test_params(), false, &mut trace)
        .expect("sign must succeed");

    assert!(trace.canonical_request.contains("\nx-amz-meta-tag:a,b\n"));
    assert!(authorization(&parts).contains("x-amz-date;x-amz-meta-tag,"));
    assert_eq!(parts.headers.get_all("x-amz-meta-tag").iter().count(), 2);
}
