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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used by pandastream.
pub const PANDA_ACCESS_KEY: &str = "PANDA_ACCESS_KEY";
pub const PANDA_SECRET_KEY: &str = "PANDA_SECRET_KEY";
pub const PANDA_CLOUD_ID: &str = "PANDA_CLOUD_ID";
pub const PANDA_API_HOST: &str = "PANDA_API_HOST";
pub const PANDA_API_PORT: &str = "PANDA_API_PORT";

/// Default API host.
pub const DEFAULT_API_HOST: &str = "api.pandastream.com";
/// Default API port. Port 443 implies https, anything else plain http.
pub const DEFAULT_API_PORT: u16 = 443;
/// Version segment of every API path, as in `/v2/videos.json`.
pub const API_VERSION: u32 = 2;

// Query parameters injected by the signer.
pub const CLOUD_ID: &str = "cloud_id";
pub const ACCESS_KEY: &str = "access_key";
pub const TIMESTAMP: &str = "timestamp";
pub const SIGNATURE: &str = "signature";
/// Names the local file to upload. Never part of the signature.
pub const FILE: &str = "file";

pub const MULTIPART_BOUNDARY: &str = "^{---panda---}v";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// AsciiSet for pandastream query escaping.
///
/// - Escape every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - Space becomes `%20`, never `+`.
pub static PANDA_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
