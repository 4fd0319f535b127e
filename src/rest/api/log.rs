// SPDX-FileCopyrightText: 2025 The userctl authors
//
// SPDX-License-Identifier: Apache-2.0

use reqwest::Method;

use super::Endpoint;

pub(crate) struct LatestLogs<'req> {
    pub(crate) lines: u32,
    pub(crate) file: Option<&'req str>,
}

impl Endpoint for LatestLogs<'_> {
    type Response = Vec<String>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/api/admin/logs".to_owned()
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("lines", self.lines.to_string())];
        if let Some(file) = self.file {
            query.push(("file", file.to_owned()));
        }
        query
    }
}

pub(crate) struct LogFiles;

impl Endpoint for LogFiles {
    type Response = Vec<String>;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        "/api/admin/logs/files".to_owned()
    }
}
