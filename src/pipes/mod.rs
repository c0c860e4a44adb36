/*
 *
 *  * Copyright (c) 2026 the tinybird-gateway authors.
 *  *
 *  * Licensed under the Apache License, Version 2.0 (the "License");
 *  * you may not use this file except in compliance with the License.
 *  * You may obtain a copy of the License at
 *  *
 *  *    http://www.apache.org/licenses/LICENSE-2.0
 *  *
 *  * Unless required by applicable law or agreed to in writing, software
 *  * distributed under the License is distributed on an "AS IS" BASIS,
 *  * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  * See the License for the specific language governing permissions and
 *  * limitations under the License.
 *
 */

//! The query schema registry: one [`PipeSpec`](crate::pipex::pipe::PipeSpec)
//! per analytics question, grouped by domain area. Remote names are
//! versioned; a new version is a new definition and old versions stay while
//! still referenced (`ViewUserAgentV2` alongside `ViewUserAgent`).

pub mod clicks;
pub mod durations;
pub mod useragent;
pub mod video;
pub mod webhooks;

use crate::pipex::pipe::PipeSpec;

/// Every registered remote pipe name. Definition names are 1:1 with remote
/// query versions; the registry test below keeps that honest.
pub const ALL_PIPES: &[&str] = &[
    durations::TotalAvgPageDuration::NAME,
    durations::ViewPageDuration::NAME,
    durations::TotalDocumentDuration::NAME,
    durations::TotalLinkDuration::NAME,
    durations::TotalViewerDuration::NAME,
    durations::TotalDataroomDuration::NAME,
    durations::DocumentDurationPerViewer::NAME,
    useragent::ViewUserAgentV2::NAME,
    useragent::ViewUserAgent::NAME,
    webhooks::WebhookEvents::NAME,
    video::VideoEventsByDocument::NAME,
    video::VideoEventsByView::NAME,
    clicks::ClickEventsByView::NAME,
];

#[cfg(test)]
mod tests {
    use super::ALL_PIPES;
    use std::collections::HashSet;

    #[test]
    fn pipe_names_are_unique() {
        let unique: HashSet<_> = ALL_PIPES.iter().collect();
        assert_eq!(unique.len(), ALL_PIPES.len());
    }

    #[test]
    fn pipe_names_carry_a_version_suffix() {
        for name in ALL_PIPES {
            let (_, version) = name
                .rsplit_once("__v")
                .unwrap_or_else(|| panic!("pipe {name} is not versioned"));
            assert!(
                !version.is_empty() && version.chars().all(|c| c.is_ascii_digit()),
                "pipe {name} has a malformed version suffix"
            );
        }
    }
}
