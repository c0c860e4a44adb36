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

mod common;

use common::{counting_subscriber, MockClient};
use http::StatusCode;
use std::sync::Arc;
use tinybird_gateway::config::GatewayConfig;
use tinybird_gateway::pipes::durations::{
    SumDurationRow, TotalDocumentDuration, TotalDocumentDurationParams,
    ViewPageDurationParams, ViewPageDurationRow,
};
use tinybird_gateway::pipes::webhooks::{WebhookEventsParams, WebhookTrigger};
use tinybird_gateway::pipex::error::{ErrorKind, ServerErrorKind};
use tinybird_gateway::{Gateway, PipeResult};
use tracing::instrument::WithSubscriber;

fn configured_gateway(client: Arc<MockClient>) -> Gateway<MockClient> {
    Gateway::with_client(
        GatewayConfig::new().token("p.test-token".to_string()),
        client,
    )
}

fn doc_duration_params() -> TotalDocumentDurationParams {
    TotalDocumentDurationParams {
        document_id: "doc_1".to_string(),
        excluded_link_ids: String::new(),
        excluded_view_ids: String::new(),
        since: 0,
        until: None,
    }
}

const SUM_DURATION_BODY: &str = concat!(
    r#"{"meta":[{"name":"sum_duration","type":"Float64"}],"#,
    r#""data":[{"sum_duration":4200}],"#,
    r#""rows":1,"#,
    r#""statistics":{"elapsed":0.002,"rows_read":128,"bytes_read":2048}}"#
);

#[tokio::test]
async fn unconfigured_gateway_returns_empty_without_network_io() {
    let client = MockClient::new();
    let gateway = Gateway::with_client(GatewayConfig::new(), client.clone());

    let (subscriber, counts) = counting_subscriber();
    let result = gateway
        .total_document_duration(&doc_duration_params())
        .with_subscriber(subscriber)
        .await;

    assert_eq!(result, PipeResult::empty());
    assert_eq!(client.request_count(), 0);
    assert_eq!(counts.warnings(), 1);
    assert_eq!(counts.errors(), 0);
}

#[tokio::test]
async fn configured_gateway_passes_rows_through_unmodified() {
    let client = MockClient::new();
    client.push_response(StatusCode::OK, SUM_DURATION_BODY);
    let gateway = configured_gateway(client.clone());

    let result = gateway.total_document_duration(&doc_duration_params()).await;

    assert_eq!(result.data, vec![SumDurationRow { sum_duration: 4200.0 }]);
    assert_eq!(result.rows, 1);

    let statistics = result.statistics.expect("statistics missing");
    assert_eq!(statistics.rows_read, 128);

    assert_eq!(result.columns.len(), 1);
    assert_eq!(result.columns[0].name, "sum_duration");
}

#[tokio::test]
async fn request_carries_pipe_name_parameters_and_bearer_token() {
    let client = MockClient::new();
    client.push_response(StatusCode::OK, SUM_DURATION_BODY);
    let gateway = configured_gateway(client.clone());

    gateway.total_document_duration(&doc_duration_params()).await;

    let requests = client.requests();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(request.method, http::Method::GET);
    assert_eq!(
        request.uri,
        "https://api.tinybird.co/v0/pipes/get_total_document_duration__v1.json\
         ?documentId=doc_1&excludedLinkIds=&excludedViewIds=&since=0"
    );
    assert_eq!(request.bearer_token.as_deref(), Some("p.test-token"));
    assert!(!request.unique_id.is_empty());
}

#[tokio::test]
async fn backend_failure_resolves_to_empty_with_error_log() {
    let client = MockClient::new();
    client.push_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error":"Internal server error"}"#,
    );
    let gateway = configured_gateway(client.clone());

    let (subscriber, counts) = counting_subscriber();
    let result = gateway
        .total_document_duration(&doc_duration_params())
        .with_subscriber(subscriber)
        .await;

    assert_eq!(result, PipeResult::empty());
    assert_eq!(counts.errors(), 1);
    assert_eq!(counts.warnings(), 0);
}

#[tokio::test]
async fn schema_drift_resolves_to_empty_with_error_log() {
    let client = MockClient::new();
    // sum_duration came back as a string: backend contract drift.
    client.push_response(
        StatusCode::OK,
        r#"{"meta":[],"data":[{"sum_duration":"4200"}],"rows":1}"#,
    );
    let gateway = configured_gateway(client.clone());

    let (subscriber, counts) = counting_subscriber();
    let result = gateway
        .total_document_duration(&doc_duration_params())
        .with_subscriber(subscriber)
        .await;

    assert_eq!(result, PipeResult::empty());
    assert_eq!(counts.errors(), 1);
}

#[tokio::test]
async fn invalid_parameters_are_rejected_before_any_network_io() {
    let client = MockClient::new();
    let gateway = configured_gateway(client.clone());

    let params = TotalDocumentDurationParams {
        excluded_link_ids: "link_1,,link_2".to_string(),
        ..doc_duration_params()
    };

    let (subscriber, counts) = counting_subscriber();
    let result = gateway
        .total_document_duration(&params)
        .with_subscriber(subscriber)
        .await;

    assert_eq!(result, PipeResult::empty());
    assert_eq!(client.request_count(), 0);
    assert_eq!(counts.errors(), 1);
}

#[tokio::test]
async fn row_order_is_preserved() {
    let client = MockClient::new();
    client.push_response(
        StatusCode::OK,
        concat!(
            r#"{"meta":[],"data":["#,
            r#"{"pageNumber":"3","sum_duration":30},"#,
            r#"{"pageNumber":"1","sum_duration":10},"#,
            r#"{"pageNumber":"2","sum_duration":20}"#,
            r#"],"rows":3}"#
        ),
    );
    let gateway = configured_gateway(client.clone());

    let result = gateway
        .view_page_duration(&ViewPageDurationParams {
            document_id: "doc_1".to_string(),
            view_id: "view_1".to_string(),
            since: 0,
            until: None,
        })
        .await;

    let pages: Vec<&str> = result
        .data
        .iter()
        .map(|row: &ViewPageDurationRow| row.page_number.as_str())
        .collect();
    assert_eq!(pages, vec!["3", "1", "2"]);
}

#[tokio::test]
async fn identical_invocations_yield_identical_results() {
    let client = MockClient::new();
    client.push_response(StatusCode::OK, SUM_DURATION_BODY);
    client.push_response(StatusCode::OK, SUM_DURATION_BODY);
    let gateway = configured_gateway(client.clone());

    let params = doc_duration_params();
    let first = gateway.total_document_duration(&params).await;
    let second = gateway.total_document_duration(&params).await;

    assert_eq!(first, second);
    assert_eq!(client.request_count(), 2);
}

#[tokio::test]
async fn correlation_ids_differ_between_invocations() {
    let client = MockClient::new();
    client.push_response(StatusCode::OK, SUM_DURATION_BODY);
    client.push_response(StatusCode::OK, SUM_DURATION_BODY);
    let gateway = configured_gateway(client.clone());

    let params = doc_duration_params();
    gateway.total_document_duration(&params).await;
    gateway.total_document_duration(&params).await;

    let requests = client.requests();
    assert_ne!(requests[0].unique_id, requests[1].unique_id);
}

#[tokio::test]
async fn enum_valued_rows_decode_against_the_closed_set() {
    let client = MockClient::new();
    client.push_response(
        StatusCode::OK,
        concat!(
            r#"{"meta":[],"data":[{"#,
            r#""event_id":"evt_1","webhook_id":"wh_1","message_id":"msg_1","#,
            r#""event":"link.viewed","url":"https://example.com/hook","#,
            r#""http_status":200,"request_body":"{}","response_body":"ok","#,
            r#""timestamp":"2024-05-01 12:00:00""#,
            r#"}],"rows":1}"#
        ),
    );
    let gateway = configured_gateway(client.clone());

    let result = gateway
        .webhook_events(&WebhookEventsParams {
            webhook_id: "wh_1".to_string(),
        })
        .await;

    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].event, WebhookTrigger::LinkViewed);
}

#[tokio::test]
async fn unknown_enum_value_is_schema_drift() {
    let client = MockClient::new();
    client.push_response(
        StatusCode::OK,
        concat!(
            r#"{"meta":[],"data":[{"#,
            r#""event_id":"evt_1","webhook_id":"wh_1","message_id":"msg_1","#,
            r#""event":"link.deleted","url":"https://example.com/hook","#,
            r#""http_status":200,"request_body":"{}","response_body":"ok","#,
            r#""timestamp":"2024-05-01 12:00:00""#,
            r#"}],"rows":1}"#
        ),
    );
    let gateway = configured_gateway(client.clone());

    let result = gateway
        .webhook_events(&WebhookEventsParams {
            webhook_id: "wh_1".to_string(),
        })
        .await;

    assert!(result.is_empty());
}

#[tokio::test]
async fn direct_binder_surfaces_authentication_failures() {
    let client = MockClient::new();
    client.push_response(
        StatusCode::FORBIDDEN,
        r#"{"error":"invalid token","documentation":"https://docs.tinybird.co/api-reference"}"#,
    );
    let gateway = configured_gateway(client.clone());

    let pipes = gateway.pipes().expect("gateway should be configured");
    let err = pipes
        .query::<TotalDocumentDuration>(&doc_duration_params(), "corr-1")
        .await
        .unwrap_err();

    match err.kind() {
        ErrorKind::Server(server_error) => {
            assert_eq!(
                server_error.kind(),
                &ServerErrorKind::AuthenticationFailure
            );
            assert_eq!(server_error.msg(), "invalid token");
            assert_eq!(server_error.correlation_id(), Some("corr-1"));
            assert_eq!(
                server_error.pipe(),
                Some("get_total_document_duration__v1")
            );
        }
        other => panic!("expected server error, got {other:?}"),
    }
}
