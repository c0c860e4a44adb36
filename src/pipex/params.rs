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

use crate::pipex::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;

/// Parameter contract for one pipe.
///
/// The struct's serde representation defines the wire field names; `validate`
/// covers the semantic constraints the type system cannot express (non-empty
/// identifiers, well-formed comma-joined lists, sane time windows). Failing
/// validation is a programmer error and is reported before any network I/O.
pub trait PipeParams: Serialize {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Flattens a params struct into query-string pairs.
///
/// Scalars are stringified, string lists are comma-joined (the remote engine
/// takes one flat value per parameter), absent optionals are skipped. Nested
/// objects have no query-string representation and are rejected.
pub(crate) fn encode_params<P: PipeParams>(params: &P) -> Result<Vec<(String, String)>> {
    let value = serde_json::to_value(params).map_err(|e| Error::new_encoding_error(e.to_string()))?;

    let obj = match value {
        Value::Object(obj) => obj,
        _ => {
            return Err(Error::new_encoding_error(
                "pipe parameters must serialize to an object",
            ));
        }
    };

    let mut pairs = Vec::with_capacity(obj.len());
    for (key, value) in obj {
        match value {
            Value::Null => {}
            Value::String(s) => pairs.push((key, s)),
            Value::Number(n) => pairs.push((key, n.to_string())),
            Value::Bool(b) => pairs.push((key, b.to_string())),
            Value::Array(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => parts.push(s),
                        other => {
                            return Err(Error::new_encoding_error(format!(
                                "parameter {key} contains a non-string list element: {other}"
                            )));
                        }
                    }
                }
                pairs.push((key, parts.join(",")));
            }
            other => {
                return Err(Error::new_encoding_error(format!(
                    "parameter {key} has no query-string representation: {other}"
                )));
            }
        }
    }

    Ok(pairs)
}

/// A required identifier must be present and non-blank.
pub(crate) fn check_required(arg: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::new_invalid_argument_error(
            "required identifier is empty",
            arg.to_string(),
        ));
    }

    Ok(())
}

/// A comma-joined identifier list. The empty string means "no entries"; a
/// non-empty value must not contain blank segments ("a,,b", ",a", "a,").
pub(crate) fn check_id_list(arg: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }

    if value.split(',').any(|segment| segment.trim().is_empty()) {
        return Err(Error::new_invalid_argument_error(
            "comma separated list contains an empty segment",
            arg.to_string(),
        ));
    }

    Ok(())
}

/// A native identifier list, comma-joined at encoding time. Elements must be
/// non-blank and free of embedded commas so the joined form stays parseable.
pub(crate) fn check_ids(arg: &str, values: &[String]) -> Result<()> {
    for value in values {
        if value.trim().is_empty() {
            return Err(Error::new_invalid_argument_error(
                "identifier list contains an empty element",
                arg.to_string(),
            ));
        }
        if value.contains(',') {
            return Err(Error::new_invalid_argument_error(
                "identifier list element contains a comma",
                arg.to_string(),
            ));
        }
    }

    Ok(())
}

/// Epoch-millisecond window bounds.
pub(crate) fn check_window(since: i64, until: Option<i64>) -> Result<()> {
    if since < 0 {
        return Err(Error::new_invalid_argument_error(
            "since must not be negative",
            "since".to_string(),
        ));
    }

    if let Some(until) = until {
        if until < since {
            return Err(Error::new_invalid_argument_error(
                "until must not precede since",
                "until".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipex::error::ErrorKind;
    use serde::Serialize;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct TestParams {
        document_id: String,
        excluded_view_ids: Vec<String>,
        since: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        until: Option<i64>,
    }

    impl PipeParams for TestParams {}

    #[test]
    fn encode_flattens_scalars_lists_and_skips_absent_optionals() {
        let params = TestParams {
            document_id: "doc_1".to_string(),
            excluded_view_ids: vec!["v1".to_string(), "v2".to_string()],
            since: 1700000000000,
            until: None,
        };

        let pairs = encode_params(&params).unwrap();

        assert_eq!(
            pairs,
            vec![
                ("documentId".to_string(), "doc_1".to_string()),
                ("excludedViewIds".to_string(), "v1,v2".to_string()),
                ("since".to_string(), "1700000000000".to_string()),
            ]
        );
    }

    #[test]
    fn encode_includes_present_optionals() {
        let params = TestParams {
            document_id: "doc_1".to_string(),
            excluded_view_ids: vec![],
            since: 0,
            until: Some(42),
        };

        let pairs = encode_params(&params).unwrap();

        assert!(pairs.contains(&("until".to_string(), "42".to_string())));
        assert!(pairs.contains(&("excludedViewIds".to_string(), String::new())));
    }

    #[derive(Serialize)]
    struct NestedParams {
        inner: TestParams,
    }

    impl PipeParams for NestedParams {}

    #[test]
    fn encode_rejects_nested_objects() {
        let params = NestedParams {
            inner: TestParams {
                document_id: "doc_1".to_string(),
                excluded_view_ids: vec![],
                since: 0,
                until: None,
            },
        };

        let err = encode_params(&params).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Encoding { .. }));
    }

    #[test]
    fn id_list_accepts_empty_and_well_formed_values() {
        check_id_list("excludedViewIds", "").unwrap();
        check_id_list("excludedViewIds", "v1").unwrap();
        check_id_list("excludedViewIds", "v1,v2,v3").unwrap();
    }

    #[test]
    fn id_list_rejects_blank_segments() {
        for bad in ["v1,,v2", ",v1", "v1,", " , "] {
            let err = check_id_list("excludedViewIds", bad).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
        }
    }

    #[test]
    fn ids_rejects_embedded_commas_and_blanks() {
        check_ids("excludedLinkIds", &["l1".to_string(), "l2".to_string()]).unwrap();

        let err = check_ids("excludedLinkIds", &["l1,l2".to_string()]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));

        let err = check_ids("excludedLinkIds", &["  ".to_string()]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    }

    #[test]
    fn window_rejects_inverted_bounds() {
        check_window(0, None).unwrap();
        check_window(10, Some(10)).unwrap();

        assert!(check_window(-1, None).is_err());
        assert!(check_window(10, Some(9)).is_err());
    }
}
