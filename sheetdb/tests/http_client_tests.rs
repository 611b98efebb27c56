use pretty_assertions::assert_eq;
use sheetdb::{
    HttpSheetsClient, RowDeleteRange, SheetDbError, SheetProperties, SheetsApi, SheetsApiConfig,
    ValueRange,
};
use wiremock::matchers::{body_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUOTA_BODY: &str =
    "Quota exceeded for quota metric 'Read requests' and limit 'Read requests per minute per user'";

fn mock_client(server: &MockServer) -> HttpSheetsClient {
    HttpSheetsClient::new(SheetsApiConfig {
        api_base_url: server.uri(),
        access_token: "test-token".to_string(),
        ..Default::default()
    })
}

// ── Config defaults ─────────────────────────────────────────────

#[test]
fn config_defaults() {
    let cfg = SheetsApiConfig::default();
    assert_eq!(cfg.api_base_url, "https://sheets.googleapis.com");
    assert!(cfg.access_token.is_empty());
    assert_eq!(cfg.timeout_secs, 30);
}

#[test]
fn config_serde_roundtrip() {
    let cfg = SheetsApiConfig {
        api_base_url: "http://localhost:9999".to_string(),
        access_token: "tok".to_string(),
        timeout_secs: 5,
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let back: SheetsApiConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.api_base_url, "http://localhost:9999");
    assert_eq!(back.timeout_secs, 5);
}

// ── get_range ───────────────────────────────────────────────────

#[tokio::test]
async fn get_range_parses_the_grid() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/spreadsheet-1/values/users"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "users!A1:C3",
            "majorDimension": "ROWS",
            "values": [
                ["id", "name", "enabled"],
                ["x1", "John", "false"]
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let grid = client.get_range("spreadsheet-1", "users").await.unwrap();

    assert_eq!(
        grid,
        vec![
            vec!["id".to_string(), "name".to_string(), "enabled".to_string()],
            vec!["x1".to_string(), "John".to_string(), "false".to_string()],
        ]
    );
}

#[tokio::test]
async fn get_range_missing_values_is_an_empty_grid() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/spreadsheet-1/values/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "range": "users!A1:Z1000",
            "majorDimension": "ROWS"
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let grid = client.get_range("spreadsheet-1", "users").await.unwrap();
    assert!(grid.is_empty());
}

#[tokio::test]
async fn get_range_url_encodes_the_range() {
    let server = MockServer::start().await;

    // `users!A1:1` percent-encodes to `users%21A1%3A1`.
    Mock::given(method("GET"))
        .and(path_regex(r"^/v4/spreadsheets/spreadsheet-1/values/users(%21|!)A1(%3A|:)1$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "values": [["id", "name"]]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let grid = client.get_range("spreadsheet-1", "users!A1:1").await.unwrap();
    assert_eq!(grid, vec![vec!["id".to_string(), "name".to_string()]]);
}

#[tokio::test]
async fn get_range_server_error_carries_the_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/spreadsheet-1/values/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.get_range("spreadsheet-1", "users").await.unwrap_err();

    match err {
        SheetDbError::Backend(msg) => {
            assert!(msg.contains("500"));
            assert!(msg.contains("backend exploded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn quota_response_classifies_as_quota_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/spreadsheet-1/values/users"))
        .respond_with(ResponseTemplate::new(429).set_body_string(QUOTA_BODY))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.get_range("spreadsheet-1", "users").await.unwrap_err();
    assert!(err.is_quota_error());
}

// ── append_rows ─────────────────────────────────────────────────

#[tokio::test]
async fn append_posts_rows_with_insert_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/spreadsheet-1/values/users:append"))
        .and(query_param("valueInputOption", "USER_ENTERED"))
        .and(query_param("insertDataOption", "INSERT_ROWS"))
        .and(body_json(serde_json::json!({
            "values": [["x1", "John", "false"]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    client
        .append_rows(
            "spreadsheet-1",
            "users",
            &[vec!["x1".to_string(), "John".to_string(), "false".to_string()]],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn append_failure_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/spreadsheet-1/values/users:append"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client
        .append_rows("spreadsheet-1", "users", &[vec!["x1".to_string()]])
        .await
        .unwrap_err();
    assert!(matches!(err, SheetDbError::Backend(_)));
}

// ── batch_update_values ─────────────────────────────────────────

#[tokio::test]
async fn batch_update_sends_every_range() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/spreadsheet-1/values:batchUpdate"))
        .and(body_json(serde_json::json!({
            "valueInputOption": "USER_ENTERED",
            "data": [
                { "range": "users!A2:C2", "values": [["x1", "John", "true"]] },
                { "range": "users!A4:C4", "values": [["x3", "Jane", "false"]] }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    client
        .batch_update_values(
            "spreadsheet-1",
            &[
                ValueRange {
                    range: "users!A2:C2".to_string(),
                    values: vec![vec!["x1".to_string(), "John".to_string(), "true".to_string()]],
                },
                ValueRange {
                    range: "users!A4:C4".to_string(),
                    values: vec![vec!["x3".to_string(), "Jane".to_string(), "false".to_string()]],
                },
            ],
        )
        .await
        .unwrap();
}

// ── batch_delete_rows ───────────────────────────────────────────

#[tokio::test]
async fn delete_sends_structural_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/spreadsheet-1:batchUpdate"))
        .and(body_json(serde_json::json!({
            "requests": [
                {
                    "deleteDimension": {
                        "range": {
                            "sheetId": 1234,
                            "dimension": "ROWS",
                            "startIndex": 2,
                            "endIndex": 3
                        }
                    }
                },
                {
                    "deleteDimension": {
                        "range": {
                            "sheetId": 1234,
                            "dimension": "ROWS",
                            "startIndex": 1,
                            "endIndex": 2
                        }
                    }
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    client
        .batch_delete_rows(
            "spreadsheet-1",
            &[
                RowDeleteRange {
                    sheet_id: 1234,
                    start_index: 2,
                    end_index: 3,
                },
                RowDeleteRange {
                    sheet_id: 1234,
                    start_index: 1,
                    end_index: 2,
                },
            ],
        )
        .await
        .unwrap();
}

// ── sheet_metadata ──────────────────────────────────────────────

#[tokio::test]
async fn metadata_lists_sheet_properties() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/spreadsheet-1"))
        .and(query_param("fields", "sheets(properties(sheetId,title))"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sheets": [
                { "properties": { "sheetId": 0, "title": "users" } },
                { "properties": { "sheetId": 1234, "title": "orders" } }
            ]
        })))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let sheets = client.sheet_metadata("spreadsheet-1").await.unwrap();

    assert_eq!(
        sheets,
        vec![
            SheetProperties {
                sheet_id: 0,
                title: "users".to_string()
            },
            SheetProperties {
                sheet_id: 1234,
                title: "orders".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn metadata_without_sheets_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/spreadsheet-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let sheets = client.sheet_metadata("spreadsheet-1").await.unwrap();
    assert!(sheets.is_empty());
}
