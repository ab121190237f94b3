//! Endpoint catalog tests against a mock Bakaláři server.

use bakalari::error::ApiError;
use bakalari::{BaseUrl, Client, Credentials, Error, EventScope, TimetableKind};
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> Client {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bak:ApiVersion": "3.27.0",
            "access_token": "access-1",
            "refresh_token": "refresh-1",
            "expires_in": 3600
        })))
        .mount(server)
        .await;

    let base = BaseUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
    let client = Client::new(base);
    client
        .login(Credentials::new("novak.jan", "heslo"), false)
        .await
        .unwrap();
    client
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_subjects_unwraps_collection() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/3/subjects"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Subjects": [{"SubjectID": "1", "SubjectName": "Matematika"}]
        })))
        .mount(&server)
        .await;

    let subjects = client.subjects().await.unwrap();
    assert_eq!(subjects[0]["SubjectName"], "Matematika");
    assert_eq!(client.api_version().await.as_deref(), Some("3.27.0"));
}

#[tokio::test]
async fn test_missing_collection_is_invalid_response() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/3/marks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Unexpected": []})))
        .mount(&server)
        .await;

    let err = client.marks().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Api(ApiError::InvalidServerResponse { .. })
    ));
}

#[tokio::test]
async fn test_themes_encodes_subject_id() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/3/subjects/themes/a%20b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Themes": []})))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.themes("a b").await.unwrap(), json!([]));
}

#[tokio::test]
async fn test_events_scope_and_range() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/3/events/my"))
        .and(query_param("from", "2024-09-01"))
        .and(query_param("to", "2024-09-30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Events": [1]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/3/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Events": [2]})))
        .expect(1)
        .mount(&server)
        .await;

    let mine = client
        .events(
            EventScope::My,
            Some(date(2024, 9, 1)),
            Some(date(2024, 9, 30)),
        )
        .await
        .unwrap();
    assert_eq!(mine, json!([1]));

    let all = client.events(EventScope::All, None, None).await.unwrap();
    assert_eq!(all, json!([2]));
}

#[tokio::test]
async fn test_homework_and_counts() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/3/homeworks"))
        .and(query_param("from", "2024-10-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Homeworks": []})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/3/homework/count-actual"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(4)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/3/marks/count-new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(2)))
        .mount(&server)
        .await;

    assert_eq!(
        client.homework(Some(date(2024, 10, 1)), None).await.unwrap(),
        json!([])
    );
    assert_eq!(client.homework_count_actual().await.unwrap(), 4);
    assert_eq!(client.marks_count_new().await.unwrap(), 2);
}

#[tokio::test]
async fn test_set_homework_done() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    Mock::given(method("PUT"))
        .and(path("/api/3/homeworks/HW42/student-done/true"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client.set_homework_done("HW42", true).await.unwrap();
}

#[tokio::test]
async fn test_timetable_kind_and_date() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/3/timetable/permanent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Days": []})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/3/timetable/actual"))
        .and(query_param("date", "2024-09-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Days": [1]})))
        .expect(1)
        .mount(&server)
        .await;

    let permanent = client
        .timetable(TimetableKind::Permanent, None)
        .await
        .unwrap();
    assert_eq!(permanent["Days"], json!([]));

    let actual = client
        .timetable(TimetableKind::Actual, Some(date(2024, 9, 2)))
        .await
        .unwrap();
    assert_eq!(actual["Days"], json!([1]));
}

#[tokio::test]
async fn test_messages_are_posted() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/3/komens/messages/received"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Messages": ["a"]})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/3/komens/messages/noticeboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Messages": ["b"]})))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client.received_messages().await.unwrap(), json!(["a"]));
    assert_eq!(client.noticeboard().await.unwrap(), json!(["b"]));
}

#[tokio::test]
async fn test_attachment_returns_bytes() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    let pdf = b"%PDF-1.4\n\x00\x01binary".to_vec();
    Mock::given(method("GET"))
        .and(path("/api/3/komens/attachment/ATT1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(pdf.clone(), "application/pdf"))
        .mount(&server)
        .await;

    assert_eq!(client.attachment("ATT1").await.unwrap(), pdf);
}

#[tokio::test]
async fn test_attachment_not_found() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/3/komens/attachment/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Attachment not found"))
        .mount(&server)
        .await;

    match client.attachment("missing").await.unwrap_err() {
        Error::Api(ApiError::NotFound { message }) => assert_eq!(message, "Attachment not found"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_close_ends_client() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    client.close().await;
    assert!(client.user().await.is_err());
    assert!(client.api_version().await.is_none());
}

#[tokio::test]
async fn test_api_version_listings() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"ApiVersion": "3.27.0", "ApplicationVersion": "1.58.0", "BaseUrl": "api/3"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ApiVersion": "3.27.0",
            "ApplicationVersion": "1.58.0"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let versions = client.api_versions().await.unwrap();
    assert_eq!(versions[0]["BaseUrl"], "api/3");

    let v3 = client.api_v3().await.unwrap();
    assert_eq!(v3["ApiVersion"], "3.27.0");
}

#[tokio::test]
async fn test_gdpr_commissioners_unwraps_collection() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/3/gdpr/commissioners"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Commissioners": [{"Name": "Ing. Petr Dvořák", "Email": "gdpr@example.cz"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let commissioners = client.gdpr_commissioners().await.unwrap();
    assert_eq!(commissioners[0]["Email"], "gdpr@example.cz");
}

#[tokio::test]
async fn test_final_marks_and_measures() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/3/marks/final"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "CertificateTerms": [{"GradeName": "1. pololetí", "Achievement": "Prospěl"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/3/marks/measures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "PedagogicalMeasures": [{"TypeLabel": "Pochvala třídního učitele"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let terms = client.marks_final().await.unwrap();
    assert_eq!(terms[0]["Achievement"], "Prospěl");

    let measures = client.marks_measures().await.unwrap();
    assert_eq!(measures[0]["TypeLabel"], "Pochvala třídního učitele");
}

#[tokio::test]
async fn test_substitutions_passes_range() {
    let server = MockServer::start().await;
    let client = client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/3/substitutions"))
        .and(query_param("from", "2024-09-02"))
        .and(query_param("to", "2024-09-06"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Changes": [{"Day": "2024-09-03T00:00:00+02:00", "ChangeType": "Canceled"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let changes = client
        .substitutions(Some(date(2024, 9, 2)), Some(date(2024, 9, 6)))
        .await
        .unwrap();
    assert_eq!(changes[0]["ChangeType"], "Canceled");
}
