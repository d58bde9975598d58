//! HTTP-level tests for the Redmine client against a mock server.

use chrono::NaiveDate;
use mockito::Matcher;
use sat_redmine::{Client, Query, RedmineError};

const EXPORT: &str = "Date,Comment,Hours,Activity,Issue\n\
2017-06-20,,1.00,Other,Task #280: Automation ProjX\n\
2017-06-21,,2.50,Automation,Task #318: User Story 1\n";

fn query() -> Query {
    Query::new(
        "me",
        NaiveDate::from_ymd_opt(2017, 5, 30).unwrap(),
        NaiveDate::from_ymd_opt(2017, 6, 30).unwrap(),
    )
}

#[tokio::test]
async fn test_fetch_sends_filters_and_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/time_entries.csv")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("key".into(), "0123abcd".into()),
            Matcher::UrlEncoded("c[]".into(), "issue".into()),
            Matcher::UrlEncoded("c[]".into(), "hours".into()),
            Matcher::UrlEncoded("op[spent_on]".into(), "><".into()),
            Matcher::UrlEncoded("v[spent_on][]".into(), "2017-05-30".into()),
            Matcher::UrlEncoded("v[spent_on][]".into(), "2017-06-30".into()),
            Matcher::UrlEncoded("v[user_id][]".into(), "me".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/csv")
        .with_body(EXPORT)
        .create_async()
        .await;

    let client = Client::new(server.url(), "0123abcd").unwrap();
    let entries = client.fetch_entries(&query()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].issue_id(), "280");
    assert_eq!(entries[1].category(), "Automation");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/time_entries.csv")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body("Unauthorized")
        .create_async()
        .await;

    let client = Client::new(server.url(), "bad-key").unwrap();
    let err = client.time_entries_csv(&query()).await.unwrap_err();

    match err {
        RedmineError::Api { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Unauthorized");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_export_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/time_entries.csv")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>login</html>")
        .create_async()
        .await;

    let client = Client::new(server.url(), "key").unwrap();
    let err = client.fetch_entries(&query()).await.unwrap_err();

    assert!(
        matches!(err, RedmineError::MissingColumn { column: "Issue" }),
        "{err:?}"
    );
}
