//! Integration tests for the combined availability facade

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use meetsync::api::public::availability::{AvailabilityResponse, CalendlyOutcome};
    use meetsync::core::AppConfig;
    use meetsync::schedule::GridConfig;

    use crate::test_utils::{test_app, test_app_with};

    const EVENTS_JSON: &str = r#"{"items": [
        {"id": "evt_1", "summary": "Standup",
         "start": {"dateTime": "2025-03-14T09:00:00Z"},
         "end": {"dateTime": "2025-03-14T09:30:00Z"}}
    ]}"#;

    fn mock_google(server: &mut mockito::ServerGuard) -> mockito::Mock {
        server
            .mock("GET", "/calendar/v3/calendars/primary/events")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(EVENTS_JSON)
            .match_query(mockito::Matcher::Any)
            .create()
    }

    fn mock_page(server: &mut mockito::ServerGuard) -> mockito::Mock {
        server
            .mock("GET", "/acme/intro")
            .with_status(200)
            .with_body("<html></html>")
            .create()
    }

    /// Tests facade returns 401 before touching either upstream
    #[tokio::test]
    async fn it_returns_401_for_missing_credential() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/availability?organization=acme&event_type=intro&date=2025-03-14")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    /// Tests facade returns 400 when date is missing
    #[tokio::test]
    async fn it_returns_400_for_missing_date() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/availability?organization=acme&event_type=intro")
                    .header("authorization", "Bearer test_token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests both halves succeed together
    #[tokio::test]
    async fn it_combines_calendar_and_calendly_halves() {
        let mut server = mockito::Server::new_async().await;
        let _google = mock_google(&mut server);
        let _page = mock_page(&mut server);
        let _range = server
            .mock("GET", "/api/booking/event_types/acme/intro/calendar/range")
            .with_status(200)
            .with_body(
                r#"{"days": [{"spots": [
                    {"start_time": "2025-03-14T16:00:00Z", "end_time": "2025-03-14T16:30:00Z"}
                ]}]}"#,
            )
            .match_query(mockito::Matcher::Any)
            .create();

        let app = test_app_with(AppConfig {
            google_api_url: server.url(),
            calendly_base_url: server.url(),
            grid: GridConfig::default(),
        });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/availability?organization=acme&event_type=intro&date=2025-03-14")
                    .header("authorization", "Bearer test_token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let resp: AvailabilityResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(resp.events.len(), 1);
        assert_eq!(resp.slots.len(), 31);
        match resp.calendly {
            CalendlyOutcome::Available {
                available_times,
                source,
            } => {
                assert_eq!(source, "calendly_api");
                assert_eq!(available_times.len(), 1);
            }
            CalendlyOutcome::Failed(err) => panic!("Expected available times, got {:?}", err),
        }
    }

    /// Tests the independence property: a refused Calendly endpoint is
    /// reported inline with fallback guidance and does not block the
    /// already-successful calendar half
    #[tokio::test]
    async fn it_reports_calendly_failure_without_blocking_calendar() {
        let mut server = mockito::Server::new_async().await;
        let _google = mock_google(&mut server);
        let _page = mock_page(&mut server);
        let _range = server
            .mock("GET", "/api/booking/event_types/acme/intro/calendar/range")
            .with_status(403)
            .with_body("restricted")
            .match_query(mockito::Matcher::Any)
            .create();

        let app = test_app_with(AppConfig {
            google_api_url: server.url(),
            calendly_base_url: server.url(),
            grid: GridConfig::default(),
        });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/availability?organization=acme&event_type=intro&date=2025-03-14")
                    .header("authorization", "Bearer test_token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // The whole request still succeeds
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let resp: AvailabilityResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(resp.events.len(), 1);
        match resp.calendly {
            CalendlyOutcome::Failed(err) => {
                assert!(err.error.contains("403"));
                assert!(err.suggestion.is_some());
                assert_eq!(
                    err.manual_link.as_deref(),
                    Some(format!("{}/acme/intro", server.url()).as_str())
                );
            }
            CalendlyOutcome::Available { .. } => {
                panic!("Expected the Calendly half to fail")
            }
        }
    }

    /// Tests the calendar being mandatory: a rejected credential fails the
    /// whole request even though Calendly would have answered
    #[tokio::test]
    async fn it_fails_whole_request_when_calendar_fails() {
        let mut server = mockito::Server::new_async().await;
        let _google = server
            .mock("GET", "/calendar/v3/calendars/primary/events")
            .with_status(401)
            .with_body(r#"{"error": {"message": "Invalid Credentials"}}"#)
            .match_query(mockito::Matcher::Any)
            .create();
        let _page = mock_page(&mut server);
        let _range = server
            .mock("GET", "/api/booking/event_types/acme/intro/calendar/range")
            .with_status(200)
            .with_body(r#"{"days": []}"#)
            .match_query(mockito::Matcher::Any)
            .create();

        let app = test_app_with(AppConfig {
            google_api_url: server.url(),
            calendly_base_url: server.url(),
            grid: GridConfig::default(),
        });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/availability?organization=acme&event_type=intro&date=2025-03-14")
                    .header("authorization", "Bearer expired_token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
