//! Integration tests for the wildcat client library.
//! These tests run against a local mock backend; no credentials required.

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use wildcat::credentials::{CredentialStore, TokenPair};
    use wildcat::types::{ChatRequest, Schedule};
    use wildcat::Wildcat;
    use time::macros::datetime;

    fn token_body(access: &str, refresh: &str) -> serde_json::Value {
        json!({
            "access_token": access,
            "refresh_token": refresh,
            "token_type": "bearer"
        })
    }

    fn user_body() -> serde_json::Value {
        json!({
            "netid": "jds1234",
            "name": "Jordan Smith",
            "email": "jds1234@example.edu",
            "majors": ["Computer Science"]
        })
    }

    fn profile_body() -> serde_json::Value {
        json!({
            "netid": "jds1234",
            "majors": ["Computer Science"],
            "earliest_class_time": "10:00"
        })
    }

    async fn client_for(server: &MockServer) -> Wildcat {
        Wildcat::new(Some(server.uri())).expect("client should build")
    }

    #[tokio::test]
    async fn login_persists_tokens_and_sends_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({"email": "a@b.com", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("A1", "R1")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let tokens = client.login("a@b.com", "pw").await.expect("login");
        assert_eq!(tokens.access_token, "A1");
        assert_eq!(tokens.refresh_token, "R1");
        assert_eq!(tokens.token_type, "bearer");
        assert_eq!(
            client.credentials().pair(),
            Some(TokenPair::new("A1", "R1"))
        );

        let user = client.me().await.expect("me");
        assert_eq!(user.netid, "jds1234");

        // The bearer header appears exactly once on the authenticated call.
        let requests = server.received_requests().await.unwrap();
        let me_request = requests
            .iter()
            .find(|r| r.url.path() == "/auth/me")
            .expect("request to /auth/me");
        let values: Vec<_> = me_request
            .headers
            .get_all("authorization")
            .iter()
            .map(|value| value.to_str().unwrap())
            .collect();
        assert_eq!(values, vec!["Bearer A1"]);
    }

    #[tokio::test]
    async fn register_persists_both_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .and(body_json(json!({
                "email": "a@b.com",
                "password": "pw",
                "name": "Jordan Smith"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("A1", "R1")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .register("a@b.com", "pw", "Jordan Smith")
            .await
            .expect("register");
        assert_eq!(
            client.credentials().pair(),
            Some(TokenPair::new("A1", "R1"))
        );
    }

    #[tokio::test]
    async fn google_login_persists_both_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/google/callback"))
            .and(body_json(json!({"token": "google-id-token"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("A1", "R1")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .login_with_google("google-id-token")
            .await
            .expect("google login");
        assert_eq!(
            client.credentials().pair(),
            Some(TokenPair::new("A1", "R1"))
        );
    }

    #[tokio::test]
    async fn login_failure_reports_detail_and_stores_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "Incorrect email or password"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.login("a@b.com", "wrong").await.unwrap_err();
        assert!(err.is_authentication());
        assert!(err.to_string().contains("Incorrect email or password"));
        assert!(!client.credentials().is_authenticated());
    }

    #[tokio::test]
    async fn expired_token_is_refreshed_and_request_retried_once() {
        let server = MockServer::start().await;
        // The stored access token has expired server-side.
        Mock::given(method("GET"))
            .and(path("/profile/me"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .and(body_json(json!({"refresh_token": "R1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("A2", "R2")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/profile/me"))
            .and(header("authorization", "Bearer A2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .credentials()
            .store(TokenPair::new("A1", "R1"))
            .unwrap();

        // The caller sees the retried request's result.
        let profile = client.profile().await.expect("profile after refresh");
        assert_eq!(profile.earliest_class_time.as_deref(), Some("10:00"));
        assert_eq!(
            client.credentials().pair(),
            Some(TokenPair::new("A2", "R2"))
        );
    }

    #[tokio::test]
    async fn failed_refresh_clears_credentials_with_zero_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid refresh token"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .credentials()
            .store(TokenPair::new("A1", "R1"))
            .unwrap();

        let err = client.me().await.unwrap_err();
        assert!(err.is_authentication());
        assert!(!client.credentials().is_authenticated());
    }

    #[tokio::test]
    async fn missing_refresh_token_fails_without_refresh_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "no token"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("A2", "R2")))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.me().await.unwrap_err();
        assert!(err.is_authentication());
        assert!(!client.credentials().is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_tokens_and_bearer_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("A1", "R1")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client.login("a@b.com", "pw").await.expect("login");
        client.logout().expect("logout");
        assert!(!client.credentials().is_authenticated());

        client.me().await.expect("me without auth");
        let requests = server.received_requests().await.unwrap();
        let me_request = requests
            .iter()
            .find(|r| r.url.path() == "/auth/me")
            .expect("request to /auth/me");
        assert!(me_request.headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn concurrent_401s_trigger_exactly_one_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
            .expect(1..=2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .and(body_json(json!({"refresh_token": "R1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("A2", "R2")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer A2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        client
            .credentials()
            .store(TokenPair::new("A1", "R1"))
            .unwrap();

        let (first, second) = tokio::join!(client.me(), client.me());
        assert_eq!(first.expect("first caller").netid, "jds1234");
        assert_eq!(second.expect("second caller").netid, "jds1234");
        assert_eq!(
            client.credentials().pair(),
            Some(TokenPair::new("A2", "R2"))
        );
    }

    #[tokio::test]
    async fn non_401_failures_carry_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile/me"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/schedule/7"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Schedule not found."))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.profile().await.unwrap_err();
        assert!(err.is_server_error());
        assert!(err.to_string().contains("boom"));

        let err = client.schedule(7).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Schedule not found."));
    }

    #[tokio::test]
    async fn connection_failure_is_distinct_and_names_the_backend() {
        // Port 1 refuses connections immediately.
        let client = Wildcat::new(Some("http://127.0.0.1:1".to_string())).unwrap();
        let err = client.me().await.unwrap_err();
        assert!(err.is_connection());
        assert!(!err.is_authentication());
        assert_eq!(err.status_code(), None);
        assert!(err.to_string().contains("http://127.0.0.1:1"));
    }

    #[tokio::test]
    async fn chat_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_partial_json(json!({
                "message": "What should I take next term?",
                "user_id": "jds1234"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"response": "Consider CS 340."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let request = ChatRequest::new(
            "What should I take next term?",
            "jds1234",
            datetime!(2025-09-02 14:30:00 UTC),
        );
        let reply = client.chat(&request).await.expect("chat");
        assert_eq!(reply.response, "Consider CS 340.");
    }

    #[tokio::test]
    async fn schedule_endpoints_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/schedule"))
            .and(query_param("netid", "jds1234"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 7,
                "netid": "jds1234",
                "name": "Schedule",
                "term": "Fall 2025"
            }])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/schedule"))
            .and(body_partial_json(json!({"netid": "jds1234", "term": "Fall 2025"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Schedule saved."})),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/schedule/7"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Schedule deleted."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let saved = client
            .save_schedule(&Schedule::new("jds1234", "Fall 2025"))
            .await
            .expect("save schedule");
        assert_eq!(saved.message, "Schedule saved.");

        let schedules = client.schedules("jds1234").await.expect("list schedules");
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0].id, Some(7));

        let deleted = client.delete_schedule(7).await.expect("delete schedule");
        assert_eq!(deleted.message, "Schedule deleted.");
    }

    struct RecordingLogger {
        requests: std::sync::Mutex<Vec<(String, String, u16)>>,
        refreshes: std::sync::Mutex<Vec<bool>>,
    }

    impl RecordingLogger {
        fn new() -> Self {
            Self {
                requests: std::sync::Mutex::new(Vec::new()),
                refreshes: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    impl wildcat::ClientLogger for RecordingLogger {
        fn log_request(&self, method: &str, path: &str, status: u16) {
            self.requests
                .lock()
                .unwrap()
                .push((method.to_string(), path.to_string(), status));
        }

        fn log_refresh(&self, succeeded: bool) {
            self.refreshes.lock().unwrap().push(succeeded);
        }
    }

    #[tokio::test]
    async fn logger_observes_requests_and_refreshes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "expired"})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("A2", "R2")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer A2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
            .mount(&server)
            .await;

        let logger = std::sync::Arc::new(RecordingLogger::new());
        let client = client_for(&server).await.with_logger(logger.clone());
        client
            .credentials()
            .store(TokenPair::new("A1", "R1"))
            .unwrap();

        client.me().await.expect("me after refresh");

        assert_eq!(*logger.refreshes.lock().unwrap(), vec![true]);
        let requests = logger.requests.lock().unwrap();
        assert_eq!(
            *requests,
            vec![
                ("GET".to_string(), "/auth/me".to_string(), 401),
                ("GET".to_string(), "/auth/me".to_string(), 200),
            ]
        );
    }

    #[tokio::test]
    async fn persistent_store_survives_a_new_client() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("A1", "R1")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
            .expect(1)
            .mount(&server)
            .await;

        let mut path_buf = std::env::temp_dir();
        path_buf.push(format!("wildcat-session-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path_buf);

        {
            let store = CredentialStore::persistent(&path_buf);
            let client = Wildcat::with_options(Some(server.uri()), store, None).unwrap();
            client.login("a@b.com", "pw").await.expect("login");
        }

        // A fresh client picks the session back up from disk.
        let store = CredentialStore::persistent(&path_buf);
        let client = Wildcat::with_options(Some(server.uri()), store, None).unwrap();
        let user = client.me().await.expect("me from resumed session");
        assert_eq!(user.netid, "jds1234");

        let _ = std::fs::remove_file(&path_buf);
    }
}
