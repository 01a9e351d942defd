use std::time::Duration;

use egui_kittest::Harness;
use roster_ui::RosterApp;
use roster_ui::state::State;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, RosterApp>,
}

impl<'a> TestCtx<'a> {
    /// Harness over `RosterApp::ui` against `mock_server`.
    ///
    /// Mount mocks before calling: the first frame already fetches users.
    pub fn new(mock_server: MockServer) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let app = RosterApp::new(State::test(mock_server.uri()));
        let harness = Harness::new_ui_state(|ui, app: &mut RosterApp| app.ui(ui), app);

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, RosterApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Renders, then lets spawned commands run and renders again, `rounds` times.
    pub async fn settle(&mut self, rounds: usize) {
        self.harness.step();
        for _ in 0..rounds {
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.harness.step();
        }
        // Second frame draws what the last sync applied.
        self.harness.step();
    }
}

pub fn user(email: &str, role: &str, status: &str) -> Value {
    json!({"email": email, "role": role, "status": status})
}

/// Answers every page request with `users` and `invited`.
#[allow(unused)]
pub async fn mount_users(server: &MockServer, users: Vec<Value>, invited: Vec<&str>, pages: u32) {
    let invited: Vec<Value> = invited.into_iter().map(|email| json!({"email": email})).collect();

    Mock::given(method("GET"))
        .and(path("/api/manage/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accepted": users,
            "invited": invited,
            "accepted_pages": pages
        })))
        .mount(server)
        .await;
}

/// Like [`mount_users`] for page `page` only, with an expected call count.
#[allow(unused)]
pub async fn mount_users_page(
    server: &MockServer,
    page: u32,
    users: Vec<Value>,
    pages: u32,
    expect: u64,
) {
    Mock::given(method("GET"))
        .and(path("/api/manage/users"))
        .and(query_param("accepted_page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accepted": users,
            "invited": [],
            "accepted_pages": pages
        })))
        .expect(expect)
        .mount(server)
        .await;
}
