//! End-to-end command flows through `StateCtx` against a wiremock server.

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use roster_business::{
    BulkAddForm, BusinessConfig, ControlKey, ControlSlot, Severity, Toasts, UserActionKind,
    UserActionsCompute, UsersListCompute, change_page, ensure_users_loaded, register_states,
    settle, submit_bulk_add, trigger_user_action,
};
use roster_states::{StateCtx, Time};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ctx_for(server: &MockServer) -> StateCtx {
    let mut ctx = StateCtx::new();
    register_states(&mut ctx, BusinessConfig::new(server.uri()));
    ctx
}

/// Syncs and settles until `done` holds, or panics after ~2s.
async fn settle_until(ctx: &mut StateCtx, done: impl Fn(&StateCtx) -> bool) {
    for _ in 0..200 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        ctx.sync_computes();
        settle(ctx);
        if done(ctx) {
            return;
        }
    }
    panic!("condition not reached in time");
}

fn toast(ctx: &StateCtx) -> Option<(String, Severity)> {
    let now = ctx.state::<Time>().now();
    ctx.state::<Toasts>()
        .current(now)
        .map(|popup| (popup.message.clone(), popup.severity))
}

async fn mount_users(server: &MockServer, page: &str, users: serde_json::Value, pages: u32) {
    Mock::given(method("GET"))
        .and(path("/api/manage/users"))
        .and(query_param("accepted_page", page))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accepted": users,
            "invited": [],
            "accepted_pages": pages
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_promote_success_toasts_and_refreshes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/manage/promote-user-to-admin"))
        .and(body_json(json!({"user_email": "a@x.io"})))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(50)))
        .expect(1)
        .mount(&server)
        .await;
    mount_users(
        &server,
        "0",
        json!([{"email": "a@x.io", "role": "admin", "status": "live"}]),
        1,
    )
    .await;

    let mut ctx = ctx_for(&server);
    let key = ControlKey::new("a@x.io", ControlSlot::Role);

    assert!(trigger_user_action(&mut ctx, UserActionKind::Promote, "a@x.io"));
    assert!(ctx.state::<UserActionsCompute>().is_in_flight(&key));
    assert!(
        !trigger_user_action(&mut ctx, UserActionKind::Promote, "a@x.io"),
        "second click while in flight must be ignored"
    );

    settle_until(&mut ctx, |ctx| {
        ctx.state::<UsersListCompute>()
            .users()
            .first()
            .is_some_and(|user| user.role.is_admin())
    })
    .await;

    assert_eq!(
        toast(&ctx),
        Some((
            "User promoted to admin user!".to_owned(),
            Severity::Success
        ))
    );
    assert!(ctx.state::<UserActionsCompute>().control(&key).is_none());
}

#[tokio::test]
async fn test_promote_failure_toasts_without_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/manage/promote-user-to-admin"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "email not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/manage/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accepted": []})))
        .expect(0)
        .mount(&server)
        .await;

    let mut ctx = ctx_for(&server);
    trigger_user_action(&mut ctx, UserActionKind::Promote, "ghost@x.io");

    settle_until(&mut ctx, |ctx| toast(ctx).is_some()).await;

    assert_eq!(
        toast(&ctx),
        Some((
            "Unable to promote user - email not found".to_owned(),
            Severity::Error
        ))
    );
    assert_eq!(ctx.state::<UserActionsCompute>().in_flight_count(), 0);
}

#[tokio::test]
async fn test_rows_run_independently() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/manage/admin/deactivate-user"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(100)))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/manage/demote-admin-to-basic"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(100)))
        .expect(1)
        .mount(&server)
        .await;
    mount_users(&server, "0", json!([]), 1).await;

    let mut ctx = ctx_for(&server);
    assert!(trigger_user_action(&mut ctx, UserActionKind::Deactivate, "a@x.io"));
    assert!(trigger_user_action(&mut ctx, UserActionKind::Deactivate, "b@x.io"));
    assert!(trigger_user_action(&mut ctx, UserActionKind::Demote, "a@x.io"));
    assert_eq!(ctx.state::<UserActionsCompute>().in_flight_count(), 3);

    settle_until(&mut ctx, |ctx| {
        ctx.state::<UserActionsCompute>().in_flight_count() == 0
    })
    .await;
}

#[tokio::test]
async fn test_list_keeps_page_on_error_and_changes_page() {
    let server = MockServer::start().await;

    mount_users(
        &server,
        "0",
        json!([{"email": "a@x.io", "role": "basic", "status": "live"}]),
        3,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/api/manage/users"))
        .and(query_param("accepted_page", "1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let mut ctx = ctx_for(&server);
    assert!(ensure_users_loaded(&mut ctx));
    assert!(!ensure_users_loaded(&mut ctx), "only the first call loads");

    settle_until(&mut ctx, |ctx| ctx.state::<UsersListCompute>().page().is_some()).await;
    assert_eq!(ctx.state::<UsersListCompute>().page().unwrap().total_pages, 3);

    change_page(&mut ctx, 1);
    settle_until(&mut ctx, |ctx| !ctx.state::<UsersListCompute>().is_loading()).await;

    let list = ctx.state::<UsersListCompute>();
    assert_eq!(list.error_message(), Some("maintenance"));
    assert_eq!(list.users()[0].email, "a@x.io");
}

#[tokio::test]
async fn test_bulk_add_success_resets_form() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/manage/admin/users"))
        .and(body_json(json!({"emails": ["a@b.c", "d@e.f"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(2)))
        .expect(1)
        .mount(&server)
        .await;
    mount_users(&server, "0", json!([]), 1).await;

    let mut ctx = ctx_for(&server);
    ctx.update::<BulkAddForm>(|form| {
        form.open = true;
        form.set_value("a@b.c\n d@e.f");
    });

    assert!(submit_bulk_add(&mut ctx));
    assert!(ctx.state::<BulkAddForm>().submitting);
    assert!(!submit_bulk_add(&mut ctx));

    settle_until(&mut ctx, |ctx| toast(ctx).is_some()).await;

    assert_eq!(
        toast(&ctx),
        Some(("2 users invited!".to_owned(), Severity::Success))
    );
    assert_eq!(ctx.state::<BulkAddForm>(), &BulkAddForm::default());
}

#[tokio::test]
async fn test_bulk_add_failure_keeps_value() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/manage/admin/users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "quota reached"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut ctx = ctx_for(&server);
    ctx.update::<BulkAddForm>(|form| form.set_value("a@b.c"));
    assert!(submit_bulk_add(&mut ctx));

    settle_until(&mut ctx, |ctx| toast(ctx).is_some()).await;

    assert_eq!(
        toast(&ctx),
        Some((
            "Unable to add users - quota reached".to_owned(),
            Severity::Error
        ))
    );
    let form = ctx.state::<BulkAddForm>();
    assert_eq!(form.value, "a@b.c");
    assert!(form.can_submit());
}

#[tokio::test]
async fn test_invalid_bulk_add_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/manage/admin/users"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut ctx = ctx_for(&server);
    ctx.update::<BulkAddForm>(|form| form.set_value("a@b.c not-an-email"));

    assert!(!submit_bulk_add(&mut ctx));
    assert_eq!(
        ctx.state::<BulkAddForm>().visible_error(),
        Some("not-an-email is not a valid email")
    );
}

#[tokio::test]
async fn test_toast_expires_with_time_state() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/manage/admin/remove-invited-user"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_users(&server, "0", json!([]), 1).await;

    let mut ctx = ctx_for(&server);
    let start = Utc::now();
    ctx.update::<Time>(|time| time.set(start));

    trigger_user_action(&mut ctx, UserActionKind::Uninvite, "new@x.io");
    settle_until(&mut ctx, |ctx| toast(ctx).is_some()).await;
    assert_eq!(
        toast(&ctx),
        Some(("User uninvited!".to_owned(), Severity::Success))
    );

    ctx.update::<Time>(|time| time.set(start + TimeDelta::seconds(5)));
    settle(&mut ctx);
    assert_eq!(toast(&ctx), None);
}
