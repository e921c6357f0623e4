use std::time::Duration;

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use pretty_assertions::assert_eq;
use tally_core::{Activity, Project, ReportEntry};
use tally_portal::{PortalClient, PortalError, Session};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DASHBOARD: &str = include_str!("fixtures/dashboard.html");
const SALARY: &str = include_str!("fixtures/salary.html");
const BIRTHDAYS: &str = include_str!("fixtures/birthdays.html");
const HISTORY: &str = include_str!("fixtures/history.html");
const HISTORY_EMPTY: &str = include_str!("fixtures/history_empty.html");

fn client(server: &MockServer) -> PortalClient {
    PortalClient::with_base_url(server.uri(), Duration::from_secs(5))
        .unwrap()
        .with_session(Session::new("tok", "sid"))
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(body)
}

async fn mount_blocks(server: &MockServer, activations: u64) {
    Mock::given(method("GET"))
        .and(path("/dashboard/"))
        .respond_with(html(DASHBOARD))
        .expect(activations)
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dashboard/update/"))
        .and(body_string_contains("id=318"))
        .and(body_string_contains("user_salary_block=on"))
        .respond_with(ResponseTemplate::new(200))
        .expect(activations)
        .mount(server)
        .await;
}

fn submitted() -> ReportEntry {
    ReportEntry {
        report_date: NaiveDate::from_ymd_opt(2021, 5, 17).unwrap(),
        project: Project {
            id: "3".into(),
            name: "Egg Inc.".into(),
        },
        activity: Activity::Development,
        name: "Fix login".into(),
        description: "Session expiry".into(),
        status: 100,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        span: TimeDelta::hours(2),
        ..ReportEntry::default()
    }
}

// ── Login ──────────────────────────────────────────────────────────

#[tokio::test]
async fn login_collects_both_cookies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login/"))
        .respond_with(html("<form></form>").append_header("set-cookie", "csrftoken=first; Path=/"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login/"))
        .and(header("cookie", "csrftoken=first"))
        .and(body_string_contains("csrfmiddlewaretoken=first"))
        .and(body_string_contains("username=jane"))
        .respond_with(
            ResponseTemplate::new(302)
                .append_header("set-cookie", "csrftoken=second; Path=/")
                .append_header("set-cookie", "sessionid=sess; HttpOnly; Path=/"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let anonymous = PortalClient::with_base_url(server.uri(), Duration::from_secs(5)).unwrap();
    let session = anonymous.login("jane", "secret").await.unwrap();

    assert_eq!(session.csrf_token(), "second");
    assert_eq!(session.session_id(), "sess");
    assert!(!anonymous.session().is_authenticated());
}

#[tokio::test]
async fn login_without_session_cookie_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login/"))
        .respond_with(html("<form></form>").append_header("set-cookie", "csrftoken=first"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/login/"))
        .respond_with(html("<p>Please enter a correct username and password.</p>"))
        .mount(&server)
        .await;

    let anonymous = PortalClient::with_base_url(server.uri(), Duration::from_secs(5)).unwrap();
    let err = anonymous.login("jane", "wrong").await.unwrap_err();
    assert!(matches!(err, PortalError::BadCredentials));
}

// ── Dashboard blocks ───────────────────────────────────────────────

#[tokio::test]
async fn blocks_are_activated_once_per_session() {
    let server = MockServer::start().await;
    mount_blocks(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/dashboard/block/user_salary_block/"))
        .and(header("x-csrftoken", "tok"))
        .respond_with(html(SALARY))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dashboard/block/birthdays_block/"))
        .respond_with(html(BIRTHDAYS))
        .expect(1)
        .mount(&server)
        .await;

    let portal = client(&server);
    let (may, april, birthdays) = tokio::try_join!(
        portal.salary(2021, 5),
        portal.salary(2021, 4),
        portal.birthdays(),
    )
    .unwrap();

    assert_eq!(may.month, 5);
    assert_eq!(april.month, 4);
    assert_eq!(may.summary(), "May, 2021: got $2100.00");
    assert_eq!(birthdays[0].name, "Jane Roe");
}

#[tokio::test]
async fn dashboard_without_block_form_is_no_node() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/"))
        .respond_with(html("<h1>Dashboard</h1>"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dashboard/update/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).salary(2021, 5).await.unwrap_err();
    assert!(matches!(err, PortalError::NoNode(_)));
}

#[tokio::test]
async fn empty_block_id_is_no_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/"))
        .respond_with(html(&DASHBOARD.replace(r#"value="318""#, r#"value="""#)))
        .mount(&server)
        .await;

    let err = client(&server).birthdays().await.unwrap_err();
    assert!(matches!(err, PortalError::NoId));
}

#[tokio::test]
async fn activation_with_body_is_non_empty_and_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/"))
        .respond_with(html(DASHBOARD))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dashboard/update/"))
        .respond_with(html("not allowed"))
        .expect(2)
        .mount(&server)
        .await;

    let portal = client(&server);
    for _ in 0..2 {
        let err = portal.ensure_blocks_on().await.unwrap_err();
        assert!(matches!(err, PortalError::NonEmpty(body) if body == "not allowed"));
    }
}

// ── History and reports ────────────────────────────────────────────

#[tokio::test]
async fn expired_session_surfaces_as_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/history/"))
        .respond_with(ResponseTemplate::new(302).append_header("location", "/login/?next=/history/"))
        .mount(&server)
        .await;

    let err = client(&server).history(2021, 5).await.unwrap_err();
    assert!(matches!(err, PortalError::BadStatus(line) if line == "302 Found"));
}

#[tokio::test]
async fn history_is_posted_by_year_and_month() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/history/"))
        .and(body_string_contains("year=2021"))
        .and(body_string_contains("month=5"))
        .respond_with(html(HISTORY))
        .expect(1)
        .mount(&server)
        .await;

    let history = client(&server).history(2021, 5).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, "101");
    assert_eq!(history[0].activity, Activity::Development);
}

#[tokio::test]
async fn report_returns_the_stored_entry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/report/"))
        .and(body_string_contains("project_id=3"))
        .and(body_string_contains("activity=1"))
        .and(body_string_contains("task_name=Fix%20login"))
        .and(body_string_contains("start_report_hours=09"))
        .and(body_string_contains("overtime=1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/history/"))
        .respond_with(html(HISTORY))
        .mount(&server)
        .await;

    let stored = client(&server).report(&submitted()).await.unwrap();
    assert_eq!(stored.id, "101");
    assert_eq!(stored.publish_date, NaiveDate::from_ymd_opt(2021, 5, 17));
}

#[tokio::test]
async fn report_answered_with_a_page_is_bad_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/report/"))
        .respond_with(html("<ul class=\"errorlist\"><li>Invalid time</li></ul>"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/history/"))
        .respond_with(html(HISTORY))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).report(&submitted()).await.unwrap_err();
    assert!(matches!(err, PortalError::BadStatus(line) if line == "200 OK"));
}

#[tokio::test]
async fn dropped_report_is_no_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/report/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/history/"))
        .respond_with(html(HISTORY_EMPTY))
        .mount(&server)
        .await;

    let err = client(&server).report(&submitted()).await.unwrap_err();
    assert!(matches!(err, PortalError::NoReport(_)));
}

#[tokio::test]
async fn altered_report_is_no_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/report/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/history/"))
        .respond_with(html(HISTORY))
        .mount(&server)
        .await;

    let mut entry = submitted();
    entry.status = 50;
    let err = client(&server).report(&entry).await.unwrap_err();
    assert!(matches!(err, PortalError::NoReport(_)));
}

#[tokio::test]
async fn incomplete_entry_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/report/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut entry = submitted();
    entry.description.clear();
    let err = client(&server).report(&entry).await.unwrap_err();
    assert!(matches!(err, PortalError::Report(tally_core::ReportError::NoDescription)));
}

// ── Profiles ───────────────────────────────────────────────────────

#[tokio::test]
async fn person_info_takes_id_from_the_argument() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dashboard/user_profile/42/"))
        .respond_with(html(
            r#"<h1>Jane Roe</h1><table><tr><td>Team</td><td>Core</td></tr>
               <tr><td>Photo</td><td><img src="/media/jane.png"></td></tr></table>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/media/jane.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x89, b'P', b'N', b'G']))
        .mount(&server)
        .await;

    let portal = client(&server);
    let person = portal.person_info(42).await.unwrap();
    assert_eq!(person.id, 42);
    assert_eq!(person.team, "Core");

    let picture = portal.picture(&person.photo_url).await.unwrap();
    assert_eq!(picture, vec![0x89, b'P', b'N', b'G']);
}
