use std::time::Duration;

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use pretty_assertions::assert_eq;
use tally_core::{ReportDraft, ReportError};
use tally_portal::{PortalClient, PortalError, Session};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DASHBOARD: &str = include_str!("fixtures/dashboard.html");
const SALARY: &str = include_str!("fixtures/salary.html");
const HISTORY: &str = include_str!("fixtures/history.html");
const HISTORY_EMPTY: &str = include_str!("fixtures/history_empty.html");
const REPORT_FORM: &str = include_str!("fixtures/report.html");
const BREAKS: &str = include_str!("fixtures/breaks.html");

fn client(server: &MockServer) -> PortalClient {
    PortalClient::with_base_url(server.uri(), Duration::from_secs(5))
        .unwrap()
        .with_session(Session::new("tok", "sid"))
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(body)
}

async fn mount_page(server: &MockServer, verb: &str, route: &str, body: &str) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 5, 17).unwrap()
}

#[tokio::test]
async fn dashboard_joins_month_views() {
    let server = MockServer::start().await;
    mount_page(&server, "GET", "/dashboard/", DASHBOARD).await;
    Mock::given(method("POST"))
        .and(path("/dashboard/update/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dashboard/block/user_salary_block/"))
        .and(body_string_contains("month=4"))
        .respond_with(html(&SALARY.replace("$2,100.00 / $2,100.00", "$1,900.00 / $1,900.00")))
        .mount(&server)
        .await;
    mount_page(&server, "POST", "/dashboard/block/user_salary_block/", SALARY).await;
    mount_page(&server, "POST", "/history/", HISTORY).await;
    Mock::given(method("POST"))
        .and(path("/breaks/"))
        .and(body_string_contains("year_changed=true"))
        .respond_with(html(BREAKS))
        .expect(1)
        .mount(&server)
        .await;

    let dashboard = client(&server).dashboard(day()).await.unwrap();

    assert_eq!(dashboard.last_month.month, 4);
    assert_eq!(dashboard.last_month.summary(), "April, 2021: got $1900.00");
    assert_eq!(dashboard.month.salary.month, 5);
    assert_eq!(dashboard.month.history.len(), 1);
    assert_eq!(dashboard.month.holidays.len(), 2);

    // 3-4 May are vacation, 10 May is a holiday, 17 May is reported.
    let (missed, pending) = dashboard.month.need_reporting();
    assert!(!missed.contains(&NaiveDate::from_ymd_opt(2021, 5, 3).unwrap()));
    assert!(!missed.contains(&NaiveDate::from_ymd_opt(2021, 5, 10).unwrap()));
    assert!(missed.contains(&NaiveDate::from_ymd_opt(2021, 5, 5).unwrap()));
    assert!(pending.contains(&NaiveDate::from_ymd_opt(2021, 5, 14).unwrap()));
    assert!(!pending.contains(&day()));
}

#[tokio::test]
async fn first_failure_fails_the_dashboard() {
    let server = MockServer::start().await;
    mount_page(&server, "GET", "/dashboard/", DASHBOARD).await;
    Mock::given(method("POST"))
        .and(path("/dashboard/update/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    mount_page(&server, "POST", "/dashboard/block/user_salary_block/", SALARY).await;
    mount_page(&server, "POST", "/history/", HISTORY).await;
    Mock::given(method("POST"))
        .and(path("/breaks/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).dashboard(day()).await.unwrap_err();
    assert!(matches!(err, PortalError::BadStatus(line) if line == "500 Internal Server Error"));
}

#[tokio::test]
async fn year_stat_keeps_month_order() {
    let server = MockServer::start().await;
    mount_page(&server, "GET", "/dashboard/", DASHBOARD).await;
    Mock::given(method("POST"))
        .and(path("/dashboard/update/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dashboard/block/user_salary_block/"))
        .respond_with(html(SALARY))
        .expect(5)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/history/"))
        .respond_with(html(HISTORY_EMPTY))
        .expect(5)
        .mount(&server)
        .await;

    let stat = client(&server).year_stat(2021, 5).await.unwrap();

    assert_eq!(stat.end_month, 5);
    assert_eq!(
        stat.salaries.iter().map(|s| s.month).collect::<Vec<_>>(),
        vec![1, 2, 3, 4, 5]
    );
    assert_eq!(stat.histories.len(), 5);
    assert!((stat.salaries.paid() - 10_500.0).abs() < 1e-9);
}

#[tokio::test]
async fn submit_report_aligns_then_verifies() {
    let server = MockServer::start().await;
    mount_page(&server, "GET", "/report/", REPORT_FORM).await;
    Mock::given(method("POST"))
        .and(path("/history/"))
        .respond_with(html(HISTORY_EMPTY))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/history/"))
        .respond_with(html(HISTORY))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/report/"))
        .and(body_string_contains("project_id=3"))
        .and(body_string_contains("start_report_hours=09"))
        .and(body_string_contains("end_report_hours=11"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let draft = ReportDraft::new(day(), "egg inc", "Session expiry")
        .with_title("Fix login")
        .with_span(Some(TimeDelta::hours(2)));
    let stored = client(&server).submit_report(draft).await.unwrap();

    assert_eq!(stored.id, "101");
    assert_eq!(stored.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    assert_eq!(stored.end_time, NaiveTime::from_hms_opt(11, 0, 0).unwrap());
}

#[tokio::test]
async fn ambiguous_project_never_submits() {
    let server = MockServer::start().await;
    mount_page(&server, "GET", "/report/", REPORT_FORM).await;
    mount_page(&server, "POST", "/history/", HISTORY_EMPTY).await;
    Mock::given(method("POST"))
        .and(path("/report/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let draft = ReportDraft::new(day(), "egg", "Session expiry").with_span(Some(TimeDelta::hours(2)));
    let err = client(&server).submit_report(draft).await.unwrap_err();

    assert!(matches!(
        err,
        PortalError::Report(ReportError::TooPermissive { matches, .. }) if matches.len() == 2
    ));
}

#[tokio::test]
async fn overlapping_range_never_submits() {
    let server = MockServer::start().await;
    mount_page(&server, "GET", "/report/", REPORT_FORM).await;
    mount_page(&server, "POST", "/history/", HISTORY).await;
    Mock::given(method("POST"))
        .and(path("/report/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let draft = ReportDraft::new(day(), "internal", "Planning").with_range(
        NaiveTime::from_hms_opt(10, 0, 0),
        NaiveTime::from_hms_opt(12, 0, 0),
    );
    let err = client(&server).submit_report(draft).await.unwrap_err();

    assert!(matches!(err, PortalError::Report(ReportError::Overlaps { ids }) if ids == ["101"]));
}
