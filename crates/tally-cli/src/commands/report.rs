use anyhow::Context;
use chrono::{Datelike, NaiveDate, NaiveTime};
use tally_core::ReportDraft;
use tally_core::span::parse_span;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::context::{AppContext, today};
use crate::output::output;

/// `YYYY-MM-DD`, or `MM-DD` in the year of `today`.
fn parse_report_date(text: Option<&str>, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let Some(text) = text.map(str::trim) else {
        return Ok(today);
    };

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-{text}", today.year()), "%Y-%m-%d"))
        .with_context(|| format!("invalid --for '{text}': expected MM-DD or YYYY-MM-DD"))
}

fn parse_clock(flag: &str, text: Option<&str>) -> anyhow::Result<Option<NaiveTime>> {
    text.map(|text| {
        NaiveTime::parse_from_str(text.trim(), "%H:%M")
            .with_context(|| format!("invalid --{flag} '{text}': expected HH:MM"))
    })
    .transpose()
}

fn build_draft(args: &ReportArgs, default_project: &str, today: NaiveDate) -> anyhow::Result<ReportDraft> {
    let project = args
        .proj
        .as_deref()
        .unwrap_or(default_project)
        .trim()
        .to_string();
    if project.is_empty() {
        anyhow::bail!("no project given; pass --proj or run 'tly config set-project <name>'");
    }

    let span = args
        .span
        .as_deref()
        .map(|text| parse_span(text).with_context(|| format!("invalid --span '{text}'")))
        .transpose()?;

    let draft = ReportDraft::new(
        parse_report_date(args.for_date.as_deref(), today)?,
        project,
        args.message.trim(),
    )
    .with_title(args.title.as_deref().unwrap_or_default().trim())
    .with_range(
        parse_clock("from", args.from.as_deref())?,
        parse_clock("to", args.to.as_deref())?,
    )
    .with_span(span)
    .set_activity(&args.activity)?
    .set_status(args.status)?;

    draft.time_spec()?;
    Ok(draft)
}

pub async fn handle(args: &ReportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let draft = build_draft(args, &ctx.config.portal.default_project, today())?;
    let stored = ctx.portal.submit_report(draft).await?;

    tracing::debug!(id = %stored.id, date = %stored.report_date, "reported");
    output(&stored, flags.format)
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tally_core::{Activity, ReportError};

    use super::*;

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 5, 17).unwrap()
    }

    fn args() -> ReportArgs {
        ReportArgs {
            proj: None,
            span: Some("2h".into()),
            from: None,
            to: None,
            status: 100,
            activity: "dev".into(),
            title: None,
            message: "Session expiry".into(),
            for_date: None,
        }
    }

    #[rstest]
    #[case(None, (2021, 5, 17))]
    #[case(Some("05-03"), (2021, 5, 3))]
    #[case(Some("2020-12-31"), (2020, 12, 31))]
    fn report_dates(#[case] text: Option<&str>, #[case] expected: (i32, u32, u32)) {
        let (y, m, d) = expected;
        assert_eq!(
            parse_report_date(text, now()).unwrap(),
            NaiveDate::from_ymd_opt(y, m, d).unwrap()
        );
    }

    #[test]
    fn bad_report_date_is_rejected() {
        assert!(parse_report_date(Some("17/05"), now()).is_err());
    }

    #[test]
    fn draft_falls_back_to_default_project() {
        let draft = build_draft(&args(), "egg inc", now()).unwrap();
        assert_eq!(draft.project.name, "egg inc");
        assert_eq!(draft.activity, Activity::Development);
        assert_eq!(draft.span, Some(TimeDelta::hours(2)));
        assert_eq!(draft.report_date, now());
    }

    #[test]
    fn draft_without_any_project_fails() {
        let err = build_draft(&args(), "", now()).unwrap_err();
        assert!(err.to_string().contains("no project given"));
    }

    #[test]
    fn draft_validates_status_before_any_request() {
        let mut args = args();
        args.status = 55;
        let err = build_draft(&args, "egg", now()).unwrap_err();
        assert!(matches!(err.downcast_ref::<ReportError>(), Some(ReportError::StatusNotRound)));
    }

    #[test]
    fn draft_needs_some_time() {
        let mut args = args();
        args.span = None;
        let err = build_draft(&args, "egg", now()).unwrap_err();
        assert!(matches!(err.downcast_ref::<ReportError>(), Some(ReportError::NoTime)));
    }

    #[test]
    fn draft_takes_an_explicit_range() {
        let mut args = args();
        args.span = None;
        args.from = Some("09:00".into());
        args.to = Some("10:30".into());
        let draft = build_draft(&args, "egg", now()).unwrap();
        assert_eq!(draft.start_time, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(draft.end_time, NaiveTime::from_hms_opt(10, 30, 0));
    }
}
