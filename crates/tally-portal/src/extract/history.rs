use chrono::{Datelike, NaiveDate, NaiveTime};
use scraper::Html;
use tally_core::span::parse_span;
use tally_core::{Activity, Project, ReportEntries, ReportEntry};

use super::{FieldSpec, Locator, column_count, dirty_int, extract_fields, select_all};
use crate::error::ExtractError;

/// History rows narrower than this are headers, totals or spacers.
const ROW_CELLS: usize = 11;

fn time(v: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(v, "%H:%M").map_err(|err| err.to_string())
}

/// `2 Jan, Mon 15:04` carries no year; take the report's year and roll over
/// when that would put publishing before the reported day.
fn publish_date(v: &str, reported: NaiveDate) -> Result<Option<NaiveDate>, String> {
    let Some(day_month) = v.split(',').next().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let parse = |year: i32| NaiveDate::parse_from_str(&format!("{day_month} {year}"), "%d %b %Y");
    let date = parse(reported.year()).map_err(|err| err.to_string())?;
    if date < reported {
        return parse(reported.year() + 1)
            .map(Some)
            .map_err(|err| err.to_string());
    }
    Ok(Some(date))
}

fn fields() -> [FieldSpec<ReportEntry>; 11] {
    [
        FieldSpec::text("report date", Locator::Column(3), |e: &mut ReportEntry, v| {
            e.report_date = NaiveDate::parse_from_str(v, "%d %b, %Y").map_err(|err| err.to_string())?;
            Ok(())
        })
        .required(),
        FieldSpec::text("publish date", Locator::Column(2), |e: &mut ReportEntry, v| {
            e.publish_date = publish_date(v, e.report_date)?;
            Ok(())
        }),
        FieldSpec::text("id", Locator::Column(1), |e: &mut ReportEntry, v| {
            e.id = v.to_string();
            Ok(())
        })
        .required(),
        FieldSpec::text("project", Locator::Column(4), |e: &mut ReportEntry, v| {
            e.project = Project::named(v);
            Ok(())
        }),
        FieldSpec::text(
            "activity",
            Locator::InColumn(5, "option[selected]"),
            |e: &mut ReportEntry, v| {
                e.activity = Activity::from_name(v).ok_or("unknown activity")?;
                Ok(())
            },
        )
        .required(),
        FieldSpec::text("name", Locator::Column(6), |e: &mut ReportEntry, v| {
            e.name = v.to_string();
            Ok(())
        }),
        FieldSpec::text("description", Locator::Column(7), |e: &mut ReportEntry, v| {
            e.description = v.to_string();
            Ok(())
        }),
        FieldSpec::text("status", Locator::Column(8), |e: &mut ReportEntry, v| {
            e.status = u8::try_from(dirty_int(v)).map_err(|err| err.to_string())?;
            Ok(())
        }),
        FieldSpec::text("start time", Locator::Column(9), |e: &mut ReportEntry, v| {
            e.start_time = time(v)?;
            Ok(())
        })
        .required(),
        FieldSpec::text("end time", Locator::Column(10), |e: &mut ReportEntry, v| {
            e.end_time = time(v)?;
            Ok(())
        })
        .required(),
        FieldSpec::text("span", Locator::Column(11), |e: &mut ReportEntry, v| {
            e.span = parse_span(v).ok_or("not a span")?;
            Ok(())
        })
        .required(),
    ]
}

/// Parse every entry of the `/history/` table, in page order.
///
/// # Errors
///
/// The first row whose fields fail to extract.
pub fn parse_history(doc: &Html) -> Result<ReportEntries, ExtractError> {
    let fields = fields();
    let mut entries = Vec::new();

    for row in select_all(doc.root_element(), "table#history tbody tr")? {
        if column_count(row) < ROW_CELLS {
            continue;
        }
        let mut entry = ReportEntry::default();
        extract_fields(row, &fields, &mut entry)?;
        entries.push(entry);
    }

    tracing::debug!(entries = entries.len(), "parsed history");
    Ok(ReportEntries::new(entries))
}
