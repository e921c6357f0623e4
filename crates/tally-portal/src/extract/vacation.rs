use chrono::NaiveDate;
use scraper::{ElementRef, Html};
use tally_core::{Holiday, Holidays, Vacation, Vacations};

use super::{FieldSpec, Locator, dirty_float, extract_fields, select_all, text_of};
use crate::error::ExtractError;

/// Compensation rows are payouts, not days away.
const COMPENSATION: &str = "Vacation Compensation";

fn date(v: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(v, "%d %B %Y").map_err(|err| err.to_string())
}

fn cell_text(row: ElementRef<'_>, n: usize) -> Result<String, ExtractError> {
    Ok(Locator::Column(n).find(row)?.map(text_of).unwrap_or_default())
}

fn vacation_fields() -> [FieldSpec<Vacation>; 7] {
    [
        FieldSpec::text("id", Locator::Column(1), |x: &mut Vacation, v| {
            x.id = v.to_string();
            Ok(())
        })
        .required(),
        FieldSpec::text("kind", Locator::Column(2), |x: &mut Vacation, v| {
            x.kind = v.to_string();
            Ok(())
        }),
        FieldSpec::text("start date", Locator::Column(3), |x: &mut Vacation, v| {
            x.start_date = date(v)?;
            Ok(())
        })
        .required(),
        FieldSpec::text("end date", Locator::Column(4), |x: &mut Vacation, v| {
            x.end_date = match v {
                "" | "-" => None,
                v => Some(date(v)?),
            };
            Ok(())
        }),
        FieldSpec::text("days", Locator::Column(5), |x: &mut Vacation, v| {
            x.span_days = dirty_float(v);
            Ok(())
        }),
        FieldSpec::text("status", Locator::Column(6), |x: &mut Vacation, v| {
            x.status = v.to_string();
            Ok(())
        }),
        FieldSpec::text("paid", Locator::Column(8), |x: &mut Vacation, v| {
            x.paid = v == "Paid";
            Ok(())
        }),
    ]
}

/// Parse the vacations table of the breaks page, skipping compensations.
///
/// # Errors
///
/// The first row without an id or a parsable start date.
pub fn parse_vacations(doc: &Html) -> Result<Vacations, ExtractError> {
    let fields = vacation_fields();
    let mut vacations = Vec::new();

    for row in select_all(doc.root_element(), "table#vacations tbody tr")? {
        if cell_text(row, 2)? == COMPENSATION {
            continue;
        }
        let mut vacation = Vacation::default();
        extract_fields(row, &fields, &mut vacation)?;
        vacations.push(vacation);
    }

    Ok(Vacations::new(vacations))
}

fn holiday_fields() -> [FieldSpec<Holiday>; 2] {
    [
        FieldSpec::text("date", Locator::Column(2), |h: &mut Holiday, v| {
            h.date = date(v)?;
            Ok(())
        })
        .required(),
        FieldSpec::text("name", Locator::Column(3), |h: &mut Holiday, v| {
            h.name = v.to_string();
            Ok(())
        }),
    ]
}

/// Parse the public holidays list of the breaks page.
///
/// Rows without a date (section headers) are skipped.
///
/// # Errors
///
/// The first dated row whose date does not parse.
pub fn parse_holidays(doc: &Html) -> Result<Holidays, ExtractError> {
    let fields = holiday_fields();
    let mut holidays = Vec::new();

    for row in select_all(doc.root_element(), "div.holidays_list tbody tr")? {
        if cell_text(row, 2)?.is_empty() {
            continue;
        }
        let mut holiday = Holiday {
            name: String::new(),
            date: NaiveDate::MIN,
        };
        extract_fields(row, &fields, &mut holiday)?;
        holidays.push(holiday);
    }

    Ok(Holidays::new(holidays))
}
