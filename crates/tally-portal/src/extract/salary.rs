use scraper::Html;
use tally_core::Salary;

use super::{FieldSpec, Locator, all_numbers, dirty_float, extract_fields};
use crate::error::ExtractError;

const fn next_to(label: &'static str, offset: usize) -> Locator {
    Locator::Labelled {
        label,
        exact: true,
        offset,
    }
}

macro_rules! money {
    ($name:literal, $locator:expr, $field:ident) => {
        FieldSpec::text($name, $locator, |s: &mut Salary, v| {
            s.$field = dirty_float(v);
            Ok(())
        })
        .required()
    };
}

fn fields() -> [FieldSpec<Salary>; 12] {
    let rate_cell = |label| Locator::Labelled {
        label,
        exact: false,
        offset: 0,
    };

    [
        money!("rate per hour", rate_cell("rate per hour:"), rate_per_hour),
        money!("rate", rate_cell("rate:"), rate),
        money!("working days", next_to("Working days in month:", 1), working_days_in_month),
        money!("hours by current day", next_to("Hours By Current Day", 1), hours_by_current_day),
        money!("dollars by current day", next_to("Hours By Current Day", 2), dollars_by_current_day),
        money!("expected salary", next_to("Expected Salary", 2), expected_salary),
        money!("vacation hours", next_to("Vacations", 1), vacation_hours),
        money!("vacation dollars", next_to("Vacations", 2), vacation_dollars),
        money!("overtime hours", next_to("Overtimes", 1), overtime_hours),
        money!("overtime dollars", next_to("Overtimes", 2), overtime_dollars),
        money!("bonus dollars", next_to("Bonuses", 2), bonus_dollars),
        FieldSpec::text("total / paid", next_to("Total / Paid", 1), |s: &mut Salary, v| {
            match all_numbers(v).as_slice() {
                [total, paid] => {
                    s.total = *total;
                    s.paid = *paid;
                    Ok(())
                }
                _ => Err("expected two numbers".into()),
            }
        })
        .required(),
    ]
}

/// Parse the salary block for `year`/`month`.
///
/// # Errors
///
/// [`ExtractError::NodeNotFound`] for a missing labelled cell and
/// [`ExtractError::BadTotalPaid`] when the `Total / Paid` cell does not hold
/// exactly two numbers.
pub fn parse_salary(doc: &Html, year: i32, month: u32) -> Result<Salary, ExtractError> {
    let mut salary = Salary {
        year,
        month,
        ..Salary::default()
    };

    extract_fields(doc.root_element(), &fields(), &mut salary).map_err(|err| match err {
        ExtractError::Parse {
            field: "total / paid",
            value,
            ..
        } => ExtractError::BadTotalPaid(value),
        other => other,
    })?;

    Ok(salary)
}
