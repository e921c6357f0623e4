use chrono::{Datelike, NaiveDate};
use scraper::Html;
use tally_core::{Birthday, Person, Persons};

use super::{FieldSpec, Locator, extract_fields, select_all};
use crate::error::ExtractError;

/// Trailing numeric segment of a profile link.
fn id_from_url(url: &str) -> Result<u64, String> {
    let segment = url.trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    segment.parse().map_err(|_| format!("no id in '{url}'"))
}

fn birthday_fields() -> [FieldSpec<Person>; 4] {
    [
        FieldSpec::attr("profile link", Locator::InColumn(1, "a"), "href", |p: &mut Person, v| {
            p.id = id_from_url(v)?;
            p.url = v.to_string();
            Ok(())
        })
        .required(),
        FieldSpec::text("name", Locator::InColumn(1, "a"), |p: &mut Person, v| {
            p.name = v.to_string();
            Ok(())
        })
        .required(),
        FieldSpec::text("birthday", Locator::Column(2), |p: &mut Person, v| {
            let date = NaiveDate::parse_from_str(&format!("{v} 2000"), "%d %B %Y")
                .map_err(|err| err.to_string())?;
            p.birthday = Birthday::new(date.month(), date.day());
            Ok(())
        })
        .required(),
        FieldSpec::text("team", Locator::Column(3), |p: &mut Person, v| {
            p.team = v.to_string();
            Ok(())
        }),
    ]
}

/// Parse the dashboard birthdays block.
///
/// # Errors
///
/// The first row missing its profile link, name or birthday.
pub fn parse_birthdays(doc: &Html) -> Result<Persons, ExtractError> {
    let fields = birthday_fields();
    select_all(doc.root_element(), "#dashboard_birthdays_block tbody tr")?
        .into_iter()
        .map(|row| {
            let mut person = Person::default();
            extract_fields(row, &fields, &mut person)?;
            Ok(person)
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Persons::new)
}

const fn after(label: &'static str) -> Locator {
    Locator::Labelled {
        label,
        exact: false,
        offset: 1,
    }
}

macro_rules! labelled {
    ($name:literal, $label:literal, $field:ident) => {
        FieldSpec::text($name, after($label), |p: &mut Person, v| {
            p.$field = v.to_string();
            Ok(())
        })
    };
}

fn profile_fields() -> [FieldSpec<Person>; 9] {
    [
        FieldSpec::text("name", Locator::Css("h1"), |p: &mut Person, v| {
            p.name = v.to_string();
            Ok(())
        })
        .required(),
        FieldSpec::text("status", Locator::Css("div.status"), |p: &mut Person, v| {
            p.status = v.to_string();
            Ok(())
        }),
        labelled!("email", "Email", email),
        labelled!("skype", "Skype", skype),
        labelled!("team", "Team", team),
        labelled!("grade", "Grade", grade),
        labelled!("english level", "English Level", english_level),
        labelled!("english details", "English Details", english_details),
        FieldSpec::attr(
            "photo",
            Locator::InLabelled {
                label: "Photo",
                css: "img",
            },
            "src",
            |p: &mut Person, v| {
                p.photo_url = v.to_string();
                Ok(())
            },
        ),
    ]
}

/// Parse a `/dashboard/user_profile/{id}/` page.
///
/// # Errors
///
/// [`ExtractError::NodeNotFound`] when the page has no `h1` name.
pub fn parse_profile(doc: &Html, id: u64) -> Result<Person, ExtractError> {
    let mut person = Person {
        id,
        ..Person::default()
    };
    extract_fields(doc.root_element(), &profile_fields(), &mut person)?;
    Ok(person)
}
