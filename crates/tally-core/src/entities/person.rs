use std::fmt;
use std::ops::Deref;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day and month of a birthday; the portal never shows the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Birthday {
    pub month: u32,
    pub day: u32,
}

impl Birthday {
    /// Checked against a leap year so that 29 February is accepted.
    #[must_use]
    pub fn new(month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(2000, month, day).map(|_| Self { month, day })
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match NaiveDate::from_ymd_opt(2000, self.month, self.day) {
            Some(date) => write!(f, "{}", date.format("%b %e")),
            None => write!(f, "{:02}-{:02}", self.month, self.day),
        }
    }
}

/// A colleague, either from the birthdays block or from a profile page.
///
/// Birthdays rows fill `id`, `url`, `name`, `birthday` and `team`; the
/// profile page fills the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub url: String,
    pub status: String,
    pub name: String,
    pub email: String,
    pub skype: String,
    pub grade: String,
    pub birthday: Option<Birthday>,
    pub team: String,
    pub english_level: String,
    pub english_details: String,
    pub photo_url: String,
}

impl Person {
    /// Cells of one row in the birthdays listing.
    #[must_use]
    pub fn row(&self) -> [String; 4] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.team.clone(),
            self.birthday.map(|b| b.to_string()).unwrap_or_default(),
        ]
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;

        let status = self.status.split_whitespace().collect::<Vec<_>>().join(" ");
        let status = status.trim_end_matches(',');
        if !status.is_empty() {
            write!(f, " ({status})")?;
        }

        write!(f, "\nTeam: {}\nEmail: {}\nSkype: {}", self.team, self.email, self.skype)?;

        for (label, value) in [
            ("Grade", &self.grade),
            ("English level", &self.english_level),
            ("English details", &self.english_details),
        ] {
            if !value.is_empty() {
                write!(f, "\n{label}: {value}")?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Persons(Vec<Person>);

impl Persons {
    #[must_use]
    pub const fn new(persons: Vec<Person>) -> Self {
        Self(persons)
    }
}

impl Deref for Persons {
    type Target = [Person];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Person>> for Persons {
    fn from(persons: Vec<Person>) -> Self {
        Self(persons)
    }
}

impl fmt::Display for Persons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>6}  {:<28} {:<20} BIRTHDAY", "ID", "NAME", "TEAM")?;
        for person in &self.0 {
            let [id, name, team, birthday] = person.row();
            write!(f, "\n{id:>6}  {name:<28} {team:<20} {birthday}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn birthday_renders_short_month() {
        assert_eq!(Birthday::new(3, 7).unwrap().to_string(), "Mar  7");
        assert_eq!(Birthday::new(12, 24).unwrap().to_string(), "Dec 24");
        assert!(Birthday::new(2, 29).is_some());
        assert!(Birthday::new(2, 30).is_none());
    }

    #[test]
    fn profile_collapses_status_whitespace() {
        let person = Person {
            name: "Jane Doe".into(),
            status: "  Working,\n   remote,  ".into(),
            team: "Core".into(),
            email: "jane@example.com".into(),
            skype: "jane.d".into(),
            grade: "Senior".into(),
            ..Person::default()
        };

        let rendered = person.to_string();
        assert!(rendered.starts_with("Jane Doe (Working, remote)\nTeam: Core"));
        assert!(rendered.contains("Grade: Senior"));
        assert!(!rendered.contains("English level"));
    }
}
