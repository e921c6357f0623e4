//! Table-driven extraction of records from portal pages.
//!
//! Each record type declares an ordered table of [`FieldSpec`]s: where the
//! node is ([`Locator`]), what to read from it ([`Read`]), whether its
//! absence is fatal, and how to store the text. One walker,
//! [`extract_fields`], evaluates any table against a scope element and
//! reports the first failing field by name.
//!
//! Parsing is synchronous and works on `&str` bodies; `scraper::Html` never
//! crosses an await point.

mod history;
mod person;
mod project;
mod salary;
mod vacation;

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{ExtractError, PortalError};

pub use history::parse_history;
pub use person::{parse_birthdays, parse_profile};
pub use project::{parse_block_form_id, parse_projects};
pub use salary::parse_salary;
pub use vacation::{parse_holidays, parse_vacations};

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("number regex should compile"));

/// Where a field's node lives, relative to the scope element.
#[derive(Debug, Clone, Copy)]
pub enum Locator {
    /// The scope element itself.
    Scope,
    /// First descendant matching a CSS selector.
    Css(&'static str),
    /// The n-th (1-based) `td` child of a row.
    Column(usize),
    /// First match of a CSS selector inside the n-th `td` of a row.
    InColumn(usize, &'static str),
    /// A `td` whose text equals (`exact`) or contains `label`, then the
    /// `offset`-th following `td` sibling (`0` is the labelled cell).
    Labelled {
        label: &'static str,
        exact: bool,
        offset: usize,
    },
    /// First match of a CSS selector inside the cell following the `td`
    /// containing `label`.
    InLabelled {
        label: &'static str,
        css: &'static str,
    },
}

impl Locator {
    /// Find the node, or `None` when the page lacks it.
    ///
    /// # Errors
    ///
    /// [`ExtractError::Selector`] for a malformed built-in selector.
    pub fn find<'a>(&self, scope: ElementRef<'a>) -> Result<Option<ElementRef<'a>>, ExtractError> {
        Ok(match *self {
            Self::Scope => Some(scope),
            Self::Css(css) => first(scope, css)?,
            Self::Column(n) => column(scope, n),
            Self::InColumn(n, css) => match column(scope, n) {
                Some(cell) => first(cell, css)?,
                None => None,
            },
            Self::Labelled {
                label,
                exact,
                offset,
            } => labelled(scope, label, exact)?.and_then(|cell| sibling_cell(cell, offset)),
            Self::InLabelled { label, css } => {
                match labelled(scope, label, false)?.and_then(|cell| sibling_cell(cell, 1)) {
                    Some(cell) => first(cell, css)?,
                    None => None,
                }
            }
        })
    }

    fn describe(&self) -> String {
        match self {
            Self::Scope => "scope".to_string(),
            Self::Css(css) => (*css).to_string(),
            Self::Column(n) => format!("td[{n}]"),
            Self::InColumn(n, css) => format!("td[{n}] {css}"),
            Self::Labelled {
                label,
                exact,
                offset,
            } => {
                let op = if *exact { "=" } else { "~" };
                format!("td{op}\"{label}\" +{offset}")
            }
            Self::InLabelled { label, css } => format!("td~\"{label}\" +1 {css}"),
        }
    }
}

/// What to read from a located node.
#[derive(Debug, Clone, Copy)]
pub enum Read {
    /// Whitespace-trimmed text content.
    Text,
    /// Raw attribute value.
    Attr(&'static str),
}

/// Stores a field's text on the record, or explains why it does not parse.
pub type Apply<T> = fn(&mut T, &str) -> Result<(), String>;

/// One row of a record's extraction table.
pub struct FieldSpec<T> {
    pub name: &'static str,
    pub locator: Locator,
    pub read: Read,
    pub required: bool,
    pub apply: Apply<T>,
}

impl<T> FieldSpec<T> {
    /// Optional text field.
    pub const fn text(name: &'static str, locator: Locator, apply: Apply<T>) -> Self {
        Self {
            name,
            locator,
            read: Read::Text,
            required: false,
            apply,
        }
    }

    /// Optional attribute field.
    pub const fn attr(
        name: &'static str,
        locator: Locator,
        attribute: &'static str,
        apply: Apply<T>,
    ) -> Self {
        Self {
            name,
            locator,
            read: Read::Attr(attribute),
            required: false,
            apply,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Evaluate `fields` in order against `scope`, storing into `target`.
///
/// A missing optional node (or attribute) applies empty text.
///
/// # Errors
///
/// The first failing field: [`ExtractError::NodeNotFound`] or
/// [`ExtractError::MissingAttribute`] for a required field,
/// [`ExtractError::Parse`] when `apply` rejects the text.
pub fn extract_fields<T>(
    scope: ElementRef<'_>,
    fields: &[FieldSpec<T>],
    target: &mut T,
) -> Result<(), ExtractError> {
    for field in fields {
        let value = match field.locator.find(scope)? {
            Some(node) => match field.read {
                Read::Text => text_of(node),
                Read::Attr(attribute) => match node.value().attr(attribute) {
                    Some(value) => value.to_string(),
                    None if field.required => {
                        return Err(ExtractError::MissingAttribute {
                            field: field.name,
                            attribute,
                        });
                    }
                    None => String::new(),
                },
            },
            None if field.required => {
                return Err(ExtractError::NodeNotFound {
                    field: field.name,
                    locator: field.locator.describe(),
                });
            }
            None => String::new(),
        };

        (field.apply)(target, &value).map_err(|reason| ExtractError::Parse {
            field: field.name,
            value,
            reason,
        })?;
    }
    Ok(())
}

/// Parse an HTML body into a document.
#[must_use]
pub fn document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Compile a built-in selector.
///
/// # Errors
///
/// [`ExtractError::Selector`] naming the selector.
pub fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|err| ExtractError::Selector(format!("{css}: {err:?}")))
}

/// All elements matching `css` under `scope`, in document order.
///
/// # Errors
///
/// [`ExtractError::Selector`] for a malformed selector.
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    let selector = selector(css)?;
    Ok(scope.select(&selector).collect())
}

fn first<'a>(scope: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>, ExtractError> {
    let selector = selector(css)?;
    Ok(scope.select(&selector).next())
}

/// Whitespace-trimmed text content of `node`.
#[must_use]
pub fn text_of(node: ElementRef<'_>) -> String {
    node.text().collect::<String>().trim().to_string()
}

fn cells(row: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "td")
}

fn column(row: ElementRef<'_>, n: usize) -> Option<ElementRef<'_>> {
    n.checked_sub(1).and_then(|index| cells(row).nth(index))
}

/// Number of `td` children of a row.
#[must_use]
pub fn column_count(row: ElementRef<'_>) -> usize {
    cells(row).count()
}

fn is_leaf_cell(cell: ElementRef<'_>) -> bool {
    !cell
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|inner| inner.value().name() == "td")
}

/// Innermost `td` whose text matches `label`.
fn labelled<'a>(
    scope: ElementRef<'a>,
    label: &str,
    exact: bool,
) -> Result<Option<ElementRef<'a>>, ExtractError> {
    let td = selector("td")?;
    Ok(scope.select(&td).filter(|cell| is_leaf_cell(*cell)).find(|cell| {
        let text = text_of(*cell);
        if exact { text == label } else { text.contains(label) }
    }))
}

fn sibling_cell(cell: ElementRef<'_>, offset: usize) -> Option<ElementRef<'_>> {
    if offset == 0 {
        return Some(cell);
    }
    cell.next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|sibling| sibling.value().name() == "td")
        .nth(offset - 1)
}

/// First number in `text`, ignoring thousands separators and any labels or
/// currency signs around it. Text without a number yields zero.
#[must_use]
pub fn dirty_float(text: &str) -> f64 {
    all_numbers(text).first().copied().unwrap_or(0.0)
}

/// Integer variant of [`dirty_float`]; the fraction is dropped.
#[must_use]
pub fn dirty_int(text: &str) -> i64 {
    let cleaned = text.replace(',', "");
    NUMBER
        .find(&cleaned)
        .and_then(|m| m.as_str().split('.').next().and_then(|digits| digits.parse().ok()))
        .unwrap_or(0)
}

/// Every number in `text`, in order.
#[must_use]
pub fn all_numbers(text: &str) -> Vec<f64> {
    let cleaned = text.replace(',', "");
    NUMBER
        .find_iter(&cleaned)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Extract `record` from `html`, mapping failures into [`PortalError`].
pub(crate) fn record<T>(
    record: &'static str,
    html: &str,
    parse: impl FnOnce(&Html) -> Result<T, ExtractError>,
) -> Result<T, PortalError> {
    parse(&document(html)).map_err(PortalError::extract(record))
}
