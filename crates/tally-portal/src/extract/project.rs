use scraper::Html;
use tally_core::{Project, Projects};

use super::{FieldSpec, Locator, extract_fields, select_all};
use crate::error::ExtractError;

fn fields() -> [FieldSpec<Project>; 2] {
    [
        FieldSpec::attr("id", Locator::Scope, "value", |p: &mut Project, v| {
            p.id = v.to_string();
            Ok(())
        }),
        FieldSpec::text("name", Locator::Scope, |p: &mut Project, v| {
            p.name = v.to_string();
            Ok(())
        }),
    ]
}

/// Parse the project catalog from the report form's project select.
///
/// The placeholder option (empty value) is dropped.
///
/// # Errors
///
/// Only a malformed built-in selector.
pub fn parse_projects(doc: &Html) -> Result<Projects, ExtractError> {
    let fields = fields();
    let mut projects = Vec::new();

    for option in select_all(doc.root_element(), "select#id_project option")? {
        let mut project = Project::default();
        extract_fields(option, &fields, &mut project)?;
        if !project.id.is_empty() {
            projects.push(project);
        }
    }

    Ok(Projects::new(projects))
}

/// Value of the dashboard blocks form's hidden `id` input.
///
/// `None` when the input is absent; an empty string when it has no value.
///
/// # Errors
///
/// Only a malformed built-in selector.
pub fn parse_block_form_id(doc: &Html) -> Result<Option<String>, ExtractError> {
    Ok(Locator::Css(r#"input[name="id"]"#)
        .find(doc.root_element())?
        .map(|input| input.value().attr("value").unwrap_or_default().trim().to_string()))
}
