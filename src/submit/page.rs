//! Reading the rendered form page
//!
//! The page carries what the terminal form cannot know on its own: the
//! anti-forgery token, the method declared on the `<form>` and the choices
//! of its selects (the car inventory on the financing page).

use crate::state::{FormMethod, SelectOption, CSRF_FIELD};
use scraper::{ElementRef, Html, Selector};

/// What was read from a form page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPage {
    pub csrf_token: Option<String>,
    /// Method of the form holding the token
    pub method: Option<FormMethod>,
    /// Choices of every named `<select>`, in page order
    pub selects: Vec<(String, Vec<SelectOption>)>,
}

/// Parse a rendered page
pub fn parse_form_page(html: &str) -> FormPage {
    let document = Html::parse_document(html);

    FormPage {
        csrf_token: extract_csrf_token(&document),
        method: extract_method(&document),
        selects: extract_selects(&document),
    }
}

fn csrf_selector() -> Option<Selector> {
    Selector::parse(&format!(r#"input[name="{CSRF_FIELD}"]"#)).ok()
}

fn extract_csrf_token(document: &Html) -> Option<String> {
    let selector = csrf_selector()?;
    document
        .select(&selector)
        .filter_map(|input| input.value().attr("value"))
        .map(str::trim)
        .find(|token| !token.is_empty())
        .map(str::to_string)
}

fn extract_method(document: &Html) -> Option<FormMethod> {
    let form_selector = Selector::parse("form").ok()?;
    let csrf = csrf_selector()?;

    let form = document
        .select(&form_selector)
        .find(|form| form.select(&csrf).next().is_some())?;

    // HTML defaults a missing method to GET
    match form.value().attr("method") {
        Some(method) => FormMethod::from_attr(method),
        None => Some(FormMethod::Get),
    }
}

fn extract_selects(document: &Html) -> Vec<(String, Vec<SelectOption>)> {
    let (Ok(select_selector), Ok(option_selector)) =
        (Selector::parse("select[name]"), Selector::parse("option"))
    else {
        return Vec::new();
    };

    document
        .select(&select_selector)
        .filter_map(|select| {
            let name = select.value().attr("name")?.to_string();
            let options = select
                .select(&option_selector)
                .map(option_from_element)
                .collect();
            Some((name, options))
        })
        .collect()
}

fn option_from_element(option: ElementRef<'_>) -> SelectOption {
    let label = option.text().collect::<String>().trim().to_string();
    // an option without a value attribute submits its text
    let value = option
        .value()
        .attr("value")
        .map_or_else(|| label.clone(), str::to_string);
    SelectOption::new(value, label)
}
