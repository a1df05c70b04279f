//! Form state management and the dealership's lead forms

use super::field::{FieldKind, FormField, SelectOption};
use url::Url;

/// Name of the hidden anti-forgery field rendered by the site
pub const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Label shown on the submit control when none is configured
pub const DEFAULT_SUBMIT_LABEL: &str = "Enviar";

/// Label of the blank `<option>` Django renders for optional selects
pub const EMPTY_CHOICE_LABEL: &str = "---------";

/// Label shown on the submit control while a request is in flight
pub const LOADING_LABEL: &str = "Enviando...";

/// Trait for moving focus through a form
pub trait Navigable {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// HTTP method declared on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMethod {
    Get,
    #[default]
    Post,
}

impl FormMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormMethod::Get => "GET",
            FormMethod::Post => "POST",
        }
    }

    /// Parse a `<form method="...">` attribute, case-insensitively
    pub fn from_attr(attr: &str) -> Option<Self> {
        match attr.trim().to_ascii_lowercase().as_str() {
            "get" => Some(FormMethod::Get),
            "post" => Some(FormMethod::Post),
            _ => None,
        }
    }
}

/// Which of the site's forms this is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Financing { car_id: Option<u32> },
}

/// The form's submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub label: String,
    original_label: String,
}

impl SubmitControl {
    pub fn new(label: &str) -> Self {
        Self {
            disabled: false,
            label: label.to_string(),
            original_label: label.to_string(),
        }
    }

    /// Disable the control and show the loading label
    pub fn set_loading(&mut self) {
        self.disabled = true;
        self.label = LOADING_LABEL.to_string();
    }

    /// Re-enable the control with its original label
    pub fn restore(&mut self) {
        self.disabled = false;
        self.label.clone_from(&self.original_label);
    }
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_LABEL)
    }
}

/// Everything needed to send a form over HTTP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPayload {
    pub action: Url,
    pub method: FormMethod,
    /// Field name/value pairs in document order, hidden fields included
    pub entries: Vec<(String, String)>,
    /// Copy of the anti-forgery field, sent again as a header
    pub csrf_token: Option<String>,
}

/// A form element: target, method, fields and submit control
///
/// The field list is fixed when the form is built. There is no way to add
/// fields later, so a validator holding a `Form` always sees the same set.
#[derive(Debug, Clone)]
pub struct Form {
    pub kind: FormKind,
    pub title: String,
    pub action: Url,
    pub method: FormMethod,
    fields: Vec<FormField>,
    pub submit: SubmitControl,
}

impl Form {
    pub fn new(
        kind: FormKind,
        title: &str,
        action: Url,
        method: FormMethod,
        fields: Vec<FormField>,
        submit_label: &str,
    ) -> Self {
        Self {
            kind,
            title: title.to_string(),
            action,
            method,
            fields,
            submit: SubmitControl::new(submit_label),
        }
    }

    /// Contact page lead form (`/contato/`)
    pub fn contact(base: &Url, csrf_token: &str) -> Result<Self, url::ParseError> {
        let fields = vec![
            FormField::hidden(CSRF_FIELD, csrf_token),
            FormField::required("nome", "Nome", FieldKind::Text)
                .with_placeholder("Seu nome completo"),
            FormField::required("email", "E-mail", FieldKind::Email)
                .with_placeholder("seu.email@exemplo.com"),
            FormField::required("telefone", "Telefone", FieldKind::Tel)
                .with_placeholder("(11) 99999-9999"),
            FormField::required("assunto", "Assunto", FieldKind::Text)
                .with_placeholder("Assunto da mensagem"),
            FormField::required("mensagem", "Mensagem", FieldKind::Textarea)
                .with_placeholder("Digite sua mensagem aqui..."),
        ];

        Ok(Self::new(
            FormKind::Contact,
            "Contato",
            base.join("contato/")?,
            FormMethod::Post,
            fields,
            "Enviar Mensagem",
        ))
    }

    /// Financing request form (`/financiamento/` or `/financiamento/<id>/`)
    pub fn financing(
        base: &Url,
        csrf_token: &str,
        car_id: Option<u32>,
        car_text: Option<&str>,
    ) -> Result<Self, url::ParseError> {
        let path = match car_id {
            Some(id) => format!("financiamento/{id}/"),
            None => "financiamento/".to_string(),
        };

        let mut car = FormField::optional("carro_texto", "Carro (se não listado)", FieldKind::Text)
            .with_placeholder("Ex: Toyota Corolla 2020");
        if let Some(text) = car_text {
            car.set_default(text.to_string());
        }

        // Until the page's inventory is loaded only the blank choice and the
        // car from the URL are known
        let mut options = vec![SelectOption::new("", EMPTY_CHOICE_LABEL)];
        let mut car_choice = FormField::optional("carro_interesse", "Carro de Interesse", FieldKind::Select);
        if let Some(id) = car_id {
            let label = car_text.map_or_else(|| format!("Carro #{id}"), str::to_string);
            options.push(SelectOption::new(id.to_string(), label));
            car_choice.set_default(id.to_string());
        }
        let car_choice = car_choice.with_options(options);

        let fields = vec![
            FormField::hidden(CSRF_FIELD, csrf_token),
            FormField::required("nome", "Nome Completo", FieldKind::Text)
                .with_placeholder("Nome completo"),
            FormField::required("email", "E-mail", FieldKind::Email)
                .with_placeholder("seu.email@exemplo.com"),
            FormField::required("telefone", "Telefone", FieldKind::Tel)
                .with_placeholder("(11) 99999-9999"),
            FormField::required("cpf", "CPF", FieldKind::Cpf).with_placeholder("000.000.000-00"),
            FormField::required("renda_mensal", "Renda Mensal", FieldKind::PositiveMoney)
                .with_placeholder("R$ 0,00"),
            FormField::required("profissao", "Profissão", FieldKind::Text)
                .with_placeholder("Sua profissão"),
            FormField::optional("entrada", "Valor de Entrada", FieldKind::Money)
                .with_placeholder("R$ 0,00"),
            car_choice,
            car,
            FormField::optional("observacoes", "Observações", FieldKind::Textarea)
                .with_placeholder("Observações adicionais..."),
        ];

        Ok(Self::new(
            FormKind::Financing { car_id },
            "Financiamento",
            base.join(&path)?,
            FormMethod::Post,
            fields,
            "Solicitar Financiamento",
        ))
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields.get_mut(index)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Indices of fields a user can see and edit, in document order
    pub fn visible_indices(&self) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.kind.is_hidden())
            .map(|(i, _)| i)
            .collect()
    }

    /// Current value of the hidden anti-forgery field
    pub fn csrf_token(&self) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == CSRF_FIELD)
            .map(|f| f.value.as_str())
            .filter(|v| !v.is_empty())
    }

    /// Replace the choices of a select field, keeping its current value
    pub fn set_options(&mut self, name: &str, options: Vec<SelectOption>) -> bool {
        match self.field_index(name) {
            Some(index) if self.fields[index].kind.is_select() => {
                self.fields[index].options = options;
                true
            }
            _ => false,
        }
    }

    /// Replace the anti-forgery token, e.g. after fetching a fresh page
    pub fn set_csrf_token(&mut self, token: &str) {
        if let Some(index) = self.field_index(CSRF_FIELD) {
            self.fields[index].set_default(token.to_string());
        }
    }

    pub fn error_count(&self) -> usize {
        self.fields.iter().filter(|f| f.has_error()).count()
    }

    /// Restore every field to its default value
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
    }

    /// Snapshot the current values as a payload
    pub fn payload(&self) -> FormPayload {
        FormPayload {
            action: self.action.clone(),
            method: self.method,
            entries: self
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.value.clone()))
                .collect(),
            csrf_token: self.csrf_token().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://regionalveiculos.com.br/").unwrap()
    }

    mod constructors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_contact_form_targets_contact_page() {
            let form = Form::contact(&base(), "tok").unwrap();
            assert_eq!(form.action.as_str(), "https://regionalveiculos.com.br/contato/");
            assert_eq!(form.method, FormMethod::Post);
            assert_eq!(form.submit.label, "Enviar Mensagem");
            assert_eq!(form.kind, FormKind::Contact);
        }

        #[test]
        fn test_contact_fields_are_all_required() {
            let form = Form::contact(&base(), "tok").unwrap();
            let visible = form.visible_indices();
            assert_eq!(visible.len(), 5);
            assert!(visible.iter().all(|&i| form.fields()[i].required));
        }

        #[test]
        fn test_financing_with_car_id_uses_car_path() {
            let form = Form::financing(&base(), "tok", Some(42), Some("Fiat Uno 2012")).unwrap();
            assert_eq!(
                form.action.as_str(),
                "https://regionalveiculos.com.br/financiamento/42/"
            );
            let car = form.field(form.field_index("carro_texto").unwrap()).unwrap();
            assert_eq!(car.value, "Fiat Uno 2012");
            assert!(!car.required);

            let choice = form.field(form.field_index("carro_interesse").unwrap()).unwrap();
            assert_eq!(choice.kind, FieldKind::Select);
            assert_eq!(choice.value, "42");
            assert_eq!(choice.display_value(), "Fiat Uno 2012");
        }

        #[test]
        fn test_financing_field_rules() {
            let form = Form::financing(&base(), "tok", None, None).unwrap();
            let kind_of = |name: &str| form.field(form.field_index(name).unwrap()).unwrap().kind;
            assert_eq!(kind_of("renda_mensal"), FieldKind::PositiveMoney);
            assert_eq!(kind_of("entrada"), FieldKind::Money);
            assert_eq!(kind_of("cpf"), FieldKind::Cpf);
            assert_eq!(form.visible_indices().len(), 10);
        }

        #[test]
        fn test_financing_without_car_id() {
            let form = Form::financing(&base(), "tok", None, None).unwrap();
            assert_eq!(
                form.action.as_str(),
                "https://regionalveiculos.com.br/financiamento/"
            );
            assert_eq!(form.kind, FormKind::Financing { car_id: None });

            let choice = form.field(form.field_index("carro_interesse").unwrap()).unwrap();
            assert_eq!(choice.value, "");
            assert_eq!(choice.options, vec![SelectOption::new("", EMPTY_CHOICE_LABEL)]);
        }

        #[test]
        fn test_set_options_only_touches_selects() {
            let mut form = Form::financing(&base(), "tok", Some(3), None).unwrap();
            let options = vec![
                SelectOption::new("", EMPTY_CHOICE_LABEL),
                SelectOption::new("3", "Honda Civic 2019"),
            ];
            assert!(form.set_options("carro_interesse", options.clone()));
            assert!(!form.set_options("nome", options));

            let choice = form.field(form.field_index("carro_interesse").unwrap()).unwrap();
            assert_eq!(choice.value, "3");
            assert_eq!(choice.display_value(), "Honda Civic 2019");
        }

        #[test]
        fn test_method_from_attribute() {
            assert_eq!(FormMethod::from_attr("POST"), Some(FormMethod::Post));
            assert_eq!(FormMethod::from_attr(" get "), Some(FormMethod::Get));
            assert_eq!(FormMethod::from_attr("dialog"), None);
        }
    }

    mod submit_control {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_loading_then_restore() {
            let mut control = SubmitControl::new("Enviar Mensagem");
            control.set_loading();
            assert!(control.disabled);
            assert_eq!(control.label, LOADING_LABEL);
            control.restore();
            assert!(!control.disabled);
            assert_eq!(control.label, "Enviar Mensagem");
        }

        #[test]
        fn test_default_label() {
            assert_eq!(SubmitControl::default().label, DEFAULT_SUBMIT_LABEL);
        }
    }

    mod payload {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_payload_includes_hidden_token() {
            let mut form = Form::contact(&base(), "secret").unwrap();
            let nome = form.field_index("nome").unwrap();
            form.field_mut(nome).unwrap().value = "Ana".to_string();

            let payload = form.payload();
            assert_eq!(payload.csrf_token.as_deref(), Some("secret"));
            assert_eq!(
                payload.entries[0],
                (CSRF_FIELD.to_string(), "secret".to_string())
            );
            assert!(payload
                .entries
                .contains(&("nome".to_string(), "Ana".to_string())));
        }

        #[test]
        fn test_empty_token_is_not_reported() {
            let form = Form::contact(&base(), "").unwrap();
            assert_eq!(form.csrf_token(), None);
        }

        #[test]
        fn test_set_csrf_token_survives_reset() {
            let mut form = Form::contact(&base(), "").unwrap();
            form.set_csrf_token("fresh");
            form.reset();
            assert_eq!(form.csrf_token(), Some("fresh"));
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        struct Cursor {
            count: usize,
            active: usize,
        }

        impl Navigable for Cursor {
            fn field_count(&self) -> usize {
                self.count
            }
            fn active_field(&self) -> usize {
                self.active
            }
            fn set_active_field(&mut self, index: usize) {
                self.active = index;
            }
        }

        #[test]
        fn test_next_wraps_around() {
            let mut cursor = Cursor { count: 3, active: 2 };
            cursor.next_field();
            assert_eq!(cursor.active, 0);
        }

        #[test]
        fn test_prev_wraps_around() {
            let mut cursor = Cursor { count: 3, active: 0 };
            cursor.prev_field();
            assert_eq!(cursor.active, 2);
        }

        #[test]
        fn test_empty_is_noop() {
            let mut cursor = Cursor { count: 0, active: 0 };
            cursor.next_field();
            cursor.prev_field();
            assert_eq!(cursor.active, 0);
        }
    }
}
