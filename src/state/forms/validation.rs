//! Field validation rules
//!
//! Every rule is a pure predicate over a trimmed value. Empty values only
//! fail when the field is required; format checks skip them.

use super::field::{FieldKind, SelectOption};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

// ASCII digits only: `\d` would also accept other scripts' digits
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\(?[0-9]{2}\)?\s?)?([0-9]{4,5})-?([0-9]{4})$").expect("valid phone regex")
});

/// Number of digits in a CPF
const CPF_DIGITS: usize = 11;

/// Inline validation failure attached to a single field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Este campo é obrigatório")]
    Required,
    #[error("{}", format_message(*kind))]
    Format { kind: FieldKind },
    /// Well-formed amount outside the accepted range
    #[error("{}", range_message(*kind))]
    OutOfRange { kind: FieldKind },
    #[error("Faça uma escolha válida. {value} não é uma das escolhas disponíveis.")]
    InvalidChoice { value: String },
}

fn format_message(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "Formato de email inválido",
        FieldKind::Tel => "Formato de telefone inválido",
        FieldKind::Cpf => "CPF deve ter 11 dígitos.",
        FieldKind::PositiveMoney => "Digite um valor válido para a renda mensal (ex: R$ 5.000,00).",
        FieldKind::Money => "Digite um valor válido para a entrada (ex: R$ 10.000,00).",
        _ => "Valor inválido",
    }
}

fn range_message(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::PositiveMoney => "A renda mensal deve ser maior que zero.",
        _ => "O valor de entrada não pode ser negativo.",
    }
}

/// Validate a raw field value against its kind and required flag
pub fn validate(kind: FieldKind, required: bool, raw: &str) -> Result<(), ValidationError> {
    let value = raw.trim();

    if value.is_empty() {
        return if required {
            Err(ValidationError::Required)
        } else {
            Ok(())
        };
    }

    match kind {
        FieldKind::Money | FieldKind::PositiveMoney => validate_amount(kind, value),
        FieldKind::Email if !is_valid_email(value) => Err(ValidationError::Format { kind }),
        FieldKind::Tel if !is_valid_phone(value) => Err(ValidationError::Format { kind }),
        FieldKind::Cpf if !is_valid_cpf(value) => Err(ValidationError::Format { kind }),
        _ => Ok(()),
    }
}

fn validate_amount(kind: FieldKind, value: &str) -> Result<(), ValidationError> {
    let amount = parse_money(value).ok_or(ValidationError::Format { kind })?;

    let in_range = match kind {
        FieldKind::PositiveMoney => amount > Decimal::ZERO,
        _ => !amount.is_sign_negative() || amount.is_zero(),
    };

    if in_range {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { kind })
    }
}

/// A select value must be one of the loaded options
///
/// Empty values, and selects whose options were never loaded, pass.
pub fn validate_choice(raw: &str, options: &[SelectOption]) -> Result<(), ValidationError> {
    let value = raw.trim();
    if value.is_empty() || options.is_empty() || options.iter().any(|o| o.value == value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidChoice {
            value: value.to_string(),
        })
    }
}

/// `local@domain.tld` with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Brazilian phone: `(DD) DDDD-DDDD` or `(DD) DDDDD-DDDD`, punctuation optional
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// CPF with or without punctuation (`000.000.000-00`)
pub fn is_valid_cpf(cpf: &str) -> bool {
    cpf.chars().filter(char::is_ascii_digit).count() == CPF_DIGITS
}

/// Parse a Brazilian currency amount such as `R$ 5.000,00`
///
/// Returns `None` for anything that is not a number. Range checks are left
/// to the caller.
pub fn parse_money(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .replace("R$", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod required {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_required_fails_for_every_kind() {
            for kind in [
                FieldKind::Text,
                FieldKind::Email,
                FieldKind::Tel,
                FieldKind::Textarea,
                FieldKind::Select,
                FieldKind::Cpf,
                FieldKind::Money,
                FieldKind::PositiveMoney,
            ] {
                assert_eq!(validate(kind, true, ""), Err(ValidationError::Required));
            }
        }

        #[test]
        fn test_whitespace_only_counts_as_empty() {
            assert_eq!(
                validate(FieldKind::Text, true, "   \t\n"),
                Err(ValidationError::Required)
            );
        }

        #[test]
        fn test_empty_optional_passes_format_checks() {
            assert!(validate(FieldKind::Email, false, "").is_ok());
            assert!(validate(FieldKind::Tel, false, "  ").is_ok());
            assert!(validate(FieldKind::Money, false, "").is_ok());
        }

        #[test]
        fn test_required_message() {
            assert_eq!(
                ValidationError::Required.to_string(),
                "Este campo é obrigatório"
            );
        }
    }

    mod email {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_accepts_local_at_domain_tld() {
            assert!(is_valid_email("cliente@exemplo.com"));
            assert!(is_valid_email("seu.email@exemplo.com.br"));
        }

        #[test]
        fn test_rejects_missing_at_or_suffix() {
            assert!(!is_valid_email("cliente.exemplo.com"));
            assert!(!is_valid_email("cliente@exemplo"));
            assert!(!is_valid_email("cliente @exemplo.com"));
            assert!(!is_valid_email("@exemplo.com"));
        }

        #[test]
        fn test_value_is_trimmed_before_matching() {
            assert!(validate(FieldKind::Email, true, "  a@b.co  ").is_ok());
        }

        #[test]
        fn test_format_message() {
            let err = validate(FieldKind::Email, true, "nope").unwrap_err();
            assert_eq!(err.to_string(), "Formato de email inválido");
        }
    }

    mod phone {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_accepts_landline_and_mobile_formats() {
            assert!(is_valid_phone("(11) 9999-9999"));
            assert!(is_valid_phone("(11) 99999-9999"));
            assert!(is_valid_phone("11 99999-9999"));
            assert!(is_valid_phone("1199999999"));
            assert!(is_valid_phone("99999-9999"));
            assert!(is_valid_phone("99999999"));
        }

        #[test]
        fn test_rejects_non_ascii_digits() {
            assert!(!is_valid_phone("(١١) ٩٩٩٩٩-٩٩٩٩"));
            assert!(!is_valid_phone("９９９９９-９９９９"));
        }

        #[test]
        fn test_rejects_letters_and_short_numbers() {
            assert!(!is_valid_phone("abcd-efgh"));
            assert!(!is_valid_phone("telefone"));
            assert!(!is_valid_phone("123"));
        }

        #[test]
        fn test_format_message() {
            let err = validate(FieldKind::Tel, false, "xyz").unwrap_err();
            assert_eq!(err.to_string(), "Formato de telefone inválido");
        }
    }

    mod cpf {
        use super::*;

        #[test]
        fn test_punctuated_and_bare_cpf() {
            assert!(is_valid_cpf("123.456.789-09"));
            assert!(is_valid_cpf("12345678909"));
        }

        #[test]
        fn test_wrong_digit_count() {
            assert!(!is_valid_cpf("123.456.789"));
            assert!(!is_valid_cpf("123456789012"));
        }
    }

    mod money {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_parses_brazilian_format() {
            assert_eq!(parse_money("R$ 5.000,00"), Some(Decimal::new(500000, 2)));
            assert_eq!(parse_money("1.234.567,89"), Some(Decimal::new(123456789, 2)));
            assert_eq!(parse_money("300"), Some(Decimal::new(300, 0)));
            assert_eq!(parse_money("-10,00"), Some(Decimal::new(-1000, 2)));
        }

        #[test]
        fn test_rejects_garbage() {
            assert_eq!(parse_money("R$"), None);
            assert_eq!(parse_money("cinco mil"), None);
        }

        #[test]
        fn test_income_must_be_greater_than_zero() {
            assert!(validate(FieldKind::PositiveMoney, true, "R$ 2.500,50").is_ok());

            let zero = validate(FieldKind::PositiveMoney, true, "R$ 0,00").unwrap_err();
            assert_eq!(
                zero,
                ValidationError::OutOfRange {
                    kind: FieldKind::PositiveMoney
                }
            );
            assert_eq!(zero.to_string(), "A renda mensal deve ser maior que zero.");

            let negative = validate(FieldKind::PositiveMoney, true, "-100").unwrap_err();
            assert_eq!(negative.to_string(), "A renda mensal deve ser maior que zero.");
        }

        #[test]
        fn test_down_payment_allows_zero_but_not_negative() {
            assert!(validate(FieldKind::Money, false, "R$ 0,00").is_ok());
            assert!(validate(FieldKind::Money, false, "10.000,00").is_ok());

            let err = validate(FieldKind::Money, false, "-1,00").unwrap_err();
            assert_eq!(err.to_string(), "O valor de entrada não pode ser negativo.");
        }

        #[test]
        fn test_malformed_amount_messages() {
            assert_eq!(
                validate(FieldKind::PositiveMoney, true, "abc")
                    .unwrap_err()
                    .to_string(),
                "Digite um valor válido para a renda mensal (ex: R$ 5.000,00)."
            );
            assert_eq!(
                validate(FieldKind::Money, false, "muito")
                    .unwrap_err()
                    .to_string(),
                "Digite um valor válido para a entrada (ex: R$ 10.000,00)."
            );
        }
    }

    mod choice {
        use super::*;
        use pretty_assertions::assert_eq;

        fn options() -> Vec<SelectOption> {
            vec![
                SelectOption::new("", "---------"),
                SelectOption::new("3", "Honda Civic 2019"),
            ]
        }

        #[test]
        fn test_listed_and_empty_values_pass() {
            assert!(validate_choice("3", &options()).is_ok());
            assert!(validate_choice("", &options()).is_ok());
        }

        #[test]
        fn test_unlisted_value_fails() {
            assert_eq!(
                validate_choice("42", &options()),
                Err(ValidationError::InvalidChoice {
                    value: "42".to_string()
                })
            );
        }

        #[test]
        fn test_unloaded_options_accept_anything() {
            assert!(validate_choice("42", &[]).is_ok());
        }
    }

    #[test]
    fn test_text_accepts_anything_non_empty() {
        assert!(validate(FieldKind::Text, true, "Toyota Corolla 2020").is_ok());
        assert!(validate(FieldKind::Textarea, true, "linha 1\nlinha 2").is_ok());
    }
}
