// ============================================================================
// VALIDACIÓN DE FORMULARIOS
// ============================================================================
// Devuelve un mapa `campo → primer mensaje de error`, como espera la vista
// para pintar los errores junto a cada input.
// ============================================================================

use std::collections::BTreeMap;

pub type FieldErrors = BTreeMap<String, String>;

/// Acumula errores por campo; solo se conserva el primero de cada campo
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn required(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(field, message);
        }
        self
    }

    /// Formato de e-mail; un valor vacío se deja a `required`
    pub fn email(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if !value.is_empty() && !is_valid_email(value) {
            self.fail(field, message);
        }
        self
    }

    pub fn min_len(&mut self, field: &str, value: &str, min: usize, message: &str) -> &mut Self {
        if value.chars().count() < min {
            self.fail(field, message);
        }
        self
    }

    pub fn equals(&mut self, field: &str, value: &str, other: &str, message: &str) -> &mut Self {
        if value != other {
            self.fail(field, message);
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_first_error_per_field() {
        let result = Validator::new()
            .required("email", "", "E-mail empty")
            .email("email", "", "E-mail invalid")
            .min_len("email", "", 3, "too short")
            .finish();

        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors["email"], "E-mail empty");
    }

    #[test]
    fn email_format() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("john.doe@mail.example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn passes_when_all_rules_hold() {
        let result = Validator::new()
            .required("name", "A", "Name empty")
            .min_len("password", "secret1", 6, "Password invalid")
            .equals("password_confirmation", "secret1", "secret1", "Mismatch")
            .finish();

        assert!(result.is_ok());
    }
}
