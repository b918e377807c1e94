use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::modules::complaint::model::FieldError;

// Declaration order of the payload fields, used to report errors top to bottom.
const FIELD_ORDER: [&str; 11] = [
    "name",
    "email",
    "subject",
    "complaint",
    "priority",
    "timestamp",
    "attachments",
    "filename",
    "content_type",
    "size_bytes",
    "content_base64",
];

fn field_rank(field: &str) -> usize {
    FIELD_ORDER.iter().position(|f| *f == field).unwrap_or(usize::MAX)
}

/// Flattens nested validator errors into `path: reason` entries.
///
/// List items are addressed as `attachments[0].filename`.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    let mut entries: Vec<_> = errors.errors().iter().collect();
    entries.sort_by(|(a, _), (b, _)| field_rank(a).cmp(&field_rank(b)).then_with(|| a.cmp(b)));

    for (field, kind) in entries {
        let path =
            if prefix.is_empty() { field.to_string() } else { format!("{prefix}.{field}") };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    out.push(FieldError { field: path.clone(), message: describe(error) });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn describe(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => error.code.to_string(),
    }
}
