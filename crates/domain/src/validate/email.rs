use super::ValidationError;
use regex::Regex;
use std::sync::LazyLock;

const MIN_LEN: usize = 6;
const MAX_LEN: usize = 254;

static LOCAL_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9!#$%&'*+/=^_`{|}~.-]+$").unwrap());
static DOMAIN_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").unwrap());

/// RFC-shaped email check. Returns the trimmed address.
///
/// Narrower than RFC 5322: no quoted local parts, no `?` in the local part
/// (it would start a query in a `mailto:` link), no IP literals, and the
/// domain must have at least two labels.
pub fn validate_email(s: &str) -> Result<String, ValidationError> {
    let s = s.trim();
    if s.len() < MIN_LEN || s.len() > MAX_LEN {
        return Err(ValidationError::InvalidEmail);
    }

    let (local, domain) = s.split_once('@').ok_or(ValidationError::InvalidEmail)?;
    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    if !LOCAL_PART.is_match(local)
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
    {
        return Err(ValidationError::InvalidEmail);
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|l| DOMAIN_LABEL.is_match(l)) {
        return Err(ValidationError::InvalidEmail);
    }

    // tld: at least two characters, not purely numeric
    let tld = labels[labels.len() - 1];
    if tld.len() < 2 || tld.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for ok in [
            "support@acme.test",
            "first.last+tag@mail.example.co.uk",
            "o'brien@example.ie",
            "a@b.co",
        ] {
            assert_eq!(validate_email(ok).as_deref(), Ok(ok), "{ok}");
        }
        assert_eq!(validate_email("  x@y.io ").as_deref(), Ok("x@y.io"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "not-an-email",
            "@acme.test",
            "support@",
            "support@acme",
            "support@@acme.test",
            "sup port@acme.test",
            ".support@acme.test",
            "sup..port@acme.test",
            "support@-acme.test",
            "support@acme..test",
            "support@acme.1",
            "<script>@acme.test",
            "a?subject=x@acme.test",
            "help?cc=boss@acme.test",
        ] {
            assert_eq!(validate_email(bad), Err(ValidationError::InvalidEmail), "{bad}");
        }
    }
}
