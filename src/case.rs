//! Case conversion for default column names: property names in camelCase map to snake_case columns.

/// Convert a single identifier from camelCase to snake_case.
/// e.g. "userId" -> "user_id", "createdAt" -> "created_at", "id" -> "id"
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::to_snake_case;

    #[test]
    fn mixed_case_becomes_snake_case() {
        assert_eq!(to_snake_case("userId"), "user_id");
        assert_eq!(to_snake_case("createdAtUtc"), "created_at_utc");
    }

    #[test]
    fn lower_case_is_unchanged() {
        assert_eq!(to_snake_case("id"), "id");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn every_upper_case_letter_is_a_boundary() {
        assert_eq!(to_snake_case("UserId"), "user_id");
        assert_eq!(to_snake_case("userID"), "user_i_d");
    }
}
