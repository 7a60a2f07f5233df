use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid species pattern '{token}': expected 'base{{species}}', '{{species}}', or '{{species}}base'")]
pub struct ExpandError {
    pub token: String,
}

/// Expands a brace-compressed species token into concrete species names.
///
/// A token carries at most one `{a,b,...}` group with an optional prefix
/// (everything before the `{`) and an optional suffix (everything after the
/// `}` up to the first path separator). Anything from the first `/` after the
/// group onward is ignored:
///
/// - `01_10{P,R1,R2}/$func/` → `01_10P`, `01_10R1`, `01_10R2`
/// - `{DMML_REACT,DMML_INT1}/$f` → `DMML_REACT`, `DMML_INT1`
/// - `{ed,ts}1/$f` → `ed1`, `ts1`
/// - `A{M,D}2/$f` → `AM2`, `AD2`
pub fn expand_species_pattern(token: &str) -> Result<Vec<String>, ExpandError> {
    let error = || ExpandError {
        token: token.to_string(),
    };

    let open = token.find('{').ok_or_else(error)?;
    let prefix = &token[..open];
    if prefix.contains('}') {
        return Err(error());
    }

    let rest = &token[open + 1..];
    let close = rest.find('}').ok_or_else(error)?;
    let list = &rest[..close];
    if list.is_empty() {
        return Err(error());
    }

    let tail = &rest[close + 1..];
    let suffix = match tail.find('/') {
        Some(slash) => &tail[..slash],
        None => tail,
    };

    Ok(list
        .split(',')
        .map(|item| format!("{}{}{}", prefix, item.trim(), suffix))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(token: &str) -> Vec<String> {
        expand_species_pattern(token).unwrap()
    }

    #[test]
    fn prefix_only_pattern_with_trailing_path_segments() {
        assert_eq!(
            expand("01_10{P,R1,R2}/$func/"),
            vec!["01_10P", "01_10R1", "01_10R2"]
        );
    }

    #[test]
    fn bare_pattern_with_trailing_path_segments() {
        assert_eq!(
            expand("{DMML_REACT,DMML_INT1}/$f"),
            vec!["DMML_REACT", "DMML_INT1"]
        );
    }

    #[test]
    fn suffix_only_pattern() {
        assert_eq!(expand("{ed,ts}1/$f"), vec!["ed1", "ts1"]);
    }

    #[test]
    fn prefix_and_suffix_pattern() {
        assert_eq!(expand("A{M,D}2/$f"), vec!["AM2", "AD2"]);
    }

    #[test]
    fn bare_pattern_without_tail() {
        assert_eq!(expand("{a,b,c}"), vec!["a", "b", "c"]);
    }

    #[test]
    fn list_items_are_trimmed_but_prefix_and_suffix_are_not() {
        assert_eq!(expand("X{ a , b }Y"), vec!["XaY", "XbY"]);
    }

    #[test]
    fn suffix_stops_at_the_first_path_separator() {
        assert_eq!(expand("{a,b}suf/ignored/more"), vec!["asuf", "bsuf"]);
        assert_eq!(expand("pre{a,b}/ignored"), vec!["prea", "preb"]);
    }

    #[test]
    fn single_item_list_expands_to_one_name() {
        assert_eq!(expand("w{ater}"), vec!["water"]);
    }

    #[test]
    fn missing_or_unbalanced_braces_are_rejected() {
        assert!(expand_species_pattern("no_braces").is_err());
        assert!(expand_species_pattern("open{only").is_err());
        assert!(expand_species_pattern("}backwards{x}").is_err());
        assert!(expand_species_pattern("empty{}list").is_err());
    }

    #[test]
    fn error_names_the_offending_token() {
        let err = expand_species_pattern("bad{").unwrap_err();
        assert_eq!(err.token, "bad{");
        assert!(err.to_string().contains("bad{"));
    }
}
