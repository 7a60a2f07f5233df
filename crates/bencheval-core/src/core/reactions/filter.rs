use super::expand::{ExpandError, expand_species_pattern};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReactionLineIssue {
    #[error(transparent)]
    Pattern(#[from] ExpandError),
    #[error("stoichiometric coefficient '{token}' is not an integer")]
    Stoichiometry { token: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line_number} ('{content}'): {issue}")]
pub struct ReactionFilterError {
    pub line_number: usize,
    pub content: String,
    pub issue: ReactionLineIssue,
}

/// One reaction of the definition file: species name tokens in order of
/// appearance (duplicates retained) and the parallel stoichiometric
/// coefficients. Its position in [`FilteredReactions::entries`] is the join
/// key against the scoring output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEntry {
    pub species: Vec<String>,
    pub stoichiometry: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub issue: ReactionLineIssue,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilteredReactions {
    /// Lines that survive filtering, in input order: passthrough lines plus
    /// every kept reaction line.
    pub lines: Vec<String>,
    /// One entry per kept reaction line, positionally aligned.
    pub entries: Vec<ReactionEntry>,
    /// Malformed lines dropped in lenient mode.
    pub skipped: Vec<SkippedLine>,
}

/// Filters a reaction definition file down to reactions whose species are all
/// members of `valid_species`.
///
/// Blank lines and `#` comments pass through unchanged; non-reaction lines
/// (no leading `tmer`/`$tmer` marker or no standalone `x` token) are treated
/// as directives and also pass through. A reaction line is dropped in full if
/// any of its species is not valid. Malformed lines (bad brace pattern,
/// non-integer stoichiometry) abort in strict mode and are dropped with a
/// warning otherwise.
pub fn filter_reaction_lines(
    lines: &[String],
    valid_species: &HashSet<String>,
    strict: bool,
) -> Result<FilteredReactions, ReactionFilterError> {
    let mut filtered = FilteredReactions::default();

    for (offset, line) in lines.iter().enumerate() {
        let line_number = offset + 1;
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            filtered.lines.push(line.clone());
            continue;
        }

        let tokens: Vec<&str> = stripped.split_whitespace().collect();
        let marker = tokens.iter().position(|&token| token == "x");
        let is_reaction = marker.is_some()
            && (tokens[0].starts_with("$tmer") || tokens[0].starts_with("tmer"));
        let Some(marker_position) = marker.filter(|_| is_reaction) else {
            // Plain shell prelude or directive line, kept as-is.
            filtered.lines.push(line.clone());
            continue;
        };

        match parse_reaction_line(&tokens, marker_position) {
            Ok(entry) => {
                let distinct: HashSet<&String> = entry.species.iter().collect();
                if distinct.iter().all(|name| valid_species.contains(*name)) {
                    filtered.lines.push(line.clone());
                    filtered.entries.push(entry);
                } else {
                    debug!("Dropping reaction line {} with unselected species.", line_number);
                }
            }
            Err(issue) => {
                if strict {
                    return Err(ReactionFilterError {
                        line_number,
                        content: stripped.to_string(),
                        issue,
                    });
                }
                warn!("Skipping malformed reaction line {}: {}", line_number, issue);
                filtered.skipped.push(SkippedLine { line_number, issue });
            }
        }
    }

    Ok(filtered)
}

fn parse_reaction_line(
    tokens: &[&str],
    marker_position: usize,
) -> Result<ReactionEntry, ReactionLineIssue> {
    let species_tokens = &tokens[1..marker_position];

    let mut stoichiometry = Vec::new();
    for &token in &tokens[marker_position + 1..] {
        if token.starts_with("$w") {
            break;
        }
        let coefficient =
            token
                .parse::<i32>()
                .map_err(|_| ReactionLineIssue::Stoichiometry {
                    token: token.to_string(),
                })?;
        stoichiometry.push(coefficient);
    }

    let mut species = Vec::new();
    for &token in species_tokens {
        // The species name is the last path segment that is neither empty nor
        // a shell variable like `$func`.
        let component = token
            .split('/')
            .map(str::trim)
            .filter(|segment| !segment.is_empty() && !segment.starts_with('$'))
            .next_back();
        let Some(component) = component else {
            continue;
        };
        if component.contains('{') && component.contains('}') {
            species.extend(expand_species_pattern(component)?);
        } else {
            species.push(component.to_string());
        }
    }

    Ok(ReactionEntry {
        species,
        stoichiometry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    fn valid(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn comments_and_blank_lines_pass_through() {
        let input = lines(&["# header", "", "   ", "# another"]);
        let filtered = filter_reaction_lines(&input, &valid(&[]), true).unwrap();
        assert_eq!(filtered.lines, input);
        assert!(filtered.entries.is_empty());
    }

    #[test]
    fn directive_lines_pass_through_without_entries() {
        let input = lines(&["func=$1", "export TMER_ARGS", "tmer_no_marker a b"]);
        let filtered = filter_reaction_lines(&input, &valid(&[]), true).unwrap();
        assert_eq!(filtered.lines, input);
        assert!(filtered.entries.is_empty());
    }

    #[test]
    fn reaction_line_yields_species_and_stoichiometry() {
        let input = lines(&["$tmer ed1/$f ts1/$f x -1 1 $w"]);
        let filtered = filter_reaction_lines(&input, &valid(&["ed1", "ts1"]), true).unwrap();
        assert_eq!(filtered.lines, input);
        assert_eq!(
            filtered.entries,
            vec![ReactionEntry {
                species: vec!["ed1".to_string(), "ts1".to_string()],
                stoichiometry: vec![-1, 1],
            }]
        );
    }

    #[test]
    fn stoichiometry_stops_at_the_weight_marker() {
        let input = lines(&["tmer2++ a/$f b/$f x 1 -2 $w1.0 3"]);
        let filtered = filter_reaction_lines(&input, &valid(&["a", "b"]), true).unwrap();
        assert_eq!(filtered.entries[0].stoichiometry, vec![1, -2]);
    }

    #[test]
    fn brace_groups_expand_within_a_reaction_line() {
        let input = lines(&["$tmer 01_10{P,R1,R2}/$func/ x 1 -1 -1"]);
        let filtered =
            filter_reaction_lines(&input, &valid(&["01_10P", "01_10R1", "01_10R2"]), true).unwrap();
        assert_eq!(
            filtered.entries[0].species,
            vec!["01_10P", "01_10R1", "01_10R2"]
        );
    }

    #[test]
    fn species_component_is_the_last_non_variable_segment() {
        let input = lines(&["$tmer path/to/MOL/$func/ x 1"]);
        let filtered = filter_reaction_lines(&input, &valid(&["MOL"]), true).unwrap();
        assert_eq!(filtered.entries[0].species, vec!["MOL"]);
    }

    #[test]
    fn tokens_with_only_variable_segments_contribute_nothing() {
        let input = lines(&["$tmer $f/$func a/$f x 1 1"]);
        let filtered = filter_reaction_lines(&input, &valid(&["a"]), true).unwrap();
        assert_eq!(filtered.entries[0].species, vec!["a"]);
    }

    #[test]
    fn duplicate_species_are_retained_in_the_list() {
        let input = lines(&["$tmer a/$f a/$f b/$f x 2 -1 -1"]);
        let filtered = filter_reaction_lines(&input, &valid(&["a", "b"]), true).unwrap();
        assert_eq!(filtered.entries[0].species, vec!["a", "a", "b"]);
    }

    #[test]
    fn reaction_with_unselected_species_is_dropped_entirely() {
        let input = lines(&[
            "# set",
            "$tmer good1/$f good2/$f x -1 1",
            "$tmer good1/$f missing/$f x -1 1",
        ]);
        let filtered = filter_reaction_lines(&input, &valid(&["good1", "good2"]), true).unwrap();
        assert_eq!(filtered.lines.len(), 2);
        assert_eq!(filtered.entries.len(), 1);
        assert_eq!(
            filtered.entries[0].species,
            vec!["good1".to_string(), "good2".to_string()]
        );
    }

    #[test]
    fn lenient_mode_drops_malformed_lines_with_a_record() {
        let input = lines(&[
            "$tmer a/$f x one",
            "$tmer a/$f x 1",
        ]);
        let filtered = filter_reaction_lines(&input, &valid(&["a"]), false).unwrap();
        assert_eq!(filtered.entries.len(), 1);
        assert_eq!(filtered.lines.len(), 1);
        assert_eq!(filtered.skipped.len(), 1);
        assert_eq!(filtered.skipped[0].line_number, 1);
        assert!(matches!(
            filtered.skipped[0].issue,
            ReactionLineIssue::Stoichiometry { .. }
        ));
    }

    #[test]
    fn strict_mode_aborts_on_malformed_stoichiometry() {
        let input = lines(&["$tmer a/$f x 1.5"]);
        let err = filter_reaction_lines(&input, &valid(&["a"]), true).unwrap_err();
        assert_eq!(err.line_number, 1);
        assert!(err.content.contains("$tmer"));
        assert!(matches!(err.issue, ReactionLineIssue::Stoichiometry { .. }));
    }

    #[test]
    fn strict_mode_aborts_on_malformed_brace_pattern() {
        let input = lines(&["$tmer bad{}/$f x 1"]);
        let err = filter_reaction_lines(&input, &valid(&[]), true).unwrap_err();
        assert!(matches!(err.issue, ReactionLineIssue::Pattern(_)));
    }

    #[test]
    fn component_with_a_single_brace_is_a_literal_species_name() {
        let input = lines(&["$tmer odd{name/$f x 1"]);
        let filtered = filter_reaction_lines(&input, &valid(&["odd{name"]), true).unwrap();
        assert_eq!(filtered.entries[0].species, vec!["odd{name"]);
    }

    #[test]
    fn kept_entries_stay_aligned_with_kept_reaction_order() {
        let input = lines(&[
            "$tmer a/$f x 1",
            "$tmer gone/$f x 1",
            "$tmer b/$f x 2",
        ]);
        let filtered = filter_reaction_lines(&input, &valid(&["a", "b"]), true).unwrap();
        assert_eq!(filtered.entries.len(), 2);
        assert_eq!(filtered.entries[0].species, vec!["a"]);
        assert_eq!(filtered.entries[1].species, vec!["b"]);
        assert_eq!(filtered.entries[1].stoichiometry, vec![2]);
    }
}
