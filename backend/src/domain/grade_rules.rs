//! Grading policy rules applied before a class grade is computed.
//!
//! Rules form an ordered pipeline of pure `assignments -> assignments`
//! transforms folded over the countable set: each rule operates on the
//! output of the previous one, so a later rule never sees assignments an
//! earlier rule already dropped. The only rule type today is drop-lowest;
//! unrecognized rule types pass the working set through unchanged.

use shared::{Assignment, GradeRule, RULE_DROP_LOWEST};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Apply every rule in list order and return the surviving assignments.
pub fn apply<'a>(assignments: Vec<&'a Assignment>, rules: &[GradeRule]) -> Vec<&'a Assignment> {
    rules.iter().fold(assignments, |working, rule| {
        if rule.rule_type == RULE_DROP_LOWEST {
            drop_lowest(working, rule)
        } else {
            working
        }
    })
}

/// Remove the `drop_count()` lowest-ratio assignments in the rule's
/// category from the working set.
///
/// Ties in ratio keep their original relative order (the sort is stable),
/// so repeated runs over the same document drop the same assignments.
fn drop_lowest<'a>(working: Vec<&'a Assignment>, rule: &GradeRule) -> Vec<&'a Assignment> {
    let mut in_category: Vec<&Assignment> = working
        .iter()
        .copied()
        .filter(|assignment| assignment.category == rule.category)
        .collect();

    if in_category.is_empty() {
        return working;
    }

    in_category.sort_by(|a, b| {
        a.score_ratio()
            .partial_cmp(&b.score_ratio())
            .unwrap_or(Ordering::Equal)
    });

    let dropped: HashSet<&str> = in_category
        .iter()
        .take(rule.drop_count())
        .map(|assignment| assignment.id.as_str())
        .collect();

    working
        .into_iter()
        .filter(|assignment| !dropped.contains(assignment.id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(id: &str, category: &str, grade: f64, total: f64) -> Assignment {
        Assignment {
            id: id.to_string(),
            category: category.to_string(),
            grade,
            total,
            ..Assignment::default()
        }
    }

    fn drop_rule(category: &str, count: Option<f64>) -> GradeRule {
        GradeRule {
            rule_type: RULE_DROP_LOWEST.to_string(),
            category: category.to_string(),
            count,
        }
    }

    #[test]
    fn drops_exactly_the_lowest_ratio() {
        let a = assignment("a", "Quizzes", 5.0, 10.0); // 0.5
        let b = assignment("b", "Quizzes", 9.0, 10.0); // 0.9
        let c = assignment("c", "Quizzes", 7.0, 10.0); // 0.7

        let kept = apply(vec![&a, &b, &c], &[drop_rule("Quizzes", Some(1.0))]);
        let ids: Vec<&str> = kept.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn only_named_category_is_touched() {
        let quiz = assignment("q", "Quizzes", 0.0, 10.0);
        let exam = assignment("e", "Exams", 0.0, 100.0);

        let kept = apply(vec![&quiz, &exam], &[drop_rule("Quizzes", None)]);
        let ids: Vec<&str> = kept.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, vec!["e"]);
    }

    #[test]
    fn zero_total_counts_as_zero_ratio() {
        let broken = assignment("broken", "Quizzes", 10.0, 0.0);
        let solid = assignment("solid", "Quizzes", 8.0, 10.0);

        let kept = apply(vec![&broken, &solid], &[drop_rule("Quizzes", Some(1.0))]);
        let ids: Vec<&str> = kept.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, vec!["solid"]);
    }

    #[test]
    fn ratio_ties_drop_in_original_order() {
        let first = assignment("first", "Quizzes", 7.0, 10.0);
        let second = assignment("second", "Quizzes", 70.0, 100.0);

        let kept = apply(vec![&first, &second], &[drop_rule("Quizzes", Some(1.0))]);
        let ids: Vec<&str> = kept.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, vec!["second"]);
    }

    #[test]
    fn rules_apply_cumulatively_in_order() {
        let a = assignment("a", "Quizzes", 5.0, 10.0);
        let b = assignment("b", "Quizzes", 6.0, 10.0);
        let c = assignment("c", "Quizzes", 7.0, 10.0);

        let rules = vec![drop_rule("Quizzes", Some(1.0)), drop_rule("Quizzes", Some(1.0))];
        let kept = apply(vec![&a, &b, &c], &rules);
        let ids: Vec<&str> = kept.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
    }

    #[test]
    fn count_larger_than_category_drops_everything_in_it() {
        let a = assignment("a", "Quizzes", 5.0, 10.0);
        let b = assignment("b", "Quizzes", 6.0, 10.0);
        let other = assignment("o", "Exams", 80.0, 100.0);

        let kept = apply(vec![&a, &b, &other], &[drop_rule("Quizzes", Some(5.0))]);
        let ids: Vec<&str> = kept.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, vec!["o"]);
    }

    #[test]
    fn unknown_rule_type_is_ignored() {
        let a = assignment("a", "Quizzes", 5.0, 10.0);
        let rule = GradeRule {
            rule_type: "REPLACE_WITH_FINAL".to_string(),
            category: "Quizzes".to_string(),
            count: None,
        };

        let kept = apply(vec![&a], &[rule]);
        assert_eq!(kept.len(), 1);
    }
}
