use super::*;

#[test]
fn test_two_party_scores() {
    let scorer = AffiliationScorer::new();

    assert_eq!(scorer.score(Some("Republican Party")), 1);
    assert_eq!(scorer.score(Some("Democratic Party")), -1);
    assert_eq!(scorer.score(Some("Independent")), 0);
    assert_eq!(scorer.score(None), 0);
}

#[test]
fn test_case_insensitive_substring() {
    let scorer = AffiliationScorer::new();

    assert_eq!(scorer.score(Some("REPUBLICAN PARTY")), 1);
    assert_eq!(scorer.score(Some("Minnesota Democratic–Farmer–Labor Party")), -1);
    assert_eq!(scorer.score(Some("Christian Democratic Union")), -1);
    assert_eq!(scorer.score(Some("")), 0);
}

#[test]
fn test_republican_checked_first() {
    let scorer = AffiliationScorer::new();

    assert_eq!(scorer.lean(Some("Democratic-Republican Party")), Lean::Right);
}

#[test]
fn test_lean_values() {
    assert_eq!(Lean::Left.value(), -1);
    assert_eq!(Lean::Neutral.value(), 0);
    assert_eq!(Lean::Right.value(), 1);
    assert_eq!(Lean::Right.to_string(), "right");
}
