use super::*;
use crate::cache::Affiliation;
use crate::entity::{Entity, EntityKind};
use std::sync::Arc;

fn titles(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn resolver(source: Arc<MockKnowledgeSource>, limit: usize, filter: CandidateFilter) -> CandidateResolver {
    CandidateResolver::new(
        source,
        ResolverSettings {
            candidate_limit: limit,
            filter,
        },
    )
}

#[test]
fn test_normalize_title() {
    assert_eq!(normalize_title("John Smith (politician)"), "John Smith");
    assert_eq!(normalize_title("  John   Smith  "), "John Smith");
    assert_eq!(normalize_title("Obama (surname)"), "Obama");
    assert_eq!(normalize_title("The (Real) Deal"), "The (Real) Deal");
    assert_eq!(normalize_title("(disambiguation)"), "");
}

#[test]
fn test_strict_filter_requires_overlap() {
    let selected = select_candidates(
        "Barack Obama",
        &titles(&["Barack Obama", "Michelle Obama", "Joe Biden", "Presidency of barack"]),
        &[],
        CandidateFilter::Strict,
        10,
    );

    assert_eq!(
        selected,
        titles(&["Barack Obama", "Michelle Obama", "Presidency of barack"])
    );
}

#[test]
fn test_loose_filter_requires_two_words() {
    let selected = select_candidates(
        "Obama",
        &titles(&["Obama", "Joe Biden", "Obama (surname)", "Barack Obama"]),
        &[],
        CandidateFilter::Loose,
        10,
    );

    assert_eq!(selected, titles(&["Joe Biden", "Barack Obama"]));
}

#[test]
fn test_candidates_deduplicated_after_normalization() {
    let selected = select_candidates(
        "John Smith",
        &titles(&["John Smith (politician)", "John Smith (footballer)", "John Smith"]),
        &[],
        CandidateFilter::Strict,
        10,
    );

    assert_eq!(selected, titles(&["John Smith"]));
}

#[test]
fn test_candidate_limit_applies_after_filtering() {
    let selected = select_candidates(
        "Smith",
        &titles(&["Unrelated", "Adam Smith", "Will Smith", "Granny Smith", "Smith River"]),
        &[],
        CandidateFilter::Strict,
        3,
    );

    assert_eq!(selected, titles(&["Adam Smith", "Will Smith", "Granny Smith"]));
}

#[test]
fn test_preferred_titles_move_to_front() {
    let selected = select_candidates(
        "Clinton",
        &titles(&["Bill Clinton", "Clinton, Iowa", "Hillary Clinton"]),
        &titles(&["hillary clinton", "Donald Trump"]),
        CandidateFilter::Strict,
        2,
    );

    assert_eq!(selected, titles(&["Hillary Clinton", "Bill Clinton"]));
}

#[test]
fn test_filter_parse() {
    assert_eq!(CandidateFilter::parse("strict"), Some(CandidateFilter::Strict));
    assert_eq!(CandidateFilter::parse(" Loose "), Some(CandidateFilter::Loose));
    assert_eq!(CandidateFilter::parse("fuzzy"), None);
    assert_eq!(CandidateFilter::Loose.to_string(), "loose");
}

#[tokio::test]
async fn test_first_success_wins() {
    let source = Arc::new(
        MockKnowledgeSource::new()
            .with_search("Barack Obama", ["Barack Obama", "Barack Obama Sr.", "Michelle Obama"])
            .with_party("Barack Obama", "Democratic Party")
            .with_party("Michelle Obama", "Democratic Party"),
    );
    let resolver = resolver(source.clone(), 3, CandidateFilter::Strict);

    let resolution = resolver.resolve(&Entity::person("Barack Obama"), &[]).await;

    assert_eq!(
        resolution,
        Resolution::Affiliated(Affiliation::new("Barack Obama", "Democratic Party"))
    );
    assert_eq!(source.search_calls(), 1);
    assert_eq!(source.party_calls(), 1);
}

#[tokio::test]
async fn test_absent_property_tries_next_candidate() {
    let source = Arc::new(
        MockKnowledgeSource::new()
            .with_search("John Smith", ["John Smith (footballer)", "John Smith (explorer)", "John Smith Jr."])
            .with_party("John Smith Jr.", "Labour Party"),
    );
    let resolver = resolver(source.clone(), 3, CandidateFilter::Strict);

    let resolution = resolver.resolve(&Entity::person("John Smith"), &[]).await;

    assert_eq!(
        resolution,
        Resolution::Affiliated(Affiliation::new("John Smith Jr.", "Labour Party"))
    );
    assert_eq!(source.queried_titles(), titles(&["John Smith", "John Smith Jr."]));
}

#[tokio::test]
async fn test_not_political_after_k_candidates() {
    let source = Arc::new(
        MockKnowledgeSource::new()
            .with_search(
                "Taylor Swift",
                ["Taylor Swift", "Taylor Swift albums", "Taylor Swift masters", "Taylor Swift Politician"],
            )
            .with_party("Taylor Swift Politician", "Republican Party"),
    );
    let resolver = resolver(source.clone(), 3, CandidateFilter::Strict);

    let resolution = resolver.resolve(&Entity::person("Taylor Swift"), &[]).await;

    assert_eq!(resolution, Resolution::NotPolitical { candidates_checked: 3 });
    assert_eq!(resolution.to_record(), Some(crate::cache::AffiliationRecord::Negative));
    assert_eq!(source.party_calls(), 3);
}

#[tokio::test]
async fn test_candidate_error_is_skipped() {
    let source = Arc::new(
        MockKnowledgeSource::new()
            .with_search("Joe Biden", ["Joe Biden", "Joe Biden Sr."])
            .with_failing_title("Joe Biden")
            .with_party("Joe Biden Sr.", "Democratic Party"),
    );
    let resolver = resolver(source.clone(), 3, CandidateFilter::Strict);

    let resolution = resolver.resolve(&Entity::person("Joe Biden"), &[]).await;

    assert_eq!(
        resolution.affiliation(),
        Some(&Affiliation::new("Joe Biden Sr.", "Democratic Party"))
    );
}

#[tokio::test]
async fn test_search_failure_is_unavailable() {
    let source = Arc::new(MockKnowledgeSource::new().with_failing_search("Angela Merkel"));
    let resolver = resolver(source.clone(), 3, CandidateFilter::Strict);

    let resolution = resolver.resolve(&Entity::person("Angela Merkel"), &[]).await;

    assert!(matches!(resolution, Resolution::Unavailable { .. }));
    assert_eq!(resolution.to_record(), None);
    assert_eq!(source.party_calls(), 0);
}

#[tokio::test]
async fn test_non_person_makes_no_calls() {
    let source = Arc::new(MockKnowledgeSource::new());
    let resolver = resolver(source.clone(), 3, CandidateFilter::Strict);

    let resolution = resolver
        .resolve(&Entity::new("NATO", EntityKind::Organization), &[])
        .await;

    assert_eq!(resolution, Resolution::Unsupported(EntityKind::Organization));
    assert_eq!(resolution.to_record(), None);
    assert_eq!(source.total_calls(), 0);
}

#[tokio::test]
async fn test_empty_search_is_not_political() {
    let source = Arc::new(MockKnowledgeSource::new());
    let resolver = resolver(source.clone(), 3, CandidateFilter::Strict);

    let resolution = resolver.resolve(&Entity::person("Nobody Anyone"), &[]).await;

    assert_eq!(resolution, Resolution::NotPolitical { candidates_checked: 0 });
}

#[tokio::test]
async fn test_blank_party_is_treated_as_absent() {
    let source = Arc::new(
        MockKnowledgeSource::new()
            .with_search("Jane Doe", ["Jane Doe"])
            .with_party("Jane Doe", "   "),
    );
    let resolver = resolver(source, 3, CandidateFilter::Strict);

    let resolution = resolver.resolve(&Entity::person("Jane Doe"), &[]).await;

    assert_eq!(resolution, Resolution::NotPolitical { candidates_checked: 1 });
}

#[tokio::test]
async fn test_preferred_title_resolves_first() {
    let source = Arc::new(
        MockKnowledgeSource::new()
            .with_search("Clinton", ["Bill Clinton", "Hillary Clinton"])
            .with_party("Bill Clinton", "Democratic Party")
            .with_party("Hillary Clinton", "Democratic Party"),
    );
    let resolver = resolver(source.clone(), 3, CandidateFilter::Strict);

    let resolution = resolver
        .resolve(&Entity::person("Clinton"), &titles(&["Hillary Clinton"]))
        .await;

    assert_eq!(resolution.affiliation().map(|a| a.title.as_str()), Some("Hillary Clinton"));
    assert_eq!(source.queried_titles(), titles(&["Hillary Clinton"]));
}

#[test]
fn test_resolution_display() {
    let resolution = Resolution::Affiliated(Affiliation::new("A", "B"));
    assert_eq!(resolution.to_string(), "AFFILIATED (A -> B)");
    assert_eq!(resolution.debug_status(), "AFFILIATED");
    assert_eq!(
        Resolution::Unsupported(EntityKind::Gpe).to_string(),
        "UNSUPPORTED (GPE)"
    );
}
