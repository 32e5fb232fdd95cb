// End-to-end state/URL synchronization across a browsing session.
#[path = "support/common.rs"]
mod common;

use hubstate::query::{HistoryMode, RecordingHistory, decode, encode};
use hubstate::{CdkType, Language, LanguageSpec, NavState, Session};

use common::{sample_metadata, sample_nav};

fn session(initial_query: &str) -> Session<RecordingHistory> {
    Session::hydrate(
        initial_query,
        &sample_metadata(),
        sample_nav(),
        LanguageSpec::default(),
        RecordingHistory::default(),
    )
}

#[test]
fn facet_refinement_rewrites_only_owned_keys() {
    let mut session = session("?sortBy=downloads&offset=25");
    assert!(session.set_facet("cdkType", "awscdk"));
    assert!(session.set_facet("cdkMajor", "2"));

    assert_eq!(
        session.query(),
        "sortBy=downloads&offset=25&cdkType=awscdk&cdkMajor=2"
    );
    // Both writes were in-place refinements, not navigations.
    assert!(
        session
            .history()
            .entries
            .iter()
            .all(|(mode, _)| *mode == HistoryMode::Replace)
    );
}

#[test]
fn selecting_a_submodule_pushes_and_preserves_selections() {
    let mut session = session("?language=python&cdkType=awscdk&cdkMajor=2&theme=dark");
    assert!(session.select_submodule("aws_s3"));

    assert_eq!(
        session.nav_state(),
        NavState::Submodule("aws_s3".to_string())
    );
    let state = session.state();
    assert_eq!(state.language, Some(Language::Python));
    assert_eq!(state.cdk_type, Some(CdkType::Awscdk));
    assert_eq!(state.cdk_major, Some(2));

    let (mode, query) = session.history().entries.last().expect("one navigation");
    assert_eq!(*mode, HistoryMode::Push);
    assert!(query.contains("submodule=aws_s3"));
    assert!(query.contains("theme=dark"));
    assert!(query.contains("language=python"));
}

#[test]
fn going_back_carries_language_and_spares_foreign_keys() {
    let mut session = session("?language=java&cdkType=awscdk&theme=dark");
    assert!(session.select_submodule("aws_ec2"));
    assert!(session.go_back());

    assert_eq!(session.nav_state(), NavState::Root);
    let state = session.state();
    assert_eq!(state.language, Some(Language::Java));
    assert_eq!(state.submodule, None);
    assert_eq!(state.cdk_type, None);

    // Owned keys collapse to the carried language; foreign keys are not this
    // store's to drop.
    assert_eq!(session.query(), "theme=dark&language=java");
    let (mode, _) = session.history().entries.last().expect("back navigation");
    assert_eq!(*mode, HistoryMode::Push);
}

#[test]
fn back_at_root_is_a_no_op() {
    let mut session = session("?language=java");
    assert!(!session.go_back());
    assert!(session.history().entries.is_empty());
    assert_eq!(session.query(), "language=java");
}

#[test]
fn unknown_submodule_in_url_degrades_to_root() {
    let session = session("?submodule=aws_route53&cdkType=awscdk");
    assert_eq!(session.nav_state(), NavState::Root);
    assert!(!session.can_go_back());
    // The invalid key never becomes observable state.
    assert_eq!(session.state().submodule, None);
}

#[test]
fn invalid_submodule_and_major_are_corrected_independently() {
    // Both defects at once; each rule fires on its own field regardless of
    // the other's outcome.
    {
        let session = session("?submodule=aws_route53&cdkType=awscdk&cdkMajor=2");
        assert_eq!(session.state().submodule, None);
        assert_eq!(session.state().cdk_major, Some(2));
    }

    let session = session("?submodule=aws_s3&cdkType=awscdk&cdkMajor=9");
    assert_eq!(session.state().submodule.as_deref(), Some("aws_s3"));
    assert_eq!(session.state().cdk_major, None);
}

#[test]
fn cascading_invalidation_reaches_the_url_atomically() {
    let mut session = session("?cdkType=awscdk&cdkMajor=1");
    // cdk8s offers major 2 only; the stale major must leave state and URL in
    // the same transition.
    assert!(session.set_cdk_type(Some(CdkType::Cdk8s)));
    assert_eq!(session.state().cdk_major, None);
    assert_eq!(session.query(), "cdkType=cdk8s");
    assert_eq!(session.history().entries.len(), 1);
}

#[test]
fn free_text_drives_submodule_search() {
    let mut session = session("");
    assert!(session.set_free_text(Some("s3")));
    let results = session.submodule_options("s3");
    assert_eq!(
        results.iter().map(|o| o.value.as_str()).collect::<Vec<_>>(),
        vec!["aws_s3", "aws_s3_deployment"]
    );
    assert_eq!(session.query(), "q=s3");
}

#[test]
fn round_trip_holds_for_session_states() {
    let mut session = session("");
    session.set_facet("language", "golang");
    session.set_facet("cdkType", "awscdk");
    session.set_facet("cdkMajor", "1");
    session.set_facet("q", "bucket policy");
    session.select_submodule("aws_s3_deployment");

    let state = session.state().clone();
    assert_eq!(decode(&encode(&state, "")), state);
    assert_eq!(decode(session.query()), state);
}
