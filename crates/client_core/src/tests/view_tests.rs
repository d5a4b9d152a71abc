use super::*;

use shared::{
    domain::{SelectedFile, JSON_MEDIA_TYPE},
    protocol::{ResultMetadata, SearchResponse},
};

use crate::{
    orchestrator::RequestOrchestrator,
    reducer::{SearchState, SearchTrigger},
};

fn settled(query: &str, results: Option<Vec<SearchResult>>) -> RequestOrchestrator {
    let mut orchestrator = RequestOrchestrator::new();
    orchestrator.set_query(query);
    let request = orchestrator
        .submit_search(SearchTrigger::Button)
        .expect("request");
    orchestrator.settle_search(request.seq, Ok(SearchResponse { results }));
    orchestrator
}

fn result_with(metadata: ResultMetadata, score: f64) -> SearchResult {
    SearchResult {
        content: "ERP spending rises in 2025".into(),
        score,
        metadata,
    }
}

#[test]
fn formats_scores_to_three_decimals() {
    assert_eq!(format_score(0.8234), "0.823");
    assert_eq!(format_score(2.0), "2.000");
    assert_eq!(format_score(12.34567), "12.346");
    assert_eq!(format_score(0.0004), "0.000");
}

#[test]
fn single_hit_renders_only_present_tags() {
    let orchestrator = settled(
        "ERP",
        Some(vec![result_with(
            ResultMetadata {
                file_source: Some("a.pdf".into()),
                ..Default::default()
            },
            0.8234,
        )]),
    );

    let ResultsView::Results { heading, items } = orchestrator.search_view().results else {
        panic!("expected results");
    };
    assert_eq!(heading, "Search Results (1 chunks found)");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content, "ERP spending rises in 2025");
    assert_eq!(items[0].score, "0.823");
    assert_eq!(
        items[0].tags,
        vec![MetadataTag {
            field: MetadataField::FileSource,
            value: "a.pdf".into(),
        }]
    );
    assert_eq!(items[0].tags[0].to_string(), "📄 a.pdf");
}

#[test]
fn author_tag_appears_only_when_present() {
    let with_author = result_item(&result_with(
        ResultMetadata {
            author: Some("Jane Roe".into()),
            ..Default::default()
        },
        1.0,
    ));
    let without_author = result_item(&result_with(ResultMetadata::default(), 1.0));

    assert!(with_author
        .tags
        .iter()
        .any(|tag| tag.field == MetadataField::Author && tag.value == "Jane Roe"));
    assert!(without_author.tags.is_empty());
}

#[test]
fn tags_follow_fixed_field_order() {
    let item = result_item(&result_with(
        ResultMetadata {
            category: Some("tech".into()),
            author: Some("A".into()),
            label: Some("intro".into()),
            file_source: Some("a.pdf".into()),
            ..Default::default()
        },
        1.0,
    ));
    let fields: Vec<_> = item.tags.iter().map(|tag| tag.field).collect();
    assert_eq!(fields, MetadataField::ALL.to_vec());
}

#[test]
fn rendered_order_matches_server_order() {
    let orchestrator = settled(
        "ERP",
        Some(vec![
            result_with(ResultMetadata::default(), 0.2),
            result_with(ResultMetadata::default(), 5.0),
            result_with(ResultMetadata::default(), 1.0),
        ]),
    );

    let ResultsView::Results { items, .. } = orchestrator.search_view().results else {
        panic!("expected results");
    };
    let scores: Vec<_> = items.iter().map(|item| item.score.as_str()).collect();
    assert_eq!(scores, ["0.200", "5.000", "1.000"]);
}

#[test]
fn zero_hits_show_notice_and_keep_query() {
    let orchestrator = settled("zzz_no_match", Some(Vec::new()));

    assert_eq!(
        orchestrator.search_view().results,
        ResultsView::NoResults {
            notice: NO_RESULTS_NOTICE
        }
    );
    assert_eq!(orchestrator.query(), "zzz_no_match");
}

#[test]
fn absent_results_field_shows_notice() {
    let orchestrator = settled("ERP", None);
    assert_eq!(orchestrator.search_state(), &SearchState::Empty);
    assert!(matches!(
        orchestrator.search_view().results,
        ResultsView::NoResults { .. }
    ));
}

#[test]
fn nothing_renders_before_first_search() {
    let mut orchestrator = RequestOrchestrator::new();
    assert_eq!(orchestrator.search_view().results, ResultsView::Hidden);

    orchestrator.set_query("ERP");
    assert_eq!(orchestrator.search_view().results, ResultsView::Hidden);
}

#[test]
fn whitespace_submit_renders_nothing() {
    let mut orchestrator = RequestOrchestrator::new();
    orchestrator.set_query("   ");

    assert!(orchestrator.submit_search(SearchTrigger::Button).is_none());
    let view = orchestrator.search_view();
    assert_eq!(view.results, ResultsView::Hidden);
    assert!(!view.submit_enabled);
}

#[test]
fn clearing_query_hides_no_results_notice() {
    let mut orchestrator = settled("zzz_no_match", Some(Vec::new()));
    orchestrator.set_query("");
    assert_eq!(orchestrator.search_view().results, ResultsView::Hidden);
}

#[test]
fn searching_shows_indicator_and_disables_button() {
    let mut orchestrator = settled(
        "ERP",
        Some(vec![result_with(ResultMetadata::default(), 1.0)]),
    );
    orchestrator
        .submit_search(SearchTrigger::Button)
        .expect("second search");

    let view = orchestrator.search_view();
    assert_eq!(
        view.results,
        ResultsView::Searching {
            notice: SEARCHING_NOTICE
        }
    );
    assert!(!view.submit_enabled);
    assert_eq!(view.submit_label, SEARCHING_LABEL);
}

#[test]
fn upload_view_tracks_selection_and_progress() {
    let mut orchestrator = RequestOrchestrator::new();
    let idle = orchestrator.upload_view();
    assert!(!idle.submit_enabled);
    assert_eq!(idle.submit_label, UPLOAD_LABEL);
    assert_eq!(idle.selected_file_name, None);

    orchestrator.select_file(Some(SelectedFile::new(
        "data.json",
        JSON_MEDIA_TYPE,
        b"{}".to_vec(),
    )));
    let ready = orchestrator.upload_view();
    assert!(ready.submit_enabled);
    assert_eq!(ready.selected_file_name.as_deref(), Some("data.json"));

    orchestrator.submit_upload().expect("request");
    let busy = orchestrator.upload_view();
    assert!(!busy.submit_enabled);
    assert_eq!(busy.submit_label, UPLOADING_LABEL);
}
