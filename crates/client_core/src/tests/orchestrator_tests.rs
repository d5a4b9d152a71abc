use super::*;

use shared::{
    domain::JSON_MEDIA_TYPE,
    protocol::{ResultMetadata, SearchResult},
};

fn data_json() -> SelectedFile {
    SelectedFile::new("data.json", JSON_MEDIA_TYPE, br#"{"success":true}"#.to_vec())
}

#[test]
fn select_then_upload_success_resets_selection() {
    let mut orchestrator = RequestOrchestrator::new();

    orchestrator.select_file(Some(data_json()));
    assert_eq!(orchestrator.selected_file(), Some(&data_json()));
    assert_eq!(orchestrator.upload_status(), None);

    let request = orchestrator.submit_upload().expect("upload request");
    assert_eq!(request.file.name, "data.json");
    assert!(orchestrator.upload_state().is_in_flight());
    assert!(!orchestrator.upload_view().submit_enabled);

    orchestrator.settle_upload(Ok(UploadResponse::default()));
    assert_eq!(orchestrator.selected_file(), None);
    assert_eq!(orchestrator.selection_generation(), 1);
    assert_eq!(
        orchestrator.upload_status().map(|s| s.text.as_str()),
        Some("File uploaded successfully!")
    );

    // Same file can be chosen again right away.
    orchestrator.select_file(Some(data_json()));
    assert_eq!(orchestrator.selected_file(), Some(&data_json()));
}

#[test]
fn text_file_is_never_selected() {
    let mut orchestrator = RequestOrchestrator::new();

    orchestrator.select_file(Some(SelectedFile::new(
        "data.txt",
        "text/plain",
        b"hello".to_vec(),
    )));

    assert_eq!(orchestrator.selected_file(), None);
    let status = orchestrator.upload_status().expect("status");
    assert!(status.is_error());
    assert_eq!(status.text, "Please select a valid JSON file.");
    assert!(orchestrator.submit_upload().is_none());
}

#[test]
fn enter_key_and_button_share_the_same_guard() {
    let mut orchestrator = RequestOrchestrator::new();
    orchestrator.set_query("ERP");

    let first = orchestrator.key_pressed(InputKey::Enter).expect("request");
    assert!(orchestrator.submit_search(SearchTrigger::Button).is_none());
    assert!(orchestrator.key_pressed(InputKey::Enter).is_none());
    assert!(orchestrator.key_pressed(InputKey::Other).is_none());

    orchestrator.settle_search(first.seq, Ok(SearchResponse::default()));
    let second = orchestrator
        .submit_search(SearchTrigger::Button)
        .expect("request after settle");
    assert_eq!(second.seq, first.seq + 1);
}

#[test]
fn other_keys_never_submit() {
    let mut orchestrator = RequestOrchestrator::new();
    orchestrator.set_query("ERP");

    assert!(orchestrator.key_pressed(InputKey::Other).is_none());
    assert_eq!(orchestrator.search_state(), &SearchState::Idle);
}

#[test]
fn upload_and_search_are_independent() {
    let mut orchestrator = RequestOrchestrator::new();
    orchestrator.select_file(Some(data_json()));
    orchestrator.set_query("ERP");

    let upload = orchestrator.submit_upload();
    let search = orchestrator.submit_search(SearchTrigger::Button);
    assert!(upload.is_some());
    assert!(search.is_some());

    orchestrator.settle_search(
        search.expect("search").seq,
        Ok(SearchResponse {
            results: Some(vec![SearchResult {
                content: "ERP in 2025".into(),
                score: 0.5,
                metadata: ResultMetadata::default(),
            }]),
        }),
    );
    assert!(orchestrator.upload_state().is_in_flight());
    assert_eq!(orchestrator.search_state().results().len(), 1);
}

#[test]
fn failed_search_exposes_reason() {
    let mut orchestrator = RequestOrchestrator::new();
    orchestrator.set_query("ERP");
    let request = orchestrator
        .submit_search(SearchTrigger::Button)
        .expect("request");

    orchestrator.settle_search(
        request.seq,
        Err(ClientError::Dispatch("worker gone".into())),
    );

    assert!(orchestrator.search_state().results().is_empty());
    assert!(orchestrator
        .last_search_failure()
        .is_some_and(|reason| reason.contains("worker gone")));
}

#[test]
fn filters_flow_into_requests() {
    let mut orchestrator = RequestOrchestrator::new();
    orchestrator.set_query("ERP");
    orchestrator.set_filters(SearchFilters::new(None, Some("intro".into())));

    let request = orchestrator
        .submit_search(SearchTrigger::Button)
        .expect("request");

    assert_eq!(orchestrator.filters().label.as_deref(), Some("intro"));
    assert_eq!(request.params.label.as_deref(), Some("intro"));
}
