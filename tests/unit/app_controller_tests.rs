/*!
 * Tests for the ingest controller against the mock API
 */

use std::path::Path;

use netplus_ingest::app_config::Config;
use netplus_ingest::errors::{ApiError, AppError, SubtitleError};
use netplus_ingest::upload::NoProgress;
use netplus_ingest::Controller;
use crate::common;
use crate::common::mock_api::MockIngestApi;

fn controller() -> Controller<MockIngestApi> {
    Controller::with_api(Config::default(), MockIngestApi::new("http://127.0.0.1:9/upload"))
}

#[tokio::test]
async fn test_ingestSubtitles_withCleanPaste_shouldSendOneBulkRequest() {
    let controller = controller();

    let response = controller
        .ingest_subtitles("ep-1", common::sample_subtitle_paste())
        .await
        .unwrap();
    assert_eq!(response.inserted_count, 4);

    let tracker = controller.api().tracker();
    let tracker = tracker.lock().unwrap();
    assert_eq!(tracker.calls, vec!["ingest_subtitle_lines"]);
    let lines = &tracker.bulk_requests[0].lines;
    assert_eq!(lines.len(), 4);
    assert!(lines.iter().all(|l| l.episode_id == "ep-1"));
    assert_eq!(lines[1].speaker_text.as_deref(), Some("A"));
}

#[tokio::test]
async fn test_ingestSubtitles_withAnyBadLine_shouldNotCallApi() {
    let controller = controller();

    let result = controller
        .ingest_subtitles("ep-1", "0|1000|fine\nbroken\n2000|1000|backwards")
        .await;

    match result {
        Err(AppError::Subtitle(SubtitleError::InvalidLines(summary))) => {
            assert_eq!(summary, "Line 2: unsupported format, Line 3: invalid time range");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(controller.api().tracker().lock().unwrap().calls.is_empty());
}

#[tokio::test]
async fn test_ingestSubtitles_withManyBadLines_shouldReportFirstFive() {
    let controller = controller();
    let input = (1..=8).map(|i| format!("bad {}", i)).collect::<Vec<_>>().join("\n");

    let err = controller.ingest_subtitles("ep-1", &input).await.unwrap_err();
    let message = err.to_string();

    assert_eq!(message.matches("unsupported format").count(), 5);
    assert!(message.contains("Line 5"));
    assert!(!message.contains("Line 6"));
}

#[tokio::test]
async fn test_ingestSubtitles_withEmptyPaste_shouldRejectNothingToUpload() {
    let controller = controller();

    let err = controller.ingest_subtitles("ep-1", "\n\n  \n").await.unwrap_err();
    assert!(matches!(err, AppError::Subtitle(SubtitleError::NothingToUpload)));
    assert!(controller.api().tracker().lock().unwrap().calls.is_empty());
}

#[tokio::test]
async fn test_ingestSubtitles_withoutEpisode_shouldRejectInput() {
    let controller = controller();
    let err = controller.ingest_subtitles("  ", "0|1|a").await.unwrap_err();
    assert_eq!(err.to_string(), "Select an episode first.");
}

#[tokio::test]
async fn test_ingestSubtitles_withApiFailure_shouldSurfaceApiError() {
    let controller = controller();
    controller.api().fail_next_call();

    let err = controller.ingest_subtitles("ep-1", "0|1|a").await.unwrap_err();
    assert!(matches!(err, AppError::Api(ApiError::ApiError { status_code: 500, .. })));
}

#[tokio::test]
async fn test_uploadVideo_withMissingFile_shouldFailBeforeSignature() {
    let controller = controller();

    let err = controller
        .upload_video("ep-1", Path::new("/no/such/video.mp4"), &NoProgress)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(controller.api().tracker().lock().unwrap().calls.is_empty());
}

#[tokio::test]
async fn test_uploadVideo_withSignatureFailure_shouldNotUpload() {
    let temp_dir = common::create_temp_dir().unwrap();
    let video = common::create_sized_file(temp_dir.path(), "ep01.mp4", 64).unwrap();
    let controller = controller();
    controller.api().fail_next_call();

    let err = controller.upload_video("ep-1", &video, &NoProgress).await.unwrap_err();
    assert!(matches!(err, AppError::Api(_)));
    assert_eq!(
        controller.api().tracker().lock().unwrap().calls,
        vec!["issue_video_upload_signature"]
    );
}

#[tokio::test]
async fn test_unlinkVideo_shouldReturnEpisodeWithoutVideo() {
    let controller = controller();
    let episode = controller.unlink_video("ep-1").await.unwrap();
    assert_eq!(episode.id, "ep-1");
    assert_eq!(episode.video_url, None);
}

#[tokio::test]
async fn test_unlinkThumbnail_shouldReturnTitleWithoutThumbnail() {
    let controller = controller();
    let title = controller.unlink_thumbnail("title-1").await.unwrap();
    assert_eq!(title.id, "title-1");
    assert_eq!(title.thumbnail_url, None);
    assert_eq!(
        controller.api().tracker().lock().unwrap().calls,
        vec!["delete_title_thumbnail_url"]
    );
}

#[test]
fn test_previewSubtitles_shouldNotTouchApi() {
    let controller = controller();
    let outcome = controller.preview_subtitles("(0:01) Hi");
    assert_eq!(outcome.lines.len(), 1);
    assert!(controller.api().tracker().lock().unwrap().calls.is_empty());
}

#[test]
fn test_uploadThumbnail_withoutTitle_shouldRejectBeforeAnyCall() {
    let controller = controller();
    let result = tokio_test::block_on(async {
        controller.upload_thumbnail("", Path::new("/tmp/poster.jpg")).await
    });

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    assert!(controller.api().tracker().lock().unwrap().calls.is_empty());
}

#[tokio::test]
async fn test_uploadThumbnail_withMockStorage_shouldLinkReturnedUrl() {
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"secure_url": "https://cdn.example/poster.jpg"})),
        )
        .mount(&server)
        .await;

    let temp_dir = common::create_temp_dir().unwrap();
    let image = common::create_sized_file(temp_dir.path(), "poster.jpg", 16).unwrap();
    let controller = Controller::with_api(
        Config::default(),
        MockIngestApi::new(&format!("{}/image/upload", server.uri())),
    );

    let url = controller.upload_thumbnail("title-1", &image).await.unwrap();
    assert_eq!(url, "https://cdn.example/poster.jpg");

    let tracker = controller.api().tracker();
    let tracker = tracker.lock().unwrap();
    assert_eq!(tracker.calls, vec!["issue_image_upload_signature", "update_title_thumbnail_url"]);
    assert_eq!(
        tracker.thumbnail_links,
        vec![("title-1".to_string(), "https://cdn.example/poster.jpg".to_string())]
    );
    assert!(tracker.video_links.is_empty());
}

#[tokio::test]
async fn test_ingestSubtitles_withBlankRows_shouldReportNonEmptyRowNumbers() {
    let controller = controller();

    let err = controller
        .ingest_subtitles("ep-1", "0|1000|fine\n\n\nbroken")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Subtitle error: Line 2: unsupported format");
}
