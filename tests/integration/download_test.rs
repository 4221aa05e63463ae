use super::fakes::{context, paths, FakeEngine, FakeRunner};
use convertor::commands::download::{MODE_PROMPT, QUERY_PROMPT};
use convertor::commands::menu::RETURN_PROMPT;
use convertor::commands::{ActionReport, Command, Menu, MenuOutcome};
use convertor::core::{DownloadRequest, Downloader, MediaKind, Platform};
use convertor::error::ConvertorError;
use convertor::ui::{ProgressReporter, ScriptedPrompter};
use std::time::Duration;

fn menu() -> Menu {
    Menu::new().with_invalid_pause(Duration::ZERO)
}

fn finished(outcome: MenuOutcome) -> (Command, convertor::Result<ActionReport>) {
    match outcome {
        MenuOutcome::Finished { command, result } => (command, result),
        other => panic!("expected a finished command, got {:?}", other),
    }
}

#[test]
fn test_search_audio_download_reports_mp3_name() {
    let dir = tempfile::tempdir().unwrap();
    let engine = FakeEngine::resolving_to("Lofi Beats Mix", "https://www.youtube.com/watch?v=lofi");
    let log = engine.log.clone();
    let ctx = context(paths(dir.path(), true), engine, FakeRunner::succeeding());
    let mut prompter = ScriptedPrompter::new(["lofi beats", "2", ""]);

    let (command, result) = finished(menu().dispatch(&ctx, &mut prompter, "1").unwrap());

    assert_eq!(command, Command::YouTube);
    match result.unwrap() {
        ActionReport::Saved(message) => {
            assert!(message.contains("'Downloads'"), "{}", message);
            assert!(message.ends_with("Lofi Beats Mix.mp3"), "{}", message);
        }
        other => panic!("unexpected report {:?}", other),
    }
    assert_eq!(
        *log.borrow(),
        vec![
            "extract:ytsearch:lofi beats".to_string(),
            "download:https://www.youtube.com/watch?v=lofi".to_string(),
            "audio".to_string(),
        ]
    );
    assert_eq!(prompter.prompts(), [QUERY_PROMPT, MODE_PROMPT, RETURN_PROMPT]);
}

#[test]
fn test_empty_query_never_reaches_engine() {
    let dir = tempfile::tempdir().unwrap();
    let engine = FakeEngine::resolving_to("x", "https://example.com/x");
    let log = engine.log.clone();
    let ctx = context(paths(dir.path(), true), engine, FakeRunner::succeeding());
    let mut prompter = ScriptedPrompter::new(["   ", ""]);

    let (_, result) = finished(menu().dispatch(&ctx, &mut prompter, "2").unwrap());

    assert_eq!(result.unwrap(), ActionReport::Skipped);
    assert!(log.borrow().is_empty());
    // No mode prompt either
    assert_eq!(prompter.prompts(), [QUERY_PROMPT, RETURN_PROMPT]);
}

#[test]
fn test_audio_without_transcoder_is_refused_before_engine() {
    let dir = tempfile::tempdir().unwrap();
    let engine = FakeEngine::resolving_to("x", "https://example.com/x");
    let log = engine.log.clone();
    let ctx = context(paths(dir.path(), false), engine, FakeRunner::succeeding());
    let mut prompter = ScriptedPrompter::new(["some song", "2", ""]);

    let (_, result) = finished(menu().dispatch(&ctx, &mut prompter, "1").unwrap());

    let err = result.unwrap_err();
    assert!(matches!(err, ConvertorError::TranscoderMissing(_)), "{:?}", err);
    assert!(err.to_string().contains("audio export requires the transcoder"));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_video_works_without_transcoder() {
    let dir = tempfile::tempdir().unwrap();
    let engine = FakeEngine::resolving_to("Rain Sounds", "https://soundcloud.com/a/rain");
    let ctx = context(paths(dir.path(), false), engine, FakeRunner::succeeding());
    let mut prompter = ScriptedPrompter::new(["rain", "1", ""]);

    let (_, result) = finished(menu().dispatch(&ctx, &mut prompter, "2").unwrap());

    assert_eq!(
        result.unwrap(),
        ActionReport::Saved("File saved to the 'Downloads' folder as: Rain Sounds.mp4".to_string())
    );
}

#[test]
fn test_mode_prompt_repeats_until_valid() {
    let dir = tempfile::tempdir().unwrap();
    let engine = FakeEngine::resolving_to("Clip", "https://example.com/clip");
    let ctx = context(paths(dir.path(), true), engine, FakeRunner::succeeding());
    let mut prompter = ScriptedPrompter::new(["clip", "3", "video", " 1", "1", ""]);

    let (_, result) = finished(menu().dispatch(&ctx, &mut prompter, "3").unwrap());

    assert!(result.is_ok());
    let mode_prompts = prompter.prompts().iter().filter(|p| *p == MODE_PROMPT).count();
    assert_eq!(mode_prompts, 4);
    assert_eq!(prompter.remaining(), 0);
}

#[test]
fn test_url_is_passed_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://soundcloud.com/artist/track";
    let engine = FakeEngine::resolving_to("Track", url);
    let log = engine.log.clone();
    let ctx = context(paths(dir.path(), true), engine, FakeRunner::succeeding());
    let mut prompter = ScriptedPrompter::new([url, "1", ""]);

    menu().dispatch(&ctx, &mut prompter, "2").unwrap();

    assert_eq!(log.borrow()[0], format!("extract:{}", url));
}

#[test]
fn test_no_results_is_a_download_failure() {
    let dir = tempfile::tempdir().unwrap();
    let engine = FakeEngine::default();
    let log = engine.log.clone();
    let ctx = context(paths(dir.path(), true), engine, FakeRunner::succeeding());
    let mut prompter = ScriptedPrompter::new(["nothing matches", "1", ""]);

    let (_, result) = finished(menu().dispatch(&ctx, &mut prompter, "1").unwrap());

    let err = result.unwrap_err();
    assert_eq!(err.summary(), "Could not download media.");
    assert!(err.to_string().contains("No results found"));
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_engine_failure_text_is_surfaced() {
    let dir = tempfile::tempdir().unwrap();
    let engine = FakeEngine {
        download_failure: Some("ERROR: Video unavailable".to_string()),
        ..FakeEngine::resolving_to("Gone", "https://example.com/gone")
    };
    let ctx = context(paths(dir.path(), true), engine, FakeRunner::succeeding());
    let mut prompter = ScriptedPrompter::new(["gone", "1", ""]);

    let (_, result) = finished(menu().dispatch(&ctx, &mut prompter, "1").unwrap());

    let err = result.unwrap_err();
    assert!(matches!(err, ConvertorError::Download(_)));
    assert!(err.details().contains("Video unavailable"));
}

#[test]
fn test_outcome_carries_resolved_title_and_path() {
    let dir = tempfile::tempdir().unwrap();
    let engine = FakeEngine::resolving_to("Lofi Beats Mix", "https://www.youtube.com/watch?v=lofi");
    let paths = paths(dir.path(), true);
    let request = DownloadRequest::new("lofi beats", Platform::YouTube, MediaKind::Audio).unwrap();
    let mut reporter = ProgressReporter::hidden();

    let outcome = Downloader::new(&engine, &paths).download(&request, &mut reporter).unwrap();

    assert_eq!(outcome.title, "Lofi Beats Mix");
    assert_eq!(outcome.path, paths.downloads_dir.join("Lofi Beats Mix.mp3"));
    assert_eq!(reporter.position(), Some(1024));
}
