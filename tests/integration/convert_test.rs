use super::fakes::{context, paths, FakeEngine, FakeRunner};
use convertor::commands::convert::FILE_PROMPT;
use convertor::commands::menu::RETURN_PROMPT;
use convertor::commands::{ActionReport, Menu, MenuOutcome};
use convertor::core::image_converter::icon_sizes;
use convertor::error::ConvertorError;
use convertor::ui::ScriptedPrompter;
use image::{GenericImageView, Rgba, RgbaImage};
use std::ffi::OsString;
use std::fs;
use std::time::Duration;

fn run(ctx: &convertor::commands::Context, code: &str, answers: &[&str]) -> (convertor::Result<ActionReport>, ScriptedPrompter) {
    let mut prompter = ScriptedPrompter::new(answers.iter().copied());
    let outcome = Menu::new()
        .with_invalid_pause(Duration::ZERO)
        .dispatch(ctx, &mut prompter, code)
        .unwrap();

    match outcome {
        MenuOutcome::Finished { result, .. } => (result, prompter),
        other => panic!("expected a finished command, got {:?}", other),
    }
}

#[test]
fn test_png_with_alpha_becomes_opaque_jpg() {
    let dir = tempfile::tempdir().unwrap();
    RgbaImage::from_pixel(32, 16, Rgba([10, 200, 30, 90]))
        .save(dir.path().join("sample.png"))
        .unwrap();
    let ctx = context(paths(dir.path(), false), FakeEngine::default(), FakeRunner::succeeding());

    let (result, prompter) = run(&ctx, "12", &["sample.png", ""]);

    assert_eq!(result.unwrap(), ActionReport::Saved("File saved as: sample.jpg".to_string()));
    let output = image::open(dir.path().join("sample.jpg")).unwrap();
    assert!(!output.color().has_alpha());
    assert_eq!(output.dimensions(), (32, 16));
    assert_eq!(prompter.prompts(), [FILE_PROMPT, RETURN_PROMPT]);
}

#[test]
fn test_icon_has_exactly_three_resolutions() {
    let dir = tempfile::tempdir().unwrap();
    RgbaImage::from_pixel(512, 512, Rgba([0, 0, 255, 255]))
        .save(dir.path().join("icon.png"))
        .unwrap();
    let ctx = context(paths(dir.path(), false), FakeEngine::default(), FakeRunner::succeeding());

    let (result, _) = run(&ctx, "14", &["icon.png", ""]);

    match result.unwrap() {
        ActionReport::Saved(message) => {
            assert!(message.starts_with("File saved as: icon.ico"), "{}", message);
            assert!(message.contains("16x16, 32x32, 48x48"), "{}", message);
        }
        other => panic!("unexpected report {:?}", other),
    }
    assert_eq!(
        icon_sizes(&dir.path().join("icon.ico")).unwrap(),
        vec![(16, 16), (32, 32), (48, 48)]
    );
}

#[test]
fn test_webp_entry_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    // Content decides the decoder, so a PNG under another name still converts
    RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 4]))
        .save(dir.path().join("photo.png"))
        .unwrap();
    fs::rename(dir.path().join("photo.png"), dir.path().join("photo.webp")).unwrap();
    let ctx = context(paths(dir.path(), false), FakeEngine::default(), FakeRunner::succeeding());

    let (result, _) = run(&ctx, "13", &["photo.webp", ""]);

    assert_eq!(result.unwrap(), ActionReport::Saved("File saved as: photo.png".to_string()));
    assert!(dir.path().join("photo.png").is_file());
}

#[test]
fn test_wav_to_mp3_runs_transcoder_with_bitrate() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("track.wav"), b"RIFF").unwrap();
    let runner = FakeRunner::succeeding();
    let calls = runner.calls.clone();
    let ctx = context(paths(dir.path(), true), FakeEngine::default(), runner);

    let (result, _) = run(&ctx, "23", &["track.wav", ""]);

    assert_eq!(result.unwrap(), ActionReport::Saved("File saved as: track.mp3".to_string()));
    let expected: Vec<OsString> = vec![
        "-i".into(),
        dir.path().join("track.wav").into(),
        "-y".into(),
        "-b:a".into(),
        "192k".into(),
        dir.path().join("track.mp3").into(),
    ];
    assert_eq!(*calls.borrow(), vec![expected]);
}

#[test]
fn test_transcoder_failure_surfaces_stderr() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("track.wav"), b"not audio").unwrap();
    let ctx = context(
        paths(dir.path(), true),
        FakeEngine::default(),
        FakeRunner::exiting(1, b"track.wav: invalid data found when processing input\n"),
    );

    let (result, _) = run(&ctx, "23", &["track.wav", ""]);

    let err = result.unwrap_err();
    assert!(matches!(err, ConvertorError::Transcode(_)));
    assert_eq!(err.summary(), "Error during conversion.");
    assert!(err.details().contains("invalid data"));
    assert!(!dir.path().join("track.mp3").exists());
}

#[test]
fn test_silent_transcoder_failure_still_has_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("song.mp3"), b"ID3").unwrap();
    let ctx = context(
        paths(dir.path(), true),
        FakeEngine::default(),
        FakeRunner::exiting(69, &[0xff, 0xfe, b'\n']),
    );

    let (result, _) = run(&ctx, "24", &["song.mp3", ""]);

    let details = result.unwrap_err().details();
    assert!(!details.trim().is_empty());
    assert!(details.contains("69"), "{}", details);
}

#[test]
fn test_missing_file_never_runs_transcoder() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("other.wav"), b"RIFF").unwrap();
    let runner = FakeRunner::succeeding();
    let calls = runner.calls.clone();
    let ctx = context(paths(dir.path(), true), FakeEngine::default(), runner);

    let (result, _) = run(&ctx, "23", &["missing.wav", ""]);

    let err = result.unwrap_err();
    assert_eq!(err.summary(), "File 'missing.wav' not found.");
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_empty_folder_skips_file_prompt() {
    let dir = tempfile::tempdir().unwrap();
    // Only reserved names and folders
    fs::write(dir.path().join("ffmpeg.exe"), b"").unwrap();
    fs::write(dir.path().join("convertor"), b"").unwrap();
    let ctx = context(paths(dir.path(), true), FakeEngine::default(), FakeRunner::succeeding());

    let (result, prompter) = run(&ctx, "21", &[""]);

    assert_eq!(result.unwrap(), ActionReport::Skipped);
    assert_eq!(prompter.prompts(), [RETURN_PROMPT]);
}
