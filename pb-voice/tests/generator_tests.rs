//! Phrase generation against an in-memory synthesizer

use pb_voice::{
    default_phrases, generate_phrases, ReferencePhrase, SpeechSynthesizer, SynthesisError,
    VoiceSettings,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;

/// Returns the text bytes as "audio"; fails for texts containing `fail_on`
#[derive(Default)]
struct MockSynthesizer {
    fail_on: Option<String>,
    calls: AtomicUsize,
    seen_settings: Mutex<Vec<(String, String)>>,
}

#[async_trait::async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str, settings: &VoiceSettings) -> pb_voice::Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_settings
            .lock()
            .unwrap()
            .push((settings.rate_string(), settings.pitch_string()));
        if self.fail_on.as_deref().is_some_and(|f| text.contains(f)) {
            return Err(SynthesisError::Service("voice unavailable".to_string()));
        }
        Ok(text.as_bytes().to_vec())
    }
}

#[tokio::test]
async fn test_generates_all_default_phrases() {
    let temp_dir = TempDir::new().unwrap();
    let out_dir = temp_dir.path().join("assets");
    let synth = MockSynthesizer::default();

    let results =
        generate_phrases(&synth, &default_phrases(), &VoiceSettings::default(), &out_dir).await;

    assert_eq!(results.len(), 4);
    for (i, result) in results.iter().enumerate() {
        let generated = result.as_ref().unwrap();
        assert_eq!(generated.path, out_dir.join(format!("phrase{}.mp3", i + 1)));
    }
    let first = std::fs::read(out_dir.join("phrase1.mp3")).unwrap();
    assert_eq!(first, b"You did a great job!");
    assert!(synth
        .seen_settings
        .lock()
        .unwrap()
        .iter()
        .all(|(rate, pitch)| rate == "+10%" && pitch == "+3Hz"));
}

#[tokio::test]
async fn test_one_failure_does_not_stop_others() {
    let temp_dir = TempDir::new().unwrap();
    let synth = MockSynthesizer {
        fail_on: Some("proud".to_string()),
        ..Default::default()
    };

    let results = generate_phrases(
        &synth,
        &default_phrases(),
        &VoiceSettings::default(),
        temp_dir.path(),
    )
    .await;

    assert_eq!(synth.calls.load(Ordering::SeqCst), 4);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert!(matches!(results[2], Err(SynthesisError::Service(_))));
    assert!(results[3].is_ok());
    assert!(!temp_dir.path().join("phrase3.mp3").exists());
    assert!(temp_dir.path().join("phrase4.mp3").exists());
}

#[tokio::test]
async fn test_empty_text_rejected_before_call() {
    let temp_dir = TempDir::new().unwrap();
    let synth = MockSynthesizer::default();
    let phrases = vec![
        ReferencePhrase::new("   ", "blank.mp3"),
        ReferencePhrase::new("Nice!", "nice.mp3"),
    ];

    let results =
        generate_phrases(&synth, &phrases, &VoiceSettings::default(), temp_dir.path()).await;

    assert!(matches!(results[0], Err(SynthesisError::EmptyText { .. })));
    assert!(results[1].is_ok());
    assert_eq!(synth.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_audio_is_an_error() {
    struct Silent;

    #[async_trait::async_trait]
    impl SpeechSynthesizer for Silent {
        async fn synthesize(&self, _text: &str, _: &VoiceSettings) -> pb_voice::Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    let temp_dir = TempDir::new().unwrap();
    let results = generate_phrases(
        &Silent,
        &[ReferencePhrase::new("Hi", "hi.mp3")],
        &VoiceSettings::default(),
        temp_dir.path(),
    )
    .await;

    assert!(matches!(results[0], Err(SynthesisError::NoAudio { .. })));
    assert!(!temp_dir.path().join("hi.mp3").exists());
}
