use std::path::PathBuf;
use villancico_generator::{
    ai::{
        IllustrationService, LyricsService, MockIllustrationClient, MockLyricsClient,
        MockMusicClient, MusicService,
    },
    app::{App, AppServices},
    artifacts::{ArtifactStore, FsArtifactStore, MockArtifactStore},
    models::{Config, GenerationRequest, MusicJobStatus},
    prompts, Error,
};

fn test_config() -> Config {
    Config {
        openai_api_base: "https://ai.test".to_string(),
        openai_api_key: "key-1".to_string(),
        image_api_base: "https://ai.test".to_string(),
        image_api_key: "key-1".to_string(),
        chat_model: "gpt-4o".to_string(),
        image_model: "dall-e-3".to_string(),
        music_api_base: None,
        music_cookie: None,
    }
}

#[tokio::test]
async fn test_full_workflow_with_mocks() {
    let request = GenerationRequest::for_child(
        "la estrella de Belén".to_string(),
        "Lucía".to_string(),
        7,
    );

    let lyrics_client = MockLyricsClient::new()
        .with_lyrics_response("Brilla, brilla, estrella de Belén".to_string());
    let illustration =
        MockIllustrationClient::new().with_image_url("https://cdn.test/postal.png".to_string());

    // Prompt builder selects the personalized template
    let prompt = prompts::build_lyrics_prompt(&request);
    assert!(prompt.contains("la estrella de Belén"));
    assert!(prompt.contains("Lucía"));

    // Lyrics come back verbatim
    let lyrics = lyrics_client.generate_lyrics(&prompt).await.unwrap();
    assert_eq!(lyrics, "Brilla, brilla, estrella de Belén");

    // Illustration returns a provider URL
    let image_prompt = prompts::build_image_prompt(&request.topic);
    let url = illustration.generate_image(&image_prompt).await.unwrap();
    assert_eq!(url, "https://cdn.test/postal.png");

    // Artifacts record both
    let store = MockArtifactStore::new();
    store.save_lyrics(&lyrics).await.unwrap();
    store.save_image(&url).await.unwrap();
    assert_eq!(store.saved_count(), 2);
}

#[tokio::test]
async fn test_app_run_without_music_writes_placeholder_melody() {
    let store = MockArtifactStore::new().with_base_path(PathBuf::from("/run"));

    let app = App::with_services(
        AppServices {
            lyrics: Box::new(
                MockLyricsClient::new().with_lyrics_response("Letra del villancico".to_string()),
            ),
            illustration: Box::new(
                MockIllustrationClient::new()
                    .with_image_url("https://cdn.test/img.png".to_string()),
            ),
            music: None,
            store: Box::new(store),
        },
        PathBuf::from("/run"),
    );

    let request = GenerationRequest::new("los Reyes Magos".to_string());
    let outcome = app.run(&request).await.unwrap();

    assert_eq!(outcome.villancico.lyrics, "Letra del villancico");
    assert_eq!(outcome.villancico.image_url, "https://cdn.test/img.png");
    assert!(outcome.villancico.audio_url.is_none());
    assert!(outcome.audio_path.is_none());

    let melody_path = outcome.melody_path.expect("placeholder melody written");
    assert!(melody_path.to_string_lossy().ends_with(".mid"));
}

#[tokio::test]
async fn test_app_run_with_music_polls_to_completion() {
    let music = MockMusicClient::new()
        .with_status(MusicJobStatus::Pending)
        .with_status(MusicJobStatus::Pending)
        .with_status(MusicJobStatus::Completed)
        .with_audio_url("http://x/y.mp3".to_string());

    let app = App::with_services(
        AppServices {
            lyrics: Box::new(MockLyricsClient::new()),
            illustration: Box::new(MockIllustrationClient::new()),
            music: Some(Box::new(music)),
            store: Box::new(MockArtifactStore::new()),
        },
        PathBuf::from("/run"),
    );

    let request = GenerationRequest::new("la nieve".to_string());
    let outcome = app.run(&request).await.unwrap();

    assert_eq!(outcome.villancico.audio_url.as_deref(), Some("http://x/y.mp3"));
    assert!(outcome.audio_path.is_some());
    assert!(outcome.melody_path.is_none());
}

#[tokio::test]
async fn test_app_run_aborts_when_no_credits_remain() {
    let music = MockMusicClient::new().with_credits(0);

    let app = App::with_services(
        AppServices {
            lyrics: Box::new(MockLyricsClient::new()),
            illustration: Box::new(MockIllustrationClient::new()),
            music: Some(Box::new(music)),
            store: Box::new(MockArtifactStore::new()),
        },
        PathBuf::from("/run"),
    );

    let request = GenerationRequest::new("la nieve".to_string());
    let err = app.run(&request).await.unwrap_err();
    assert!(matches!(err, Error::Provider(_)));
}

#[tokio::test]
async fn test_music_failure_leaves_earlier_artifacts_saved() {
    let music = MockMusicClient::new().with_status(MusicJobStatus::Failed);
    let store = MockArtifactStore::new();
    let store_handle = store.clone();

    let app = App::with_services(
        AppServices {
            lyrics: Box::new(MockLyricsClient::new().with_lyrics_response("Letra".to_string())),
            illustration: Box::new(MockIllustrationClient::new()),
            music: Some(Box::new(music)),
            store: Box::new(store),
        },
        PathBuf::from("/run"),
    );

    let request = GenerationRequest::new("el belén".to_string());
    let err = app.run(&request).await.unwrap_err();
    assert!(matches!(err, Error::Provider(_)));

    // Lyrics and illustration were saved before the music step failed
    assert_eq!(
        store_handle.saved_content("villancico.txt"),
        Some(b"Letra".to_vec())
    );
    assert!(store_handle.saved_content("ilustracion.png").is_some());
}

#[tokio::test]
async fn test_lyrics_artifact_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsArtifactStore::new(dir.path()).unwrap();

    let lyrics_client =
        MockLyricsClient::new().with_lyrics_response("Campana sobre campana,\ny sobre campana una".to_string());
    let lyrics = lyrics_client.generate_lyrics("tema").await.unwrap();

    let path = store.save_lyrics(&lyrics).await.unwrap();
    let bytes = std::fs::read(&path).unwrap();

    assert_eq!(bytes, lyrics.as_bytes());
}

#[tokio::test]
async fn test_app_run_on_real_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("run");
    let store = FsArtifactStore::new(&output_dir).unwrap();

    // Serve the "provider-hosted" image locally
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/postal.png"))
        .respond_with(
            wiremock::ResponseTemplate::new(200).set_body_bytes(vec![0x89, 0x50, 0x4E, 0x47]),
        )
        .mount(&server)
        .await;

    let app = App::with_services(
        AppServices {
            lyrics: Box::new(MockLyricsClient::new().with_lyrics_response("Letra".to_string())),
            illustration: Box::new(
                MockIllustrationClient::new()
                    .with_image_url(format!("{}/postal.png", server.uri())),
            ),
            music: None,
            store: Box::new(store),
        },
        output_dir.clone(),
    );

    let request = GenerationRequest::new("el belén".to_string());
    let outcome = app.run(&request).await.unwrap();

    assert_eq!(std::fs::read(&outcome.lyrics_path).unwrap(), b"Letra");
    assert_eq!(
        std::fs::read(&outcome.image_path).unwrap(),
        vec![0x89, 0x50, 0x4E, 0x47]
    );
    let melody = std::fs::read(outcome.melody_path.unwrap()).unwrap();
    assert_eq!(&melody[..4], b"MThd");
}

#[test]
fn test_music_run_without_music_config_is_setup_error() {
    let dir = tempfile::tempdir().unwrap();

    let err = App::with_config(test_config(), dir.path(), true).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("MUSIC_API_BASE"));

    let mut config = test_config();
    config.music_api_base = Some("https://music.test".to_string());
    let err = App::with_config(config, dir.path(), true).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("MUSIC_COOKIE"));
}

#[test]
fn test_app_builds_without_music_config_when_music_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let app = App::with_config(test_config(), dir.path(), false).unwrap();
    assert!(app.output_dir().starts_with(dir.path()));
}

#[tokio::test]
async fn test_mock_music_exhaustion() {
    let music = MockMusicClient::new().with_status(MusicJobStatus::Pending);

    let err = music.wait_for_completion("job").await.unwrap_err();
    assert!(matches!(err, Error::PollTimeout { attempts: 30 }));
    assert_eq!(music.get_poll_count(), 30);
}
