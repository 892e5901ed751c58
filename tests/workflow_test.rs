//! Workflow Integration Tests
//!
//! MixUploadWorkflow の統合テスト（ネットワークとffmpegを使わない範囲）

use clap::Parser;
use mixcloud_uploader::adapter::config::Config;
use mixcloud_uploader::driver::cli::Args;
use mixcloud_uploader::driver::workflow::MixUploadWorkflow;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RECORDING: &str = "2024-12-25_22h30";

/// テスト用の録音ディレクトリ（.wav と .cue）を作成
fn create_recordings_dir(dir: &Path) -> String {
    let recordings_dir = dir.join("recordings");
    fs::create_dir(&recordings_dir).unwrap();

    fs::write(recordings_dir.join(format!("{}.wav", RECORDING)), b"RIFF").unwrap();
    fs::write(
        recordings_dir.join(format!("{}.cue", RECORDING)),
        "TITLE \"Night\"\nTRACK 01 AUDIO\n  TITLE \"Burial - Archangel\"\n  INDEX 01 00:00:00\nTRACK 02 AUDIO\n  PERFORMER \"Four Tet\"\n  TITLE \"Baby\"\n  INDEX 01 04:31:37\n",
    )
    .unwrap();

    recordings_dir.to_string_lossy().to_string()
}

/// 変換済みのmp3を置いた出力ディレクトリを作成（ffmpegを呼ばないため）
fn create_output_dir(dir: &Path) -> String {
    let output_dir = dir.join("out");
    fs::create_dir(&output_dir).unwrap();
    fs::write(
        output_dir.join(format!("transcoded-{}.mp3", RECORDING)),
        b"ID3",
    )
    .unwrap();

    output_dir.to_string_lossy().to_string()
}

fn base_args(dir: &Path) -> Vec<String> {
    let path = |name: &str| dir.join(name).to_string_lossy().to_string();
    vec![
        "mixcloud-uploader".to_string(),
        "--config".to_string(),
        path("config.json"),
        "--auth".to_string(),
        path("auth.json"),
        "--cached-auth".to_string(),
        path("cached-auth.json"),
        "-y".to_string(),
    ]
}

#[tokio::test]
async fn test_workflow_execute_dry_run_success() {
    let temp_dir = TempDir::new().unwrap();
    let recordings_dir = create_recordings_dir(temp_dir.path());
    let output_dir = create_output_dir(temp_dir.path());

    let mut argv = base_args(temp_dir.path());
    argv.extend([
        "-d".to_string(),
        recordings_dir,
        "-o".to_string(),
        output_dir.clone(),
        "-n".to_string(),
        "Night Session #12".to_string(),
        "-t".to_string(),
        "house,techno".to_string(),
        "--access-token".to_string(),
        "test-token".to_string(),
        "--dry-run".to_string(),
    ]);
    let args = Args::parse_from(argv);

    let config = Config::load(&args.config).unwrap();
    let workflow = MixUploadWorkflow::new(config).unwrap();

    let result = workflow.execute(args).await;

    assert!(result.is_ok(), "dry run failed: {:?}", result.err());
    // 既存の変換済みファイルはそのまま残る
    assert!(Path::new(&output_dir)
        .join(format!("transcoded-{}.mp3", RECORDING))
        .exists());
}

#[tokio::test]
async fn test_workflow_execute_unknown_preset() {
    let temp_dir = TempDir::new().unwrap();
    let recordings_dir = create_recordings_dir(temp_dir.path());

    let mut argv = base_args(temp_dir.path());
    argv.extend([
        "-d".to_string(),
        recordings_dir,
        "-p".to_string(),
        "night".to_string(),
        "--dry-run".to_string(),
    ]);
    let args = Args::parse_from(argv);

    let workflow = MixUploadWorkflow::new(Config::default()).unwrap();
    let err = workflow.execute(args).await.unwrap_err();

    assert!(err.to_string().starts_with("Unknown preset 'night'"));
}

#[tokio::test]
async fn test_workflow_execute_missing_recording() {
    let temp_dir = TempDir::new().unwrap();
    let recordings_dir = create_recordings_dir(temp_dir.path());

    let mut argv = base_args(temp_dir.path());
    argv.extend([
        "-d".to_string(),
        recordings_dir,
        "-r".to_string(),
        "2023-01-01_20h00".to_string(),
        "-n".to_string(),
        "Night Session #1".to_string(),
        "--dry-run".to_string(),
    ]);
    let args = Args::parse_from(argv);

    let workflow = MixUploadWorkflow::new(Config::default()).unwrap();
    let err = workflow.execute(args).await.unwrap_err();

    assert!(err.to_string().ends_with("2023-01-01_20h00.wav does not exist"));
}

#[tokio::test]
async fn test_workflow_execute_noninteractive_without_token() {
    let temp_dir = TempDir::new().unwrap();
    let recordings_dir = create_recordings_dir(temp_dir.path());
    let output_dir = create_output_dir(temp_dir.path());

    let mut argv = base_args(temp_dir.path());
    argv.extend([
        "-d".to_string(),
        recordings_dir,
        "-o".to_string(),
        output_dir,
        "-n".to_string(),
        "Night Session #12".to_string(),
    ]);
    let args = Args::parse_from(argv);

    let workflow = MixUploadWorkflow::new(Config::default()).unwrap();
    let err = workflow.execute(args).await.unwrap_err();

    assert!(err.to_string().starts_with("No access token available"));
}

#[tokio::test]
async fn test_workflow_execute_requires_name() {
    let temp_dir = TempDir::new().unwrap();
    let recordings_dir = create_recordings_dir(temp_dir.path());

    let mut argv = base_args(temp_dir.path());
    argv.extend(["-d".to_string(), recordings_dir, "--dry-run".to_string()]);
    let args = Args::parse_from(argv);

    let workflow = MixUploadWorkflow::new(Config::default()).unwrap();
    let result = workflow.execute(args).await;

    assert!(result.is_err());
}
