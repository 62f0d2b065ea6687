//! Integration tests for the page controller and the run loop.

use std::time::Duration;

use link_checker::config::SETTLE_CLASS;
use link_checker::gauge::{AnimationOptions, FrameDriverOptions};
use link_checker::{run_checks, Config, LinkCheckPage, VerdictKind};

fn quick_config(urls: &[&str]) -> Config {
    Config {
        urls: urls.iter().map(|u| u.to_string()).collect(),
        delay_ms: 0,
        reduce_motion: true,
        quiet: true,
        ..Default::default()
    }
}

#[tokio::test(start_paused = true)]
async fn test_second_check_replaces_card() {
    let mut page = LinkCheckPage::new(
        AnimationOptions::default(),
        FrameDriverOptions::default(),
        Duration::from_millis(200),
    );

    let fake = page
        .check("http://paypa1-account-verify.top/login", |_, _| {})
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fake.verdict.kind, VerdictKind::Fake);

    let genuine = page
        .check("github.com", |_, _| {})
        .await
        .unwrap()
        .unwrap();
    assert_eq!(genuine.verdict.kind, VerdictKind::Genuine);
    assert_eq!(page.card().attr("data-verdict"), Some("genuine"));
    assert!(!genuine.markup.contains("paypa1"));

    let gauge = page.gauge().unwrap();
    let label = page.card().find_by_id(&gauge.ids().label).unwrap();
    assert!(label.has_class(SETTLE_CLASS));
    assert_eq!(label.text(), Some("Confidence: 95%"));
}

#[tokio::test(start_paused = true)]
async fn test_frames_are_reported_without_reduced_motion() {
    let mut page = LinkCheckPage::new(
        AnimationOptions::with_duration(Duration::from_millis(400)),
        FrameDriverOptions::default(),
        Duration::ZERO,
    )
    .with_jitter(Duration::ZERO);

    let mut values = Vec::new();
    let outcome = page
        .check("bit.ly/abc", |_, v| values.push(v))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(outcome.verdict.kind, VerdictKind::Unknown);
    assert_eq!(values.last().copied(), Some(50.0));
    assert!(values.len() > 5);
}

#[tokio::test]
async fn test_run_checks_counts_verdicts_and_skips() {
    let config = quick_config(&[
        "https://github.com",
        "http://paypal-secure-login.xyz/verify-account",
        "ftp://files.example.com",
        "   ",
    ]);
    let report = run_checks(config).await.expect("run succeeds");

    assert_eq!(report.total, 4);
    assert_eq!(report.genuine, 1);
    assert_eq!(report.fake, 1);
    assert_eq!(report.unknown, 0);
    assert_eq!(report.skipped, 2);
    assert!(report.output_dir.is_none());
}

#[tokio::test]
async fn test_run_checks_reads_file_and_writes_cards() {
    let dir = tempfile::tempdir().unwrap();
    let list = dir.path().join("links.txt");
    std::fs::write(&list, "# suspicious\nbit.ly/3xYz\n\nhttps://my-bakery.com/menu\n").unwrap();
    let out = dir.path().join("cards");

    let config = Config {
        file: Some(list),
        output: Some(out.clone()),
        ..quick_config(&[])
    };
    let report = run_checks(config).await.expect("run succeeds");

    assert_eq!(report.total, 2);
    assert_eq!(report.unknown, 1);
    assert_eq!(report.genuine, 1);

    let html = std::fs::read_to_string(out.join("001-bit.ly.html")).unwrap();
    assert!(html.contains("Could not verify"));
    assert!(html.contains("class=\"gauge-label pulse\""));
    let json = std::fs::read_to_string(out.join("002-my-bakery.com.json")).unwrap();
    assert!(json.contains("\"kind\": \"genuine\""));
}

#[tokio::test]
async fn test_run_checks_without_links_fails() {
    let err = run_checks(quick_config(&[])).await.unwrap_err();
    assert!(err.to_string().contains("No URLs to check"));
}

#[tokio::test]
async fn test_run_checks_missing_file_fails() {
    let config = Config {
        file: Some("/definitely/not/here.txt".into()),
        ..quick_config(&[])
    };
    let err = run_checks(config).await.unwrap_err();
    assert!(format!("{err:#}").contains("Failed to open input file"));
}
