use httpmock::prelude::*;
use jobtrends::models::SkillSet;
use jobtrends::{
    ClassifierKeywords, CollectionPipeline, Error, FeedClient, FetchConfig, MarketAnalyzer,
    PostingStore, ReportConfig, SkillVocabulary, TechClassifier,
};
use std::time::Duration;
use tempfile::TempDir;

const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>Remote Jobs</title>
    <item>
      <guid>job-1</guid>
      <title>Acme: Senior Rust Engineer</title>
      <category>Back-End Programming</category>
      <description><![CDATA[<p>Build <b>Rust</b> services with PostgreSQL and Docker on AWS.</p>]]></description>
      <pubDate>Mon, 06 Oct 2025 14:00:00 +0000</pubDate>
      <link>https://example.com/jobs/1</link>
    </item>
    <item>
      <guid>job-2</guid>
      <title>Python Developer</title>
      <dc:creator>Globex</dc:creator>
      <category>Programming</category>
      <description>Python, Django and PostgreSQL on AWS.</description>
      <pubDate>Tue, 07 Oct 2025 09:30:00 +0000</pubDate>
      <link>https://example.com/jobs/2</link>
    </item>
    <item>
      <guid>job-3</guid>
      <title>Sales Engineer</title>
      <category>Programming</category>
      <description>Demo our API to prospects.</description>
      <link>https://example.com/jobs/3</link>
    </item>
    <item>
      <guid>job-4</guid>
      <title>Initech: Backend Engineer</title>
      <category>Customer Support</category>
      <description>Python services.</description>
      <link>https://example.com/jobs/4</link>
    </item>
  </channel>
</rss>"#;

fn fast_retry(max_attempts: u32, backoff_ms: u64) -> FetchConfig {
    FetchConfig {
        timeout: Duration::from_secs(5),
        max_attempts,
        backoff: Duration::from_millis(backoff_ms),
    }
}

fn pipeline(url: String, store: PostingStore, fetch: FetchConfig) -> CollectionPipeline {
    let feed = FeedClient::new("jobtrends-test", fetch).unwrap();
    CollectionPipeline::new(
        feed,
        TechClassifier::new(ClassifierKeywords::default()),
        store,
        url,
    )
    .quiet()
}

#[tokio::test]
async fn test_collect_stores_only_new_tech_postings() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("jobs.csv");

    let server = MockServer::start_async().await;
    let feed_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/remote-jobs.rss")
                .header("user-agent", "jobtrends-test");
            then.status(200)
                .header("Content-Type", "application/rss+xml")
                .body(FEED);
        })
        .await;

    let collector = pipeline(
        server.url("/remote-jobs.rss"),
        PostingStore::new(&data_file),
        fast_retry(3, 10),
    );

    let first = collector.run().await.unwrap();
    assert_eq!(first.fetched, 4);
    assert_eq!(first.relevant, 2);
    assert_eq!(first.added, 2);
    assert_eq!(first.total, 2);

    let after_first = collector.store().load().unwrap();
    let first_stamp = after_first.last_updated.unwrap();

    let second = collector.run().await.unwrap();
    assert_eq!(second.added, 0);
    assert_eq!(second.total, 2);
    feed_mock.assert_hits_async(2).await;

    let snapshot = collector.store().load().unwrap();
    assert!(snapshot.last_updated.unwrap() >= first_stamp);

    let acme = snapshot.postings.iter().find(|p| p.id == "job-1").unwrap();
    assert_eq!(acme.company, "Acme");
    assert_eq!(acme.title, "Senior Rust Engineer");
    assert_eq!(
        acme.description.as_deref(),
        Some("Build Rust services with PostgreSQL and Docker on AWS.")
    );

    let globex = snapshot.postings.iter().find(|p| p.id == "job-2").unwrap();
    assert_eq!(globex.company, "Globex");
    assert_eq!(globex.category, "Programming");
}

#[tokio::test]
async fn test_collected_postings_feed_the_report() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("jobs.csv");

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/feed");
            then.status(200).body(FEED);
        })
        .await;

    pipeline(server.url("/feed"), PostingStore::new(&data_file), fast_retry(1, 0))
        .run()
        .await
        .unwrap();

    let snapshot = PostingStore::new(&data_file).load().unwrap();
    let analyzer = MarketAnalyzer::new(SkillVocabulary::default()).unwrap();
    let analyzed = analyzer.annotate(snapshot.postings);

    let rust_job = analyzed.iter().find(|a| a.posting.id == "job-1").unwrap();
    let expected: SkillSet = ["aws", "docker", "postgresql", "rust"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(rust_job.skills, expected);

    let report = analyzer.build_report(&analyzed, snapshot.last_updated, &ReportConfig::default());
    assert_eq!(report.total_postings, 2);
    assert_eq!(report.unique_companies, 2);
    assert_eq!(report.hottest_skill.as_deref(), Some("aws"));
    assert_eq!(report.top_skills[1].skill, "postgresql");
    assert_eq!(report.top_skills[1].count, 2);
    assert_eq!(report.co_occurrence.get("aws", "postgresql"), 2);
    assert_eq!(report.co_occurrence.get("rust", "django"), 0);
    assert_eq!(report.recent_postings[0].company, "Globex");
}

#[tokio::test]
async fn test_fetch_gives_up_after_max_attempts() {
    let temp_dir = TempDir::new().unwrap();
    let data_file = temp_dir.path().join("jobs.csv");

    let server = MockServer::start_async().await;
    let failing = server
        .mock_async(|when, then| {
            when.method(GET).path("/feed");
            then.status(503);
        })
        .await;

    let result = pipeline(server.url("/feed"), PostingStore::new(&data_file), fast_retry(3, 10))
        .run()
        .await;

    assert!(matches!(result, Err(Error::FeedStatus { status: 503, .. })));
    failing.assert_hits_async(3).await;
    assert!(!data_file.exists());
}

#[tokio::test]
async fn test_fetch_recovers_after_transient_failure() {
    let server = MockServer::start_async().await;
    let mut failing = server
        .mock_async(|when, then| {
            when.method(GET).path("/feed");
            then.status(500);
        })
        .await;

    let client = FeedClient::new("jobtrends-test", fast_retry(3, 400)).unwrap();
    let url = server.url("/feed");
    let fetch = tokio::spawn(async move { client.fetch(&url).await });

    tokio::time::sleep(Duration::from_millis(150)).await;
    failing.delete_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/feed");
            then.status(200).body(FEED);
        })
        .await;

    let body = fetch.await.unwrap().unwrap();
    assert!(body.contains("Senior Rust Engineer"));
}
