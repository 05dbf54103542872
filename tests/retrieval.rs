//! End-to-end retrieval against a local HTTP server.

use std::time::{Duration, Instant};

use dblp2bib::error::AppError;
use dblp2bib::models::{Config, DblpList, FetcherConfig, PublicationRef};
use dblp2bib::pipeline;
use dblp2bib::services::{BatchDownloader, BibFetcher};
use dblp2bib::storage::LocalStorage;
use dblp2bib::utils::http::create_async_client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn landing_html(bib_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><body>
        <nav><ul><li><a href="{bib_url}.xml">download as .xml file</a></li>
        <li><a href="{bib_url}?param=1">download as .bib file</a></li></ul></nav>
        </body></html>"#
    )
}

async fn serve_publication(server: &MockServer, name: &str) {
    let bib_base = format!("{}/rec/{}.bib", server.uri(), name);
    Mock::given(method("GET"))
        .and(path(format!("/rec/{name}.html")))
        .respond_with(ResponseTemplate::new(200).set_body_string(landing_html(&bib_base)))
        .mount(server)
        .await;
}

async fn serve_bib(server: &MockServer, name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/rec/{name}.bib")))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "@inproceedings{{DBLP:{name},\n  title = {{{name}}}\n}}\n\n@proceedings{{DBLP:conf,\n}}\n"
        )))
        .mount(server)
        .await;
}

fn downloader(config: &FetcherConfig) -> BatchDownloader<reqwest::Client> {
    let client = create_async_client(config).unwrap();
    BatchDownloader::new(BibFetcher::new(client, config))
}

fn publications(server: &MockServer, names: &[&str]) -> Vec<PublicationRef> {
    names
        .iter()
        .map(|name| PublicationRef::new(format!("{}/rec/{}.html", server.uri(), name)))
        .collect()
}

#[tokio::test]
async fn test_downloads_in_order_after_rate_limit() {
    let server = MockServer::start().await;
    for name in ["A", "B", "C"] {
        serve_publication(&server, name).await;
    }

    Mock::given(method("GET"))
        .and(path("/rec/B.bib"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    for name in ["A", "B", "C"] {
        serve_bib(&server, name).await;
    }

    let start = Instant::now();
    let bibliography = downloader(&FetcherConfig::default())
        .download_all(&publications(&server, &["A", "B", "C"]))
        .await
        .unwrap();

    assert!(start.elapsed() >= Duration::from_secs(1));
    assert_eq!(
        bibliography.entries(),
        [
            "@inproceedings{DBLP:A,\n  title = {A}\n}",
            "@inproceedings{DBLP:B,\n  title = {B}\n}",
            "@inproceedings{DBLP:C,\n  title = {C}\n}",
        ]
    );

    let requests = server.received_requests().await.unwrap();
    let landing_b = requests
        .iter()
        .filter(|r| r.url.path() == "/rec/B.html")
        .count();
    assert_eq!(requests.len(), 8);
    assert_eq!(landing_b, 2);
}

#[tokio::test]
async fn test_relative_link_follows_redirected_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rec/bibtex/conf/x/A15"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("Location", format!("{}/rec/conf/x/A15.html", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rec/conf/x/A15.html"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<a href="A15.bib?param=1">download as .bib file</a>"#),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rec/conf/x/A15.bib"))
        .respond_with(ResponseTemplate::new(200).set_body_string("@inproceedings{DBLP:A15,\n}\n"))
        .mount(&server)
        .await;

    let publication = PublicationRef::new(format!("{}/rec/bibtex/conf/x/A15", server.uri()));
    let bibliography = downloader(&FetcherConfig::default())
        .download_all(&[publication])
        .await
        .unwrap();

    assert_eq!(bibliography.entries(), ["@inproceedings{DBLP:A15,\n}\n"]);
    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect();
    assert_eq!(
        paths,
        ["/rec/bibtex/conf/x/A15", "/rec/conf/x/A15.html", "/rec/conf/x/A15.bib"]
    );
}

#[tokio::test]
async fn test_landing_failure_aborts_batch() {
    let server = MockServer::start().await;
    serve_publication(&server, "A").await;
    serve_publication(&server, "C").await;
    serve_bib(&server, "A").await;
    serve_bib(&server, "C").await;
    Mock::given(method("GET"))
        .and(path("/rec/B.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = downloader(&FetcherConfig::default())
        .download_all(&publications(&server, &["A", "B", "C"]))
        .await;

    let error = result.unwrap_err();
    assert!(error.is_network());
    assert!(matches!(error, AppError::HttpStatus { status: 503, .. }));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| !r.url.path().starts_with("/rec/C")));
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    let server = MockServer::start().await;
    let unreachable = format!("{}/rec/A.html", server.uri());
    drop(server);

    let result = downloader(&FetcherConfig::default())
        .download_all(&[PublicationRef::new(unreachable)])
        .await;

    assert!(matches!(result, Err(AppError::Http(_))));
}

#[tokio::test]
async fn test_convert_file_end_to_end() {
    let server = MockServer::start().await;
    serve_publication(&server, "A").await;
    serve_bib(&server, "A").await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("2015.json");
    let export = format!(
        r#"{{ "hit": [ {{ "@score": "1", "@id": "9", "url": "{}/rec/A.html",
            "info": {{ "authors": {{ "author": ["Ada"] }}, "title": {{ "text": "A" }},
                       "venue": {{ "@conference": "X" }}, "year": "2015", "type": "inproceedings" }} }} ] }}"#,
        server.uri()
    );
    std::fs::write(&input, export).unwrap();
    assert_eq!(DblpList::load(&input).unwrap().len(), 1);

    let config = Config::default();
    let summary = pipeline::run_convert(
        &config,
        &downloader(&config.fetcher),
        &LocalStorage::new(dir.path()),
        &[input],
    )
    .await
    .unwrap();

    assert_eq!(summary.written.len(), 1);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("2015.bib")).unwrap(),
        "@inproceedings{DBLP:A,\n  title = {A}\n}\n"
    );
}
