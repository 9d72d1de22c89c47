// SPDX-FileCopyrightText: The pagemend authors
// SPDX-License-Identifier: MPL-2.0

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;

use super::*;

#[derive(Debug)]
struct StaticBranchList(&'static str);

#[async_trait]
impl BranchListSource for StaticBranchList {
    async fn fetch_branch_list(&self) -> Result<String, FetchError> {
        Ok(self.0.to_owned())
    }
}

#[derive(Debug, Default)]
struct OfflineBranchList;

#[async_trait]
impl BranchListSource for OfflineBranchList {
    async fn fetch_branch_list(&self) -> Result<String, FetchError> {
        Err(anyhow::anyhow!("connection refused").into())
    }
}

#[derive(Debug, Default)]
struct CountingBranchList(Arc<AtomicUsize>);

#[async_trait]
impl BranchListSource for CountingBranchList {
    async fn fetch_branch_list(&self) -> Result<String, FetchError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok("main\n".to_owned())
    }
}

fn enhancer(config: Config, source: impl BranchListSource + 'static) -> Enhancer {
    Enhancer::new(config, Box::new(source))
}

const GUIDE_PAGE: &str = r#"<html><body>
<div class="toc"><ul class="nav"><li class="active"><a href="/">User guide</a></li></ul></div>
<div class="page">
<h2 id="getting-started">Getting started</h2>
<table><tr><td>host</td></tr></table>
<h3 id="setup-ssh">Setup &amp; SSH</h3>
</div>
</body></html>"#;

const SIDEBAR_PAGE: &str = r#"<html><body>
<ul class="sidebar"><li class="sidebar-nav-item active"><a href="/guide.html">Guide</a></li><li class="sidebar-nav-item"><a href="/about.html">About</a></li></ul>
<div class="page"><h2 id="usage">Usage</h2></div>
</body></html>"#;

const REPORT_PAGE: &str = r#"<html><body>
<div class="toc"><ul class="nav"></ul></div>
<div class="page">
<h2 id="branches">Branches</h2>
<ul><li><a href="/build-report/BRANCH.html">BRANCH</a></li></ul>
</div>
</body></html>"#;

const BARE_PAGE: &str = r#"<html><body><div class="page"><h2 id="a">A</h2></div></body></html>"#;

#[tokio::test]
async fn indexes_headings_into_the_toc() {
    let enhancer = enhancer(Config::default(), StaticBranchList(""));
    let enhanced = enhancer.enhance(GUIDE_PAGE, "/guide.html").await.unwrap();

    assert_eq!(2, enhanced.navigation_entries);
    assert_eq!(BranchReportStatus::Skipped, enhanced.branch_report);
    // Appended in document order, after the pre-existing item.
    assert!(enhanced.html.contains(concat!(
        r##"<li class="level-h2"><a href="#getting-started">Getting started</a></li>"##,
        r##"<li class="level-h3"><a href="#setup-ssh">Setup &amp; SSH</a></li>"##,
        "</ul>",
    )));
    let existing = enhanced.html.find("User guide").unwrap();
    let appended = enhanced.html.find("level-h2").unwrap();
    assert!(existing < appended);
}

#[tokio::test]
async fn decorates_content_tables() {
    let enhancer = enhancer(Config::default(), StaticBranchList(""));
    let enhanced = enhancer.enhance(GUIDE_PAGE, "/guide.html").await.unwrap();
    assert!(enhanced.html.contains(r#"<table class="table"><tr>"#));
}

#[tokio::test]
async fn table_decoration_is_a_fixed_point() {
    let page = concat!(
        r#"<html><body><div class="page">"#,
        r#"<table class="table"><tr><td>x</td></tr></table>"#,
        r#"<table summary="s"><tr><td>y</td></tr></table>"#,
        "</div></body></html>",
    );
    let enhancer = enhancer(Config::default(), StaticBranchList(""));
    let first = enhancer.enhance(page, "/misc.html").await.unwrap();
    assert!(first.html.contains(r#"<table summary="s" class="table">"#));
    let second = enhancer.enhance(&first.html, "/misc.html").await.unwrap();
    assert_eq!(first.html, second.html);
}

#[tokio::test]
async fn inserts_a_fresh_list_after_the_active_marker() {
    let config = Config {
        navigation: NavConvention::AfterActiveMarker,
        ..Config::default()
    };
    let enhancer = enhancer(config, StaticBranchList(""));
    let enhanced = enhancer.enhance(SIDEBAR_PAGE, "/guide.html").await.unwrap();

    assert_eq!(1, enhanced.navigation_entries);
    assert!(enhanced.html.contains(concat!(
        r#"Guide</a></li>"#,
        r##"<ul class="nav"><li class="level-h2"><a href="#usage">Usage</a></li></ul>"##,
        r#"<li class="sidebar-nav-item">"#,
    )));
}

#[tokio::test]
async fn skips_pages_without_a_navigation_container() {
    let enhancer = enhancer(Config::default(), StaticBranchList(""));
    let enhanced = enhancer.enhance(BARE_PAGE, "/bare.html").await.unwrap();
    assert_eq!(0, enhanced.navigation_entries);
    assert_eq!(BARE_PAGE, enhanced.html);
}

#[tokio::test]
async fn expands_the_branch_report_in_reverse_order() {
    let enhancer = enhancer(Config::default(), StaticBranchList("main\r\ndev\n\n"));
    let enhanced = enhancer
        .enhance(REPORT_PAGE, "/build-report.html")
        .await
        .unwrap();

    assert_eq!(BranchReportStatus::Populated(2), enhanced.branch_report);
    // Each fragment was prepended: final order is the reverse of the
    // response order, and the template itself is gone.
    assert!(enhanced.html.contains(concat!(
        "<ul>",
        r#"<li><a href="/build-report/dev.html">dev</a></li>"#,
        r#"<li><a href="/build-report/main.html">main</a></li>"#,
        "</ul>",
    )));
    assert!(!enhanced.html.contains("BRANCH"));
}

#[tokio::test]
async fn clears_the_container_when_the_branch_list_is_unavailable() {
    let enhancer = enhancer(Config::default(), OfflineBranchList);
    let enhanced = enhancer
        .enhance(REPORT_PAGE, "/build-report.html")
        .await
        .unwrap();

    assert_eq!(BranchReportStatus::Unavailable, enhanced.branch_report);
    assert!(enhanced.html.contains("<ul></ul>"));
    assert!(!enhanced.html.contains("BRANCH"));
}

#[tokio::test]
async fn clears_the_container_for_a_blank_branch_list() {
    let enhancer = enhancer(Config::default(), StaticBranchList("\r\n \r\n"));
    let enhanced = enhancer
        .enhance(REPORT_PAGE, "/build-report.html")
        .await
        .unwrap();

    assert_eq!(BranchReportStatus::Populated(0), enhanced.branch_report);
    assert!(enhanced.html.contains("<ul></ul>"));
    assert!(!enhanced.html.contains("BRANCH"));
}

#[tokio::test]
async fn inert_off_the_report_page() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let source = CountingBranchList(Arc::clone(&fetches));
    let enhancer = enhancer(Config::default(), source);
    let enhanced = enhancer.enhance(REPORT_PAGE, "/index.html").await.unwrap();

    assert_eq!(0, fetches.load(Ordering::SeqCst));
    assert_eq!(BranchReportStatus::Skipped, enhanced.branch_report);
    // The static template markup survives untouched.
    assert!(
        enhanced
            .html
            .contains(r#"<ul><li><a href="/build-report/BRANCH.html">BRANCH</a></li></ul>"#)
    );
}

#[tokio::test]
async fn fetches_exactly_once_on_the_report_page() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let source = CountingBranchList(Arc::clone(&fetches));
    let enhancer = enhancer(Config::default(), source);
    enhancer
        .enhance(REPORT_PAGE, "/build-report.html")
        .await
        .unwrap();
    assert_eq!(1, fetches.load(Ordering::SeqCst));
}

#[tokio::test]
async fn rejects_malformed_markup() {
    let enhancer = enhancer(Config::default(), StaticBranchList(""));
    let result = enhancer
        .enhance("<html><body><h2 id=broken></body></html>", "/guide.html")
        .await;
    assert!(matches!(result, Err(EnhanceError::Markup(_))));
}
