use anyhow::Result;
use std::fs;
use swimseed::config::{CrawlConfig, DEFAULT_BASE_URL, load_crawl_config};
use tempfile::tempdir;

#[test]
fn missing_keys_fall_back_to_defaults() -> Result<()> {
    let temp = tempdir()?;
    let path = temp.path().join("crawl.toml");
    fs::write(&path, "timeout_secs = 5\nuser_agent = \"swimseed-test\"\n")?;

    let config = load_crawl_config(&path)?;

    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.page_size, 100);
    assert_eq!(config.timeout_secs, 5);
    assert_eq!(config.retry_attempts, 1);
    assert_eq!(config.user_agent.as_deref(), Some("swimseed-test"));
    Ok(())
}

#[test]
fn meet_list_pages_are_addressed_by_row_offset() -> Result<()> {
    let config = CrawlConfig::default();

    assert_eq!(
        config.meet_list_url(2)?,
        "https://www.usms.org/comp/meets/meetlist.php?page=200&CourseID=0&LMSCID="
    );
    Ok(())
}

#[test]
fn invalid_values_are_rejected() -> Result<()> {
    let temp = tempdir()?;

    let no_slash = temp.path().join("no_slash.toml");
    fs::write(&no_slash, "base_url = \"https://www.usms.org/comp/meets\"\n")?;
    assert!(load_crawl_config(&no_slash).is_err());

    let zero_page = temp.path().join("zero_page.toml");
    fs::write(&zero_page, "page_size = 0\n")?;
    assert!(load_crawl_config(&zero_page).is_err());

    Ok(())
}
