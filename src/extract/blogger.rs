//! Blogger-specific extraction
//!
//! Selector map for classic Blogger templates:
//! - post links on listing pages: `h3.post-title a`
//! - pagination ("older posts"): `a.blog-pager-older-link`
//! - post title: `h3.post-title`
//! - embedded video: first `iframe` with a `src`
//! - labels: `span.post-labels a`

use crate::extract::{ExtractError, PageExtractor, PageLinks, RecordExtractor};
use crate::model::Record;
use scraper::{Html, Selector};
use url::Url;

/// Resolves an href to an absolute URL against the page it appeared on
///
/// Uses proper URL-joining semantics, so relative hrefs work for listing
/// pages with path segments. Returns None for unparseable hrefs.
fn resolve_link(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    page_url.join(href).ok()
}

/// Finds post links and the older-posts link on a Blogger listing page
pub struct BloggerPageExtractor {
    post_link: Selector,
    older_link: Selector,
}

impl BloggerPageExtractor {
    pub fn new() -> Self {
        Self {
            // Both selectors are fixed literals and always parse.
            post_link: Selector::parse("h3.post-title a").expect("valid selector"),
            older_link: Selector::parse("a.blog-pager-older-link").expect("valid selector"),
        }
    }
}

impl Default for BloggerPageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageExtractor for BloggerPageExtractor {
    fn extract_links(&self, document: &Html, page_url: &Url) -> PageLinks {
        let items = document
            .select(&self.post_link)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| resolve_link(href, page_url))
            .collect();

        let next_page = document
            .select(&self.older_link)
            .next()
            .and_then(|element| element.value().attr("href"))
            .and_then(|href| resolve_link(href, page_url));

        PageLinks { items, next_page }
    }
}

/// Builds a [`Record`] from a Blogger post page
pub struct BloggerRecordExtractor {
    title: Selector,
    iframe: Selector,
    label_link: Selector,
}

impl BloggerRecordExtractor {
    pub fn new() -> Self {
        Self {
            title: Selector::parse("h3.post-title").expect("valid selector"),
            iframe: Selector::parse("iframe").expect("valid selector"),
            label_link: Selector::parse("span.post-labels a").expect("valid selector"),
        }
    }
}

impl Default for BloggerRecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordExtractor for BloggerRecordExtractor {
    fn extract_record(&self, document: &Html) -> Result<Record, ExtractError> {
        let title = document
            .select(&self.title)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|title| !title.is_empty())
            .ok_or(ExtractError::Missing {
                element: "h3.post-title",
            })?;

        // Posts without an embed still produce a record with an empty URL.
        let video_url = document
            .select(&self.iframe)
            .next()
            .and_then(|element| element.value().attr("src"))
            .unwrap_or_default()
            .trim()
            .to_string();

        let tags = document
            .select(&self.label_link)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        Ok(Record {
            title,
            video_url,
            tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.blogspot.com/2024/01/index.html").unwrap()
    }

    #[test]
    fn test_extract_post_links() {
        let html = Html::parse_document(
            r#"<html><body>
            <h3 class="post-title"><a href="https://example.blogspot.com/post1">One</a></h3>
            <h3 class="post-title"><a href="https://example.blogspot.com/post2">Two</a></h3>
            </body></html>"#,
        );
        let links = BloggerPageExtractor::new().extract_links(&html, &page_url());
        assert_eq!(links.items.len(), 2);
        assert_eq!(links.items[0].as_str(), "https://example.blogspot.com/post1");
        assert!(links.next_page.is_none());
    }

    #[test]
    fn test_resolve_relative_post_link() {
        let html = Html::parse_document(
            r#"<html><body>
            <h3 class="post-title"><a href="/2024/02/post.html">Relative</a></h3>
            </body></html>"#,
        );
        let links = BloggerPageExtractor::new().extract_links(&html, &page_url());
        assert_eq!(links.items.len(), 1);
        assert_eq!(
            links.items[0].as_str(),
            "https://example.blogspot.com/2024/02/post.html"
        );
    }

    #[test]
    fn test_extract_next_page_link() {
        let html = Html::parse_document(
            r#"<html><body>
            <a class="blog-pager-older-link" href="/search?updated-max=2023">Older Posts</a>
            </body></html>"#,
        );
        let links = BloggerPageExtractor::new().extract_links(&html, &page_url());
        assert!(links.items.is_empty());
        let next = links.next_page.expect("next page link");
        assert_eq!(
            next.as_str(),
            "https://example.blogspot.com/search?updated-max=2023"
        );
    }

    #[test]
    fn test_ignore_unrelated_links() {
        let html = Html::parse_document(
            r#"<html><body>
            <a href="/about">About</a>
            <h3 class="other"><a href="/not-a-post">Nope</a></h3>
            </body></html>"#,
        );
        let links = BloggerPageExtractor::new().extract_links(&html, &page_url());
        assert!(links.items.is_empty());
        assert!(links.next_page.is_none());
    }

    #[test]
    fn test_extract_full_record() {
        let html = Html::parse_document(
            r#"<html><body>
            <h3 class="post-title">  My Post  </h3>
            <iframe src="https://player.example.com/embed/42"></iframe>
            <span class="post-labels">
                <a href="/l/music"> music </a>
                <a href="/l/live">live</a>
            </span>
            </body></html>"#,
        );
        let record = BloggerRecordExtractor::new().extract_record(&html).unwrap();
        assert_eq!(record.title, "My Post");
        assert_eq!(record.video_url, "https://player.example.com/embed/42");
        assert_eq!(record.tags, vec!["music".to_string(), "live".to_string()]);
    }

    #[test]
    fn test_record_without_embed_or_tags() {
        let html = Html::parse_document(
            r#"<html><body><h3 class="post-title">Text only</h3></body></html>"#,
        );
        let record = BloggerRecordExtractor::new().extract_record(&html).unwrap();
        assert_eq!(record.title, "Text only");
        assert_eq!(record.video_url, "");
        assert!(record.tags.is_empty());
    }

    #[test]
    fn test_missing_title_is_an_error() {
        let html = Html::parse_document(r#"<html><body><p>not a post</p></body></html>"#);
        let result = BloggerRecordExtractor::new().extract_record(&html);
        assert!(matches!(
            result,
            Err(ExtractError::Missing {
                element: "h3.post-title"
            })
        ));
    }

    #[test]
    fn test_first_iframe_wins() {
        let html = Html::parse_document(
            r#"<html><body>
            <h3 class="post-title">Two embeds</h3>
            <iframe src="https://player.example.com/a"></iframe>
            <iframe src="https://player.example.com/b"></iframe>
            </body></html>"#,
        );
        let record = BloggerRecordExtractor::new().extract_record(&html).unwrap();
        assert_eq!(record.video_url, "https://player.example.com/a");
    }
}
