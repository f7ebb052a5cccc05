// file: src/github/client.rs
// description: GitHub REST API calls used to synthesize plugin manifests
// reference: https://docs.github.com/en/rest

use crate::config::GitHubConfig;
use crate::error::{Result, ServerError};
use crate::models::{Commit, Repository, TreeEntry};
use crate::utils::Validator;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    repositories: Option<Vec<Repository>>,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<TreeEntry>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    content: String,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: Url,
    default_ref: String,
}

impl GitHubClient {
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let api_url = Url::parse(&config.api_url).map_err(|e| {
            ServerError::Config(format!("Invalid GitHub API url {}: {}", config.api_url, e))
        })?;
        if api_url.cannot_be_a_base() {
            return Err(ServerError::Config(format!(
                "GitHub API url cannot be used as a base: {}",
                config.api_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url,
            default_ref: config.default_ref.clone(),
        })
    }

    /// Repositories matching a free-text query, in the order GitHub ranks them.
    pub async fn search_repositories(&self, query: &str) -> Result<Vec<Repository>> {
        let url = self.endpoint(["legacy", "repos", "search", query]);
        let response: SearchResponse = self.get_json(url).await?;

        let repositories = response.repositories.unwrap_or_default();
        debug!("Search for {:?} returned {} repositories", query, repositories.len());
        Ok(repositories)
    }

    /// Entries at the root of `reference`, in tree order.
    pub async fn list_root_files(
        &self,
        owner: &str,
        repo: &str,
        reference: Option<&str>,
    ) -> Result<Vec<TreeEntry>> {
        let reference = reference.unwrap_or(&self.default_ref);
        let url = self.endpoint(["repos", owner, repo, "git", "trees", reference]);
        let response: TreeResponse = self.get_json(url).await?;

        debug!(
            "Tree {}/{}@{} has {} root entries",
            owner,
            repo,
            reference,
            response.tree.len()
        );
        Ok(response.tree)
    }

    pub async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        from_ref: Option<&str>,
        path: Option<&str>,
    ) -> Result<Vec<Commit>> {
        let mut url = self.endpoint(["repos", owner, repo, "commits"]);
        if from_ref.is_some() || path.is_some() {
            let mut query = url.query_pairs_mut();
            if let Some(sha) = from_ref {
                query.append_pair("sha", sha);
            }
            if let Some(path) = path {
                query.append_pair("path", path);
            }
        }

        let commits: Vec<Commit> = self.get_json(url).await?;
        debug!("Fetched {} commits for {}/{}", commits.len(), owner, repo);
        Ok(commits)
    }

    /// Raw bytes of the file at `path`, decoded from the contents API.
    pub async fn fetch_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: Option<&str>,
    ) -> Result<Vec<u8>> {
        let reference = reference.unwrap_or(&self.default_ref);
        let path = Validator::sanitize_repo_path(path);

        let mut url = self.endpoint(
            ["repos", owner, repo, "contents"]
                .into_iter()
                .chain(path.split('/')),
        );
        url.query_pairs_mut().append_pair("ref", reference);

        let response: ContentResponse = self.get_json(url).await?;
        decode_content(response)
    }

    /// Downloads a blob by the API url listed in a tree entry.
    pub async fn download_file(&self, url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(url)
            .map_err(|e| ServerError::Upstream(format!("Invalid file url {}: {}", url, e)))?;

        let response: ContentResponse = self.get_json(url).await?;
        decode_content(response)
    }

    fn endpoint<'a, I>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.api_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(ServerError::Upstream(format!(
                "HTTP error: {} from {}: {}",
                status, url, body
            )));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ServerError::Upstream(format!("Malformed response from {}: {}", url, e))
        })
    }
}

/// GitHub wraps base64 content at 60 columns; line breaks are dropped before decoding.
fn decode_content(response: ContentResponse) -> Result<Vec<u8>> {
    if let Some(encoding) = response.encoding.as_deref() {
        if encoding != "base64" {
            return Err(ServerError::Upstream(format!(
                "Unsupported content encoding: {}",
                encoding
            )));
        }
    }

    let compact: String = response
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(STANDARD.decode(compact)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::EntryKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for_server(server: &MockServer) -> GitHubClient {
        let mut config = Config::default_config();
        config.github.api_url = server.uri();
        GitHubClient::new(&config.github).expect("client creation should succeed")
    }

    #[tokio::test]
    async fn test_search_repositories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/legacy/repos/search/slider"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "repositories": [
                    {"owner": "acme", "name": "jquery-slider", "watchers": 10},
                    {"owner": "other", "name": "slider"}
                ]
            })))
            .mount(&server)
            .await;

        let repos = client_for_server(&server)
            .search_repositories("slider")
            .await
            .unwrap();

        assert_eq!(
            repos,
            vec![
                Repository::new("acme", "jquery-slider"),
                Repository::new("other", "slider")
            ]
        );
    }

    #[tokio::test]
    async fn test_search_query_is_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/legacy/repos/search/jquery%20slider"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"repositories": []})))
            .expect(1)
            .mount(&server)
            .await;

        let repos = client_for_server(&server)
            .search_repositories("jquery slider")
            .await
            .unwrap();
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_search_without_repositories_key_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "odd"})))
            .mount(&server)
            .await;

        let repos = client_for_server(&server)
            .search_repositories("anything")
            .await
            .unwrap();
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let err = client_for_server(&server)
            .search_repositories("slider")
            .await
            .unwrap_err();

        assert!(matches!(err, ServerError::Upstream(ref msg) if msg.contains("403")));
    }

    #[tokio::test]
    async fn test_non_json_body_is_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for_server(&server)
            .search_repositories("slider")
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_list_root_files_keeps_tree_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/jquery-slider/git/trees/master"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sha": "deadbeef",
                "tree": [
                    {"path": "README.md", "type": "blob", "url": "u1"},
                    {"path": "demo", "type": "tree", "url": "u2"},
                    {"path": "jquery.slider.js", "type": "blob", "url": "u3"}
                ]
            })))
            .mount(&server)
            .await;

        let entries = client_for_server(&server)
            .list_root_files("acme", "jquery-slider", None)
            .await
            .unwrap();

        let keys: Vec<String> = entries.iter().map(TreeEntry::listing_key).collect();
        assert_eq!(keys, vec!["README.md", "demo/", "jquery.slider.js"]);
        assert_eq!(entries[1].kind, EntryKind::Tree);
        assert_eq!(entries[2].url, "u3");
    }

    #[tokio::test]
    async fn test_list_root_files_missing_tree_is_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sha": "x"})))
            .mount(&server)
            .await;

        let err = client_for_server(&server)
            .list_root_files("acme", "repo", Some("gh-pages"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Upstream(_)));
    }

    #[tokio::test]
    async fn test_list_commits_filters_by_ref_and_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/jquery-slider/commits"))
            .and(query_param("sha", "develop"))
            .and(query_param("path", "jquery.slider.js"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"sha": "b", "commit": {"committer": {"name": "x", "date": "2021-06-15T00:00:00Z"}}},
                {"sha": "a", "commit": {"committer": {"name": "x", "date": "2020-01-01T00:00:00Z"}}}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let commits = client_for_server(&server)
            .list_commits("acme", "jquery-slider", Some("develop"), Some("jquery.slider.js"))
            .await
            .unwrap();

        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].sha, "b");
    }

    #[tokio::test]
    async fn test_fetch_file_content_decodes_wrapped_base64() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/jquery-slider/contents/src/jquery.slider.js"))
            .and(query_param("ref", "master"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "jquery.slider.js",
                "encoding": "base64",
                "content": "JC5mbi5zbGlk\nZXIgPSAxOw==\n"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let content = client_for_server(&server)
            .fetch_file_content("acme", "jquery-slider", "/src/jquery.slider.js", None)
            .await
            .unwrap();

        assert_eq!(content, b"$.fn.slider = 1;".to_vec());
    }

    #[tokio::test]
    async fn test_fetch_file_content_rejects_invalid_base64() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "encoding": "base64",
                "content": "not base64!"
            })))
            .mount(&server)
            .await;

        let err = client_for_server(&server)
            .fetch_file_content("acme", "repo", "a.js", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::Decode(_)));
    }

    #[tokio::test]
    async fn test_download_file_from_blob_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/jquery-slider/git/blobs/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sha": "abc",
                "encoding": "base64",
                "content": "aGVsbG8="
            })))
            .mount(&server)
            .await;

        let url = format!("{}/repos/acme/jquery-slider/git/blobs/abc", server.uri());
        let content = client_for_server(&server)
            .download_file(&url)
            .await
            .unwrap();

        assert_eq!(content, b"hello".to_vec());
    }

    #[test]
    fn test_new_rejects_unparseable_url() {
        let mut config = Config::default_config();
        config.github.api_url = "http://".to_string();
        assert!(matches!(
            GitHubClient::new(&config.github),
            Err(ServerError::Config(_))
        ));
    }
}
