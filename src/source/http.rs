use crate::error::SourceError;
use crate::ranking::Platform;

use super::RankingSource;

/// Fetches `<base_url>/<platform>_top10.csv` over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("liverank/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, platform: Platform) -> String {
        format!("{}/{}", self.base_url, platform.resource_name())
    }
}

impl RankingSource for HttpSource {
    async fn fetch_text(&self, platform: Platform) -> Result<String, SourceError> {
        let url = self.url_for(platform);
        tracing::debug!(%platform, %url, "fetching rankings");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                platform,
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let source = HttpSource::new("https://example.com/data/").unwrap();
        assert_eq!(
            source.url_for(Platform::Tving),
            "https://example.com/data/tving_top10.csv"
        );
    }

    #[tokio::test]
    async fn test_fetch_text_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/netflix_top10.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("header\nnetflix,A,1,g,1,KR,w"))
            .mount(&server)
            .await;

        let source = HttpSource::new(&format!("{}/data", server.uri())).unwrap();
        let body = source.fetch_text(Platform::Netflix).await.unwrap();
        assert_eq!(body, "header\nnetflix,A,1,g,1,KR,w");
    }

    #[tokio::test]
    async fn test_fetch_text_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/disney_top10.csv"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = HttpSource::new(&server.uri()).unwrap();
        let err = source.fetch_text(Platform::Disney).await.unwrap_err();
        assert!(
            matches!(err, SourceError::Status { platform: Platform::Disney, status: 404 }),
            "unexpected error: {err:?}"
        );
    }
}
