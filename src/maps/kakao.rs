//! Kakao Local keyword search client
//!
//! Endpoint: `{base_url}/v2/local/search/keyword.json?query=&x=&y=&page=`
//! Auth header: `Authorization: KakaoAK {REST API key}`

use super::{PlaceDocument, PlaceMeta, PlacePage, PlaceSearch, PlaceSearchRequest};
use crate::config::MapsConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const KEYWORD_PATH: &str = "/v2/local/search/keyword.json";

#[derive(Debug, Deserialize)]
struct KakaoKeywordResponse {
    documents: Vec<KakaoDocument>,
    meta: KakaoMeta,
}

#[derive(Debug, Deserialize)]
struct KakaoDocument {
    id: String,
    place_name: String,
    #[serde(default)]
    category_name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    address_name: String,
    #[serde(default)]
    road_address_name: String,
    x: String,
    y: String,
}

#[derive(Debug, Deserialize)]
struct KakaoMeta {
    total_count: u32,
    pageable_count: u32,
    is_end: bool,
}

impl TryFrom<KakaoDocument> for PlaceDocument {
    type Error = Error;

    fn try_from(doc: KakaoDocument) -> Result<Self> {
        let id = doc
            .id
            .parse::<i64>()
            .map_err(|e| Error::SearchMaps(format!("non-numeric place id {:?}: {}", doc.id, e)))?;

        Ok(PlaceDocument {
            id,
            place_name: doc.place_name,
            category_name: doc.category_name,
            phone: doc.phone,
            address_name: doc.address_name,
            road_address_name: doc.road_address_name,
            x: doc.x,
            y: doc.y,
        })
    }
}

/// [`PlaceSearch`] backed by the Kakao Local API
pub struct KakaoKeywordClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl KakaoKeywordClient {
    /// Build a client with the configured timeout. Fails without an API key.
    pub fn new(config: &MapsConfig) -> Result<Self> {
        let api_key = config
            .resolved_api_key()
            .ok_or_else(|| Error::SearchMaps("Kakao REST API key is not configured".to_string()))?;
        Self::with_api_key(&config.base_url, api_key, Duration::from_millis(config.timeout_ms))
    }

    pub fn with_api_key(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::SearchMaps(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl PlaceSearch for KakaoKeywordClient {
    async fn search_keyword(&self, request: &PlaceSearchRequest) -> Result<PlacePage> {
        let url = format!("{}{}", self.base_url, KEYWORD_PATH);
        let page = request.page.to_string();

        tracing::debug!("Kakao keyword search {:?} page {}", request.query, request.page);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, format!("KakaoAK {}", self.api_key))
            .query(&[
                ("query", request.query.as_str()),
                ("x", request.x.as_str()),
                ("y", request.y.as_str()),
                ("page", page.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::SearchMaps(format!("request timed out: {}", e))
                } else {
                    Error::SearchMaps(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::SearchMaps(format!("Kakao API error: {}", status)));
        }

        let body: KakaoKeywordResponse = response
            .json()
            .await
            .map_err(|e| Error::SearchMaps(format!("undecodable response: {}", e)))?;

        let documents = body
            .documents
            .into_iter()
            .map(PlaceDocument::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(PlacePage {
            documents,
            meta: PlaceMeta {
                total_count: body.meta.total_count,
                pageable_count: body.meta.pageable_count,
                is_end: body.meta.is_end,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
      "documents": [
        {
          "address_name": "서울 강남구 논현동 92",
          "category_group_code": "FD6",
          "category_group_name": "음식점",
          "category_name": "음식점 > 일식 > 초밥,롤",
          "distance": "",
          "id": "23829251",
          "phone": "02-541-6200",
          "place_name": "스시코우지",
          "place_url": "http://place.map.kakao.com/23829251",
          "road_address_name": "서울 강남구 도산대로 318",
          "x": "127.03662909986537",
          "y": "37.52186058560857"
        }
      ],
      "meta": {
        "is_end": true,
        "pageable_count": 1,
        "same_name": { "keyword": "스시코우지", "region": [], "selected_region": "" },
        "total_count": 1
      }
    }"#;

    #[test]
    fn test_decode_keyword_response() {
        let body: KakaoKeywordResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(body.meta.total_count, 1);
        assert!(body.meta.is_end);

        let doc = PlaceDocument::try_from(body.documents.into_iter().next().unwrap()).unwrap();
        assert_eq!(doc.id, 23829251);
        assert_eq!(doc.category_name, "음식점 > 일식 > 초밥,롤");
        assert_eq!(doc.x, "127.03662909986537");
    }

    #[test]
    fn test_non_numeric_id_is_search_failure() {
        let doc = KakaoDocument {
            id: "abc".to_string(),
            place_name: "x".to_string(),
            category_name: String::new(),
            phone: String::new(),
            address_name: String::new(),
            road_address_name: String::new(),
            x: "0".to_string(),
            y: "0".to_string(),
        };
        assert!(matches!(PlaceDocument::try_from(doc), Err(Error::SearchMaps(_))));
    }

    #[test]
    fn test_missing_api_key() {
        let config = MapsConfig {
            api_key: Some("  ".to_string()),
            ..MapsConfig::default()
        };
        // Only meaningful when the environment does not provide a key either
        if std::env::var(crate::config::KAKAO_API_KEY_ENV).is_err() {
            assert!(matches!(KakaoKeywordClient::new(&config), Err(Error::SearchMaps(_))));
        }
    }
}
