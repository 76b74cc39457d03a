use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Async client for the document store's REST interface.
///
/// Collections are exposed under `/rest/v1/<collection>` and rows are
/// addressed with `field=eq.value` filters. Write requests ask the store to
/// return the affected rows, so every mutation hands back the stored
/// representation.
pub struct StoreClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl StoreClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.database_url.clone(),
            api_key: config.database_api_key.clone(),
        }
    }

    fn headers(&self, returning: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert("apikey", HeaderValue::from_str(&self.api_key).unwrap());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if returning {
            headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        }

        headers
    }

    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        returning: bool,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Store request {} {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.headers(returning));

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Store error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Store authentication error: {}", error_text),
                404 => anyhow!("Collection not found: {}", error_text),
                _ => anyhow!("Store error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    fn query_string(filters: &[(&str, String)]) -> String {
        filters
            .iter()
            .map(|(field, value)| format!("{}=eq.{}", field, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Fetch all rows of a collection matching the equality filters.
    pub async fn find<T>(&self, collection: &str, filters: &[(&str, String)]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut path = format!("/rest/v1/{}", collection);
        if !filters.is_empty() {
            path.push('?');
            path.push_str(&Self::query_string(filters));
        }

        self.request(Method::GET, &path, None, false).await
    }

    /// Fetch rows whose `field` is one of `values`, with optional extra
    /// equality filters.
    pub async fn find_where_in<T>(
        &self,
        collection: &str,
        field: &str,
        values: &[String],
        filters: &[(&str, String)],
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let list = values.join(",");
        let mut path = format!(
            "/rest/v1/{}?{}=in.{}",
            collection,
            field,
            urlencoding::encode(&format!("({})", list))
        );
        if !filters.is_empty() {
            path.push('&');
            path.push_str(&Self::query_string(filters));
        }

        self.request(Method::GET, &path, None, false).await
    }

    /// Like [`find`](Self::find), with a store-side `order` clause
    /// (e.g. `created_at.desc`).
    pub async fn find_sorted<T>(
        &self,
        collection: &str,
        filters: &[(&str, String)],
        order: &str,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut path = format!("/rest/v1/{}?order={}", collection, order);
        if !filters.is_empty() {
            path.push('&');
            path.push_str(&Self::query_string(filters));
        }

        self.request(Method::GET, &path, None, false).await
    }

    pub async fn find_by_id<T>(&self, collection: &str, id: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let rows: Vec<T> = self
            .find(collection, &[("id", id.to_string())])
            .await?;

        Ok(rows.into_iter().next())
    }

    /// Insert a single document and return the stored row.
    pub async fn insert<T>(&self, collection: &str, document: Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let path = format!("/rest/v1/{}", collection);
        let rows: Vec<T> = self
            .request(Method::POST, &path, Some(document), true)
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| anyhow!("Insert into {} returned no rows", collection))
    }

    pub async fn insert_many<T>(&self, collection: &str, documents: Vec<Value>) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let path = format!("/rest/v1/{}", collection);
        self.request(Method::POST, &path, Some(Value::Array(documents)), true)
            .await
    }

    pub async fn update_by_id<T>(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let rows: Vec<T> = self
            .update_where(collection, &[("id", id.to_string())], patch)
            .await?;

        Ok(rows.into_iter().next())
    }

    /// Patch every row matching the filters and return the updated rows.
    ///
    /// The filter set is applied by the store in the same statement as the
    /// update, so a condition like `is_booked=eq.false` makes the write a
    /// compare-and-set: an empty result means no row still satisfied it.
    pub async fn update_where<T>(
        &self,
        collection: &str,
        filters: &[(&str, String)],
        patch: Value,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let path = format!(
            "/rest/v1/{}?{}",
            collection,
            Self::query_string(filters)
        );

        self.request(Method::PATCH, &path, Some(patch), true).await
    }

    pub async fn delete_by_id(&self, collection: &str, id: &str) -> Result<()> {
        let url = format!(
            "{}/rest/v1/{}?id=eq.{}",
            self.base_url,
            collection,
            urlencoding::encode(id)
        );
        debug!("Store request DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .headers(self.headers(false))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Store error ({}): {}", status, error_text);
            return Err(anyhow!("Store error ({}): {}", status, error_text));
        }

        Ok(())
    }
}
