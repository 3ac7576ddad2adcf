//! `reqwest`-backed implementation of the repository traits.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::equipment::Equipment;
use crate::domain::lookup::{Brand, EquipmentType, Workstation};
use crate::domain::types::{ExportFormat, RecordId};
use crate::listing::Resource;
use crate::listing::query::EncodedQuery;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    Creatable, Deletable, ListQuery, LookupReader, RecordReader, RecordWriter, Updatable,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the equipment backend and the scheduling backend that owns
/// workstations.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
    workstations_url: Url,
}

/// Parses `raw` as a base URL, making sure relative joins keep its path.
fn base_url(raw: &str) -> RepositoryResult<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).map_err(|err| RepositoryError::InvalidRequest(format!("{raw}: {err}")))
}

impl HttpRepository {
    pub fn new(base_url_raw: &str, workstations_url_raw: &str) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(RepositoryError::from)?;

        Ok(Self {
            client,
            base_url: base_url(base_url_raw)?,
            workstations_url: base_url(workstations_url_raw)?,
        })
    }

    fn endpoint(&self, path: &str) -> RepositoryResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| RepositoryError::InvalidRequest(format!("{path}: {err}")))
    }

    fn with_query(mut url: Url, query: &str) -> Url {
        if query.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(query));
        }
        url
    }

    async fn send_checked(request: reqwest::RequestBuilder) -> RepositoryResult<Response> {
        let response = request.send().await?.error_for_status()?;
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> RepositoryResult<T> {
        log::debug!("GET {url}");
        let response = Self::send_checked(self.client.get(url)).await?;
        let body = response.json::<T>().await?;
        Ok(body)
    }
}

impl RecordReader for HttpRepository {
    async fn list_records<R: Resource>(
        &self,
        query: &ListQuery,
    ) -> RepositoryResult<Vec<R::Record>> {
        let url = Self::with_query(
            self.endpoint(R::LIST_ENDPOINT)?,
            &query.to_query_string(R::PAGING),
        );
        self.get_json(url).await
    }

    async fn export_records<R: Resource>(
        &self,
        filter: &EncodedQuery,
        format: ExportFormat,
    ) -> RepositoryResult<Vec<u8>> {
        let prefix = format!("format={format}");
        let url = Self::with_query(self.endpoint(R::EXPORT_ENDPOINT)?, &filter.after(&prefix));
        log::debug!("GET {url}");
        let response = Self::send_checked(self.client.get(url)).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

impl RecordWriter for HttpRepository {
    async fn create_record<R: Creatable>(&self, payload: &R::New) -> RepositoryResult<()> {
        let url = self.endpoint(R::CREATE_ENDPOINT)?;
        log::debug!("POST {url}");
        Self::send_checked(self.client.post(url).json(payload)).await?;
        Ok(())
    }

    async fn update_record<R: Updatable>(&self, payload: &R::Update) -> RepositoryResult<()> {
        let url = self.endpoint(R::UPDATE_ENDPOINT)?;
        log::debug!("PUT {url}");
        Self::send_checked(self.client.put(url).json(payload)).await?;
        Ok(())
    }

    async fn delete_record<R: Deletable>(&self, id: &RecordId) -> RepositoryResult<()> {
        let url = self.endpoint(R::DELETE_ENDPOINT)?;
        log::debug!("DELETE {url} id={id}");
        Self::send_checked(self.client.delete(url).query(&[("id", id.as_str())])).await?;
        Ok(())
    }
}

impl LookupReader for HttpRepository {
    async fn list_brands(&self) -> RepositoryResult<Vec<Brand>> {
        self.get_json(self.endpoint("equipment/brand")?).await
    }

    async fn list_equipment_types(&self) -> RepositoryResult<Vec<EquipmentType>> {
        self.get_json(self.endpoint("equipment/type")?).await
    }

    async fn list_workstations(&self) -> RepositoryResult<Vec<Workstation>> {
        let url = self
            .workstations_url
            .join("workstations")
            .map_err(|err| RepositoryError::InvalidRequest(err.to_string()))?;
        self.get_json(url).await
    }

    async fn find_equipment_by_tipping(
        &self,
        tipping_number: &str,
        take: usize,
    ) -> RepositoryResult<Vec<Equipment>> {
        let mut url = self.endpoint("equipment/find")?;
        url.query_pairs_mut()
            .append_pair("searchTipping", tipping_number)
            .append_pair("take", &take.to_string());
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_urls_keep_their_path_when_joined() {
        let repo = HttpRepository::new("http://backend:3000/api", "http://schedula/v1/").unwrap();

        assert_eq!(
            repo.endpoint("equipment/find").unwrap().as_str(),
            "http://backend:3000/api/equipment/find"
        );
        assert_eq!(
            repo.workstations_url.join("workstations").unwrap().as_str(),
            "http://schedula/v1/workstations"
        );
    }

    #[test]
    fn empty_query_leaves_no_question_mark() {
        let url = Url::parse("http://backend/equipment/find").unwrap();
        assert_eq!(
            HttpRepository::with_query(url.clone(), "").as_str(),
            "http://backend/equipment/find"
        );
        assert_eq!(
            HttpRepository::with_query(url, "take=10&skip=0").as_str(),
            "http://backend/equipment/find?take=10&skip=0"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            HttpRepository::new("not a url", "http://schedula/"),
            Err(RepositoryError::InvalidRequest(_))
        ));
    }
}
