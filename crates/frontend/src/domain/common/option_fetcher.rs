use crate::shared::api_utils::get_data;
use async_trait::async_trait;
use contracts::domain::common::location::sources;
use contracts::shared::forms::RawOption;
use forms::OptionFetcher;
use urlencoding::encode;

/// Maps an option source key and its ancestor values to an API path
///
/// Returns `None` for unknown sources or a wrong number of ancestors.
pub fn source_path(source: &str, ancestors: &[String]) -> Option<String> {
    match (source, ancestors) {
        (sources::CITIES, []) => Some("/api/cities".to_string()),
        (sources::DISTRICTS, [city]) => Some(format!("/api/cities/{}/districts", encode(city))),
        (sources::ASSOCIATIONS, [city, district]) => Some(format!(
            "/api/associations?city_id={}&district_id={}",
            encode(city),
            encode(district)
        )),
        (sources::MOSQUES, [district]) => {
            Some(format!("/api/mosques?district_id={}", encode(district)))
        }
        _ => None,
    }
}

#[derive(Clone, Copy, Default)]
pub struct RestOptionFetcher;

#[async_trait(?Send)]
impl OptionFetcher for RestOptionFetcher {
    async fn fetch_options(
        &self,
        source: &str,
        ancestors: &[String],
    ) -> Result<Vec<RawOption>, String> {
        let path = source_path(source, ancestors).ok_or_else(|| {
            format!(
                "unknown option source `{}` with {} ancestor value(s)",
                source,
                ancestors.len()
            )
        })?;
        log::debug!("fetching options from {}", path);
        get_data::<Vec<RawOption>>(&path)
            .await
            .map_err(|e| e.user_message())
    }
}
