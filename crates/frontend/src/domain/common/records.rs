use crate::shared::api_utils::{get_data, ApiError};
use contracts::domain::a001_mosque::aggregate::Mosque;
use contracts::domain::a002_charity::aggregate::Charity;
use contracts::domain::a003_student::aggregate::Student;
use contracts::domain::a004_file::aggregate::FileEntry;
use contracts::domain::common::EntityKind;
use contracts::shared::forms::{FormRecord, InitialValue};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

async fn load<R>(kind: EntityKind, id: &str) -> Result<BTreeMap<String, InitialValue>, ApiError>
where
    R: FormRecord + DeserializeOwned,
{
    let path = format!("{}/{}", kind.endpoint(), urlencoding::encode(id));
    let record = get_data::<R>(&path).await?;
    Ok(record.initial_values())
}

/// Loads the record to prefill an edit form
pub async fn fetch_initial_values(
    kind: EntityKind,
    id: &str,
) -> Result<BTreeMap<String, InitialValue>, ApiError> {
    match kind {
        EntityKind::Mosque => load::<Mosque>(kind, id).await,
        EntityKind::Charity => load::<Charity>(kind, id).await,
        EntityKind::Student => load::<Student>(kind, id).await,
        EntityKind::File => load::<FileEntry>(kind, id).await,
    }
}
