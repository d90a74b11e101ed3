use contracts::domain::common::AggregateRoot;
use contracts::shared::error::GatewayError;

use crate::shared::gateway::{HttpGateway, ResourceGateway};

/// Number of records of `R` on the backend
pub async fn record_count<R: AggregateRoot>(api_base: &str) -> Result<usize, GatewayError> {
    let records = HttpGateway::<R>::new(api_base).list().await?;
    Ok(records.len())
}

/// Card text for a best-effort count
pub fn count_label(result: &Result<usize, GatewayError>) -> String {
    match result {
        Ok(n) => n.to_string(),
        Err(_) => "--".to_string(),
    }
}
