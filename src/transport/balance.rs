use serde::Deserialize;

use super::text::TransportText;
use super::{DataEnvelope, TransportError};
use crate::domain::CreditBalance;

#[derive(Debug, Clone, Deserialize)]
struct BalanceJsonData {
    #[serde(default)]
    credit_balance: Option<TransportText>,
}

pub fn decode_balance_json_response(json: &str) -> Result<CreditBalance, TransportError> {
    let parsed: DataEnvelope<BalanceJsonData> = serde_json::from_str(json)?;
    let balance = parsed
        .into_data()?
        .credit_balance
        .ok_or(TransportError::MissingField {
            field: "data.credit_balance",
        })?;
    Ok(CreditBalance::new(balance.into_string()))
}
