use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, ToSchema)]
pub struct TimezoneDto {
    /// Area part of the identifier, e.g. `Europe`
    pub timezone: String,
    /// Full IANA identifier, e.g. `Europe/Helsinki`
    pub identifier: String,
    /// Human readable location, e.g. `Helsinki`
    pub value: String,
}
