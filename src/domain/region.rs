use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Administrative region (legal-dong code), e.g. `1168010800` for 논현동.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionCode {
    pub code: String,
    pub region_name: String,
}

impl RegionCode {
    pub fn new(code: impl Into<String>, region_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            region_name: region_name.into(),
        }
    }
}

/// Normalize an optional region code prefix used to filter by region.
///
/// Blank input means no filter. Anything but ASCII digits is rejected so the
/// prefix can be matched with `LIKE` safely.
pub fn region_prefix(code: Option<&str>) -> Result<Option<&str>> {
    let code = code.map(str::trim).filter(|code| !code.is_empty());
    if let Some(code) = code {
        if !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::InvalidRequest(format!("region code must be numeric: {:?}", code)));
        }
    }
    Ok(code)
}
