//! Tag extraction from OS contracts.

use serde_json::Value;

use crate::core::contract::{ContractError, ContractKind};

/// Tag every OS image carries.
pub const LATEST: &str = "latest";

/// Tags published for an OS: `latest`, then the `version` of each variant
/// in the contract's first variant group.
///
/// The contract must carry a `variants` array. An empty one publishes only
/// `latest`.
pub fn extract_tags(os: &str, contract: &Value) -> Result<Vec<String>, ContractError> {
    let mut tags = vec![LATEST.to_string()];

    let groups = contract
        .get("variants")
        .and_then(Value::as_array)
        .ok_or_else(|| missing(os, "variants"))?;
    let Some(group) = groups.first() else {
        return Ok(tags);
    };

    let variants = group
        .get("variants")
        .and_then(Value::as_array)
        .ok_or_else(|| missing(os, "variants[0].variants"))?;

    for variant in variants {
        let version = variant
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| missing(os, "version"))?;
        tags.push(version.to_string());
    }

    Ok(tags)
}

fn missing(os: &str, field: &str) -> ContractError {
    ContractError::MissingField {
        kind: ContractKind::Os,
        name: os.to_string(),
        field: field.to_string(),
    }
}
