use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bidder::error::BidderError;
use crate::openrtb::request::Imp;

/// TPMN-specific impression parameters, carried under `imp.ext.bidder` on the
/// way in and written back as the bare params object on the way out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpParams {
    #[serde(rename = "inventoryId")]
    pub inventory_id: i64,
}

#[derive(Debug, Deserialize)]
struct ImpExt {
    bidder: ImpParams,
}

/// Parse the opaque parameter payload of one impression.
pub fn parse_imp_params(imp: &Imp) -> Result<ImpParams, BidderError> {
    let ext = imp.ext.clone().unwrap_or(Value::Null);
    let parsed: ImpExt =
        serde_json::from_value(ext).map_err(|err| BidderError::bad_input(err.to_string()))?;
    Ok(parsed.bidder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_inventory_id_from_bidder_ext() {
        let imp = Imp {
            id: "imp-1".to_string(),
            ext: Some(json!({"bidder": {"inventoryId": 10001}})),
            ..Imp::default()
        };

        assert_eq!(parse_imp_params(&imp).unwrap(), ImpParams { inventory_id: 10001 });
    }

    #[test]
    fn rejects_missing_ext() {
        let imp = Imp {
            id: "imp-1".to_string(),
            ..Imp::default()
        };

        assert!(matches!(parse_imp_params(&imp), Err(BidderError::BadInput(_))));
    }

    #[test]
    fn rejects_non_integer_inventory_id() {
        let imp = Imp {
            id: "imp-1".to_string(),
            ext: Some(json!({"bidder": {"inventoryId": "10001"}})),
            ..Imp::default()
        };

        assert!(matches!(parse_imp_params(&imp), Err(BidderError::BadInput(_))));
    }

    #[test]
    fn reserializes_with_wire_field_name() {
        let params = ImpParams { inventory_id: 7 };
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"inventoryId": 7}));
    }
}
