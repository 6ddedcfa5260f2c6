use serde::{Deserialize, Serialize};

/// A tradable instrument as reported by the symbol resolver
///
/// `security_id` is the backend-unique trade key; `trading_symbol` is
/// display-only and must never be submitted as the instrument
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    /// Human-readable symbol, e.g. "HDFCBANK"
    pub trading_symbol: String,
    /// Backend-unique identifier, the only value accepted as a trade key
    pub security_id: String,
    /// Full instrument name, e.g. "HDFC Bank Ltd"
    pub name: String,
    /// Exchange segment the instrument trades on, e.g. "NSE_EQ"
    pub exchange_segment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_field_names_are_camel_case() {
        let inst = Instrument {
            trading_symbol: "TCS".to_string(),
            security_id: "11536".to_string(),
            name: "Tata Consultancy Services".to_string(),
            exchange_segment: "NSE_EQ".to_string(),
        };

        let json = serde_json::to_value(&inst).unwrap();
        assert_eq!(json["tradingSymbol"], "TCS");
        assert_eq!(json["securityId"], "11536");
        assert_eq!(json["exchangeSegment"], "NSE_EQ");
    }
}
