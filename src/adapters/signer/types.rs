//! Signer service request/response bodies.

use serde::{Deserialize, Serialize};

/// Payload name the signer expands into a set-wallet-record body.
pub const SET_WALLET_RECORD_PAYLOAD: &str = "set_wallet_record";

#[derive(Debug, Serialize)]
pub struct WalletRequest<'a> {
    pub mnemonic: &'a [String],
    pub version: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct WalletResponse {
    pub address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest<'a> {
    pub mnemonic: &'a [String],
    pub version: &'a str,
    pub destination: String,
    pub amount_nano: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<&'a str>,
    pub wait: bool,
}

#[derive(Debug, Deserialize)]
pub struct TransferResponse {
    #[serde(default)]
    pub hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_request_shape() {
        let words = vec!["abandon".to_string()];
        let req = TransferRequest {
            mnemonic: &words,
            version: "v4r2",
            destination: "EQabc".to_string(),
            amount_nano: "5000000".to_string(),
            comment: Some("Renew"),
            payload: None,
            wait: false,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["amountNano"], "5000000");
        assert_eq!(json["comment"], "Renew");
        assert!(json.get("payload").is_none());
    }
}
