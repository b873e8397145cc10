use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    Bankily,
    Sedad,
    Masrvi,
}

impl PaymentProvider {
    pub const ALL: [PaymentProvider; 3] = [
        PaymentProvider::Bankily,
        PaymentProvider::Sedad,
        PaymentProvider::Masrvi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentProvider::Bankily => "bankily",
            PaymentProvider::Sedad => "sedad",
            PaymentProvider::Masrvi => "masrvi",
        }
    }

    /// Two-letter prefix of the merchant references generated for this provider.
    pub fn ref_prefix(&self) -> &'static str {
        match self {
            PaymentProvider::Bankily => "BK",
            PaymentProvider::Sedad => "SD",
            PaymentProvider::Masrvi => "MS",
        }
    }

    /// Header carrying the hex HMAC of the webhook body, e.g. `x-bankily-signature`.
    pub fn signature_header(&self) -> &'static str {
        match self {
            PaymentProvider::Bankily => "x-bankily-signature",
            PaymentProvider::Sedad => "x-sedad-signature",
            PaymentProvider::Masrvi => "x-masrvi-signature",
        }
    }
}

impl Display for PaymentProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentProvider {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "bankily" => Ok(PaymentProvider::Bankily),
            "sedad" => Ok(PaymentProvider::Sedad),
            "masrvi" => Ok(PaymentProvider::Masrvi),
            other => Err(format!("Unknown provider: {}", other)),
        }
    }
}
