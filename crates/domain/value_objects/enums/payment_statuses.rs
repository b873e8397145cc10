use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }

    /// Maps the free-form status reported by a provider webhook.
    ///
    /// Only the JSON string `"success"` counts as a successful payment.
    pub fn from_provider_report(reported: Option<&serde_json::Value>) -> Self {
        match reported.and_then(|value| value.as_str()) {
            Some("success") => PaymentStatus::Success,
            _ => PaymentStatus::Failed,
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(PaymentStatus::Pending),
            "success" => Ok(PaymentStatus::Success),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(format!("Invalid status: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_literal_success_is_a_success() {
        assert_eq!(
            PaymentStatus::from_provider_report(Some(&json!("success"))),
            PaymentStatus::Success
        );

        for reported in [json!("SUCCESS"), json!("paid"), json!(true), json!(1), json!(null)] {
            assert_eq!(
                PaymentStatus::from_provider_report(Some(&reported)),
                PaymentStatus::Failed,
                "reported: {reported}"
            );
        }
        assert_eq!(
            PaymentStatus::from_provider_report(None),
            PaymentStatus::Failed
        );
    }

    #[test]
    fn new_payments_start_pending() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::default().to_string(), "pending");
    }
}
