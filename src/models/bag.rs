//! Modelos de inventario y transferencia de bolsas

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Estadísticas de bolsas del conductor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BagStats {
    #[serde(default)]
    pub allocated_bags: u32,
    #[serde(default)]
    pub used_bags: u32,
    #[serde(default)]
    pub available_bags: u32,
}

/// Payload de `GET /driver/bags/stats`
#[derive(Debug, Clone, Deserialize)]
pub struct BagStatsData {
    pub bags: BagStats,
}

/// Estado de una transferencia
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Completed,
    Expired,
}

/// Resumen de un conductor dentro de una transferencia
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSummary {
    pub id: String,
    pub name: String,
}

/// Transferencia de bolsas entre conductores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BagTransfer {
    #[serde(alias = "_id")]
    pub id: String,
    pub from_driver_id: String,
    pub to_driver_id: String,
    pub number_of_bags: u32,
    pub status: TransferStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub from_driver: Option<DriverSummary>,
    #[serde(default)]
    pub to_driver: Option<DriverSummary>,
}

/// Payload del historial de transferencias
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransferHistoryData {
    #[serde(default)]
    pub data: Vec<BagTransfer>,
}

/// Request para iniciar una transferencia
#[derive(Debug, Clone, Serialize, Validate)]
pub struct InitiateBagTransfer {
    #[validate(length(min = 1))]
    pub to_driver_id: String,

    #[validate(range(min = 1, max = 10000))]
    pub number_of_bags: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Transferencia iniciada, pendiente de OTP
#[derive(Debug, Clone, Deserialize)]
pub struct InitiatedTransfer {
    #[serde(alias = "id")]
    pub transfer_id: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Request para completar una transferencia con el OTP recibido
#[derive(Debug, Clone, Serialize, Validate)]
pub struct CompleteBagTransfer {
    #[validate(length(min = 1))]
    pub transfer_id: String,

    #[validate(custom = "validate_otp")]
    pub otp_code: String,
}

/// Request para entregar bolsas a un cliente; el receptor recibe un código
#[derive(Debug, Clone, Serialize, Validate)]
pub struct DistributeBags {
    #[validate(length(min = 1))]
    pub client_id: String,

    #[validate(email)]
    pub recipient_email: String,

    #[validate(range(min = 1, max = 10000))]
    pub number_of_bags: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Entrega creada, pendiente de verificación
#[derive(Debug, Clone, Deserialize)]
pub struct Distribution {
    #[serde(alias = "id")]
    pub distribution_id: String,
    #[serde(default)]
    pub email_sent: bool,
}

/// Request para verificar una entrega con el código enviado al cliente
#[derive(Debug, Clone, Serialize, Validate)]
pub struct VerifyBagDistribution {
    #[validate(length(min = 1))]
    pub distribution_id: String,

    #[validate(length(min = 1, max = 12))]
    pub verification_code: String,
}

/// Entrega de la semana en curso
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BagDistribution {
    #[serde(alias = "_id", alias = "distribution_id")]
    pub id: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub recipient_email: Option<String>,
    #[serde(default)]
    pub number_of_bags: u32,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn validate_otp(code: &str) -> Result<(), ValidationError> {
    if code.len() == 6 && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("otp_format"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_initiate_validation() {
        let zero = InitiateBagTransfer {
            to_driver_id: "d2".to_string(),
            number_of_bags: 0,
            notes: None,
        };
        assert!(zero.validate().is_err());

        let ok = InitiateBagTransfer { number_of_bags: 5, ..zero };
        assert!(ok.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "to_driver_id": "d2", "number_of_bags": 5 })
        );
    }

    #[test]
    fn test_otp_format() {
        let request = |otp: &str| CompleteBagTransfer {
            transfer_id: "t1".to_string(),
            otp_code: otp.to_string(),
        };
        assert!(request("123456").validate().is_ok());
        assert!(request("12345").validate().is_err());
        assert!(request("12a456").validate().is_err());
    }

    #[test]
    fn test_distribution_validation() {
        let request = DistributeBags {
            client_id: "c1".to_string(),
            recipient_email: "not-an-email".to_string(),
            number_of_bags: 3,
            notes: None,
        };
        assert!(request.validate().is_err());

        let ok = DistributeBags { recipient_email: "ana@example.com".to_string(), ..request };
        assert!(ok.validate().is_ok());

        let empty_code = VerifyBagDistribution {
            distribution_id: "dist-1".to_string(),
            verification_code: String::new(),
        };
        assert!(empty_code.validate().is_err());
    }

    #[test]
    fn test_transfer_deserialization() {
        let transfer: BagTransfer = serde_json::from_value(json!({
            "id": "t1",
            "from_driver_id": "d1",
            "to_driver_id": "d2",
            "number_of_bags": 12,
            "status": "pending",
            "created_at": "2025-03-04T10:00:00Z",
            "to_driver": { "id": "d2", "name": "Lee" }
        }))
        .unwrap();
        assert_eq!(transfer.status, TransferStatus::Pending);
        assert!(transfer.completed_at.is_none());
        assert_eq!(transfer.to_driver.unwrap().name, "Lee");
    }
}
