//! Servicio de bolsas: inventario del conductor, transferencias con OTP y
//! entregas a clientes verificadas con código

use tracing::{info, warn};
use validator::Validate;

use crate::clients::api_client::{endpoints, ApiClient};
use crate::models::api::{ApiEnvelope, MessageResponse};
use crate::models::bag::{
    BagDistribution, BagStats, BagStatsData, BagTransfer, CompleteBagTransfer, DistributeBags,
    Distribution, InitiateBagTransfer, InitiatedTransfer, TransferHistoryData,
    VerifyBagDistribution,
};
use crate::utils::errors::ApiResult;

pub struct BagService {
    client: ApiClient,
}

impl BagService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> ApiResult<BagStats> {
        let envelope: ApiEnvelope<BagStatsData> = self
            .client
            .get(endpoints::BAG_STATS, &[], "Failed to fetch bag stats")
            .await?;
        Ok(envelope.into_data("Failed to fetch bag stats")?.bags)
    }

    pub async fn transfer_history(&self) -> ApiResult<Vec<BagTransfer>> {
        let envelope: ApiEnvelope<TransferHistoryData> = self
            .client
            .get(endpoints::BAG_TRANSFERS, &[], "Failed to fetch transfer history")
            .await?;
        Ok(envelope
            .into_optional("Failed to fetch transfer history")?
            .unwrap_or_default()
            .data)
    }

    /// Iniciar transferencia; el receptor recibe un OTP para completarla
    pub async fn initiate_transfer(&self, request: &InitiateBagTransfer) -> ApiResult<InitiatedTransfer> {
        request.validate()?;

        let envelope: ApiEnvelope<InitiatedTransfer> = self
            .client
            .post(endpoints::BAG_TRANSFER_INITIATE, request, "Failed to initiate transfer")
            .await?;
        let transfer = envelope.into_data("Failed to initiate transfer")?;

        info!(
            "🛍️ Transferencia '{}' iniciada: {} bolsas a '{}'",
            transfer.transfer_id, request.number_of_bags, request.to_driver_id
        );
        Ok(transfer)
    }

    pub async fn complete_transfer(&self, request: &CompleteBagTransfer) -> ApiResult<Option<String>> {
        request.validate()?;

        let response: MessageResponse = self
            .client
            .post(endpoints::BAG_TRANSFER_COMPLETE, request, "Failed to complete transfer")
            .await?;
        let message = response.into_message("Failed to complete transfer")?;

        info!("✅ Transferencia '{}' completada", request.transfer_id);
        Ok(message)
    }

    /// Entregar bolsas a un cliente; se envía un código al email del receptor
    pub async fn distribute(&self, request: &DistributeBags) -> ApiResult<Distribution> {
        request.validate()?;

        let envelope: ApiEnvelope<Distribution> = self
            .client
            .post(endpoints::BAG_DISTRIBUTE, request, "Failed to create bag distribution")
            .await?;
        let distribution = envelope.into_data("Failed to create bag distribution")?;

        if distribution.email_sent {
            info!(
                "📧 Código de verificación enviado a {} (entrega '{}')",
                request.recipient_email, distribution.distribution_id
            );
        } else {
            warn!(
                "⚠️ Entrega '{}' creada pero el email no se pudo enviar",
                distribution.distribution_id
            );
        }
        Ok(distribution)
    }

    pub async fn verify_distribution(&self, request: &VerifyBagDistribution) -> ApiResult<Option<String>> {
        request.validate()?;

        let response: MessageResponse = self
            .client
            .post(endpoints::BAG_VERIFY, request, "Failed to verify bag distribution")
            .await?;
        let message = response.into_message("Failed to verify bag distribution")?;

        info!("✅ Entrega '{}' verificada", request.distribution_id);
        Ok(message)
    }

    /// Entregas de la semana en curso, opcionalmente filtradas
    pub async fn current_week_history(
        &self,
        search: Option<&str>,
        route_id: Option<&str>,
    ) -> ApiResult<Vec<BagDistribution>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
            query.push(("search", search.trim().to_string()));
        }
        if let Some(route_id) = route_id.filter(|r| !r.is_empty()) {
            query.push(("route_id", route_id.to_string()));
        }

        let envelope: ApiEnvelope<Vec<BagDistribution>> = self
            .client
            .get(endpoints::BAG_CURRENT_WEEK, &query, "Failed to load bag distribution history")
            .await?;
        Ok(envelope
            .into_optional("Failed to load bag distribution history")?
            .unwrap_or_default())
    }
}
