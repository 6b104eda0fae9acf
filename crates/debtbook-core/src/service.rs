//! # Debt Service
//!
//! Orchestrates the Debt aggregate against the persistence contracts and
//! translates between transport DTOs and domain types.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  command DTO                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse identifiers/dates ── parse error ──► error envelope, no I/O     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  construct or load Debt ── not found ──► error envelope                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  aggregate operation ── DebtError ──► its message, verbatim            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  save/update ── failure ──► logged, generic envelope message           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  success envelope                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service never second-guesses the aggregate: it supplies identifiers
//! and translation, the aggregate enforces the rules. Storage errors are
//! logged here and surfaced only as fixed generic messages.

use chrono::{NaiveDate, Utc};
use tracing::{error, warn};
use uuid::Uuid;

use crate::debt::{CancelRequest, Debt, PaymentInfo, ReversalRequest};
use crate::dto::{
    CancelInfoDto, DebtDto, InstallmentDto, PageResult, PaymentInfoDto, ResponseData,
    ReversalInfoDto, ServiceResponse,
};
use crate::money::Money;
use crate::paginate::{PageRequest, SearchQuery};
use crate::repository::{ClientReader, DebtRepository};
use crate::status::DebtStatus;

/// The debt service: one instance per repository/client-reader pair.
#[derive(Debug)]
pub struct DebtService<R, C> {
    repository: R,
    clients: C,
}

impl<R, C> DebtService<R, C>
where
    R: DebtRepository,
    C: ClientReader,
{
    pub fn new(repository: R, clients: C) -> Self {
        DebtService {
            repository,
            clients,
        }
    }

    // -------------------------------------------------------------------------
    // Creation
    // -------------------------------------------------------------------------

    /// Creates a debt from the inbound DTO: parse, validate (collecting all
    /// field failures), generate the schedule, persist.
    pub async fn create_debt(&self, dto: &DebtDto) -> ServiceResponse {
        let service_ids = match parse_ids(&dto.service_ids) {
            Ok(ids) => ids,
            Err(invalid) => {
                warn!(id = %invalid, "rejecting debt with unparseable service id");
                return ServiceResponse::error("invalid service IDs");
            }
        };

        let product_ids = match parse_ids(&dto.product_ids) {
            Ok(ids) => ids,
            Err(invalid) => {
                warn!(id = %invalid, "rejecting debt with unparseable product id");
                return ServiceResponse::error("invalid product IDs");
            }
        };

        // An unparseable client id or due date falls through as nil/absent
        // and is reported by validation with the proper field message.
        let user_client_id = Uuid::parse_str(&dto.user_client_id).unwrap_or_else(|_| Uuid::nil());
        let due_date = NaiveDate::parse_from_str(&dto.due_date, "%Y-%m-%d").ok();

        let mut debt = Debt {
            id: Uuid::now_v7(),
            description: dto.description.clone(),
            total_value: Money::from_cents(dto.total_value_cents),
            due_date,
            installments_quantity: dto.installments_quantity,
            debt_date: Utc::now(),
            status: DebtStatus::Pending,
            user_client_id,
            product_ids,
            service_ids,
            installments: Vec::new(),
            cancel_info: None,
            reversal_info: None,
            finished_at: None,
        };

        let validation_errors = debt.validate();
        if !validation_errors.is_empty() {
            warn!(
                failures = validation_errors.len(),
                "rejecting debt that failed validation"
            );
            return ServiceResponse::error_with(
                "validation errors",
                ResponseData::Validation(validation_errors),
            );
        }

        debt.generate_installments();

        if let Err(err) = self.repository.save(&debt).await {
            error!(debt_id = %debt.id, error = %err, "failed to save debt");
            return ServiceResponse::error("error saving debt");
        }

        ServiceResponse::success("debt created successfully")
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// All debts owned by one client. An empty result is a success, not an
    /// error: list UIs must distinguish "no data" from "failure".
    pub async fn get_user_debts(&self, user_id: Uuid) -> ServiceResponse {
        let debts = match self.repository.client_user_debts(user_id).await {
            Ok(debts) => debts,
            Err(err) => {
                error!(client_id = %user_id, error = %err, "failed to list client debts");
                return ServiceResponse::error("error retrieving debts");
            }
        };

        if debts.is_empty() {
            return ServiceResponse::success("no debts found");
        }

        let data: Vec<DebtDto> = debts.iter().map(DebtDto::from).collect();
        ServiceResponse::success_with("debts retrieved successfully", ResponseData::Debts(data))
    }

    /// The installments of one debt, gated on client existence. The client
    /// check runs first; an unknown client short-circuits before any
    /// installment lookup.
    pub async fn get_debt_installments(&self, client_id: Uuid, debt_id: Uuid) -> ServiceResponse {
        match self.clients.client_exists(client_id).await {
            Ok(true) => {}
            Ok(false) => return ServiceResponse::error("client not found"),
            Err(err) => {
                error!(client_id = %client_id, error = %err, "client existence check failed");
                return ServiceResponse::error("error checking client");
            }
        }

        let installments = match self.repository.debt_installments(debt_id).await {
            Ok(installments) => installments,
            Err(err) => {
                error!(debt_id = %debt_id, error = %err, "failed to list installments");
                return ServiceResponse::error("error retrieving installments");
            }
        };

        let data: Vec<InstallmentDto> = installments.iter().map(InstallmentDto::from).collect();
        ServiceResponse::success_with(
            "installments retrieved successfully",
            ResponseData::Installments(data),
        )
    }

    /// One page of all debts, with the unpaged total.
    pub async fn debts(&self, request: &PageRequest) -> ServiceResponse {
        let query = SearchQuery::from(request);

        let page = match self.repository.get_debts(&query).await {
            Ok(page) => page,
            Err(err) => {
                error!(error = %err, "failed to list debts");
                return ServiceResponse::error("error retrieving debts");
            }
        };

        let data: Vec<DebtDto> = page.data.iter().map(DebtDto::from).collect();
        ServiceResponse::success_with(
            "debts retrieved successfully",
            ResponseData::Page(PageResult {
                total_records: page.total_records,
                data,
            }),
        )
    }

    // -------------------------------------------------------------------------
    // Lifecycle Commands
    // -------------------------------------------------------------------------

    /// Pays one installment of one debt.
    pub async fn pay_installment(&self, dto: &PaymentInfoDto) -> ServiceResponse {
        let mut debt = match self.load_debt(&dto.debt_id).await {
            Ok(debt) => debt,
            Err(response) => return response,
        };

        // An unparseable installment id can never match a stored one; the
        // aggregate reports it as not found.
        let installment_id =
            Uuid::parse_str(&dto.installment_id).unwrap_or_else(|_| Uuid::nil());

        let payment_info = PaymentInfo {
            installment_id,
            amount: Money::from_cents(dto.amount_cents),
            payment_method: dto.payment_method.clone(),
        };

        if let Err(err) = debt.pay_installment(&payment_info) {
            return ServiceResponse::error(err.to_string());
        }

        if let Err(err) = self.repository.update(&debt).await {
            error!(debt_id = %debt.id, error = %err, "failed to update debt after payment");
            return ServiceResponse::error("error updating debt");
        }

        ServiceResponse::success("installment paid successfully")
    }

    /// Cancels a whole debt.
    pub async fn cancel_debt(&self, dto: &CancelInfoDto) -> ServiceResponse {
        let mut debt = match self.load_debt(&dto.debt_id).await {
            Ok(debt) => debt,
            Err(response) => return response,
        };

        let request = CancelRequest {
            reason: dto.reason.clone(),
            cancelled_by: Uuid::parse_str(&dto.cancelled_by).unwrap_or_else(|_| Uuid::nil()),
        };

        if let Err(err) = debt.cancel(&request) {
            return ServiceResponse::error(err.to_string());
        }

        if let Err(err) = self.repository.update(&debt).await {
            error!(debt_id = %debt.id, error = %err, "failed to update debt after cancellation");
            return ServiceResponse::error("error updating debt");
        }

        ServiceResponse::success("debt cancelled successfully")
    }

    /// Reverses a whole debt.
    pub async fn reverse_debt(&self, dto: &ReversalInfoDto) -> ServiceResponse {
        let mut debt = match self.load_debt(&dto.debt_id).await {
            Ok(debt) => debt,
            Err(response) => return response,
        };

        let request = ReversalRequest {
            reason: dto.reason.clone(),
            reversed_by: Uuid::parse_str(&dto.reversed_by).unwrap_or_else(|_| Uuid::nil()),
        };

        if let Err(err) = debt.reverse(&request) {
            return ServiceResponse::error(err.to_string());
        }

        if let Err(err) = self.repository.update(&debt).await {
            error!(debt_id = %debt.id, error = %err, "failed to update debt after reversal");
            return ServiceResponse::error("error updating debt");
        }

        ServiceResponse::success("debt reversed successfully")
    }

    // -------------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------------

    /// Parses a debt id and loads the aggregate. `Err` carries the ready
    /// error envelope for every failure mode (malformed id, repository
    /// failure, unknown debt).
    async fn load_debt(&self, debt_id: &str) -> Result<Debt, ServiceResponse> {
        let Ok(debt_id) = Uuid::parse_str(debt_id) else {
            return Err(ServiceResponse::error("invalid debt ID"));
        };

        match self.repository.get_debt(debt_id).await {
            Ok(Some(debt)) => Ok(debt),
            Ok(None) => Err(ServiceResponse::error("debt not found")),
            Err(err) => {
                error!(debt_id = %debt_id, error = %err, "failed to load debt");
                Err(ServiceResponse::error("error retrieving debt"))
            }
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Parses a list of id strings; on failure returns the offending input.
fn parse_ids(ids: &[String]) -> Result<Vec<Uuid>, String> {
    ids.iter()
        .map(|id| Uuid::parse_str(id).map_err(|_| id.clone()))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryClientReader, MemoryDebtRepository};
    use crate::repository::{DebtPage, RepositoryError, RepositoryResult};
    use crate::validation::ValidationErrors;
    use async_trait::async_trait;
    use chrono::Days;

    fn service() -> DebtService<MemoryDebtRepository, MemoryClientReader> {
        DebtService::new(MemoryDebtRepository::new(), MemoryClientReader::new())
    }

    fn tomorrow() -> String {
        (Utc::now().date_naive() + Days::new(1)).to_string()
    }

    fn creation_dto() -> DebtDto {
        DebtDto {
            description: "Test Debt".to_string(),
            total_value_cents: 100_000,
            due_date: tomorrow(),
            installments_quantity: 12,
            user_client_id: Uuid::now_v7().to_string(),
            product_ids: vec![Uuid::now_v7().to_string()],
            service_ids: vec![Uuid::now_v7().to_string()],
            ..DebtDto::default()
        }
    }

    fn validation_messages(response: &ServiceResponse) -> Vec<String> {
        match &response.data {
            Some(ResponseData::Validation(ValidationErrors { errors })) => {
                errors.iter().map(|e| e.message.clone()).collect()
            }
            other => panic!("expected validation data, got {other:?}"),
        }
    }

    /// A repository whose every operation fails, for the opaque-message paths.
    struct FailingRepository;

    #[async_trait]
    impl DebtRepository for FailingRepository {
        async fn save(&self, _debt: &Debt) -> RepositoryResult<()> {
            Err(RepositoryError::backend("disk on fire"))
        }
        async fn update(&self, _debt: &Debt) -> RepositoryResult<()> {
            Err(RepositoryError::backend("disk on fire"))
        }
        async fn get_debt(&self, _debt_id: Uuid) -> RepositoryResult<Option<Debt>> {
            Err(RepositoryError::backend("disk on fire"))
        }
        async fn client_user_debts(&self, _client_id: Uuid) -> RepositoryResult<Vec<Debt>> {
            Err(RepositoryError::backend("disk on fire"))
        }
        async fn debt_installments(
            &self,
            _debt_id: Uuid,
        ) -> RepositoryResult<Vec<crate::debt::Installment>> {
            Err(RepositoryError::backend("disk on fire"))
        }
        async fn get_debts(&self, _query: &SearchQuery) -> RepositoryResult<DebtPage> {
            Err(RepositoryError::backend("disk on fire"))
        }
    }

    // -------------------------------------------------------------------------
    // Creation
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_debt_succeeds() {
        let service = service();
        let response = service.create_debt(&creation_dto()).await;

        assert!(response.is_success());
        assert_eq!(response.message, "debt created successfully");
        assert_eq!(service.repository.len(), 1);
    }

    #[tokio::test]
    async fn test_create_debt_persists_generated_schedule() {
        let service = service();
        let dto = creation_dto();
        let client_id = Uuid::parse_str(&dto.user_client_id).unwrap();
        service.create_debt(&dto).await;

        let debts = service.repository.client_user_debts(client_id).await.unwrap();
        assert_eq!(debts.len(), 1);
        assert_eq!(debts[0].installments.len(), 12);
        let sum: Money = debts[0].installments.iter().map(|i| i.value).sum();
        assert_eq!(sum, Money::from_cents(100_000));
    }

    #[tokio::test]
    async fn test_create_debt_rejects_invalid_total_value() {
        let service = service();
        let mut dto = creation_dto();
        dto.total_value_cents = -100_000;

        let response = service.create_debt(&dto).await;
        assert!(!response.is_success());
        assert_eq!(response.message, "validation errors");
        assert_eq!(
            validation_messages(&response),
            vec!["totalValue must be greater than 0"]
        );
        assert!(service.repository.is_empty());
    }

    #[tokio::test]
    async fn test_create_debt_rejects_past_due_date() {
        let service = service();
        let mut dto = creation_dto();
        dto.due_date = (Utc::now().date_naive() - Days::new(1)).to_string();

        let response = service.create_debt(&dto).await;
        assert_eq!(
            validation_messages(&response),
            vec!["dueDate must be in the future"]
        );
    }

    #[tokio::test]
    async fn test_create_debt_rejects_missing_client_id() {
        let service = service();
        let mut dto = creation_dto();
        dto.user_client_id = String::new();

        let response = service.create_debt(&dto).await;
        assert_eq!(
            validation_messages(&response),
            vec!["userClientId is required"]
        );
    }

    #[tokio::test]
    async fn test_create_debt_rejects_empty_product_and_service_lists() {
        let service = service();
        let mut dto = creation_dto();
        dto.product_ids.clear();
        dto.service_ids.clear();

        let response = service.create_debt(&dto).await;
        assert_eq!(
            validation_messages(&response),
            vec!["at least one productId or serviceId is required"]
        );
    }

    #[tokio::test]
    async fn test_create_debt_reports_every_failure_at_once() {
        let service = service();
        let dto = DebtDto {
            description: "broken".to_string(),
            total_value_cents: 0,
            due_date: String::new(),
            installments_quantity: 1,
            user_client_id: String::new(),
            ..DebtDto::default()
        };

        let response = service.create_debt(&dto).await;
        assert_eq!(validation_messages(&response).len(), 4);
    }

    #[tokio::test]
    async fn test_create_debt_rejects_unparseable_ids_before_validation() {
        let service = service();

        let mut dto = creation_dto();
        dto.service_ids = vec!["not-an-id".to_string()];
        let response = service.create_debt(&dto).await;
        assert_eq!(response.message, "invalid service IDs");

        let mut dto = creation_dto();
        dto.product_ids = vec!["not-an-id".to_string()];
        let response = service.create_debt(&dto).await;
        assert_eq!(response.message, "invalid product IDs");

        assert!(service.repository.is_empty());
    }

    #[tokio::test]
    async fn test_create_debt_surfaces_save_failure_generically() {
        let service = DebtService::new(FailingRepository, MemoryClientReader::new());
        let response = service.create_debt(&creation_dto()).await;

        assert!(!response.is_success());
        assert_eq!(response.message, "error saving debt");
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_user_debts_returns_dtos() {
        let service = service();
        let dto = creation_dto();
        let client_id = Uuid::parse_str(&dto.user_client_id).unwrap();
        service.create_debt(&dto).await;

        let response = service.get_user_debts(client_id).await;
        assert!(response.is_success());
        assert_eq!(response.message, "debts retrieved successfully");

        let Some(ResponseData::Debts(debts)) = &response.data else {
            panic!("expected debts payload");
        };
        assert_eq!(debts.len(), 1);
        assert_eq!(debts[0].description, "Test Debt");
        assert_eq!(debts[0].status.as_deref(), Some("pending"));
    }

    #[tokio::test]
    async fn test_get_user_debts_empty_is_success() {
        let service = service();
        let response = service.get_user_debts(Uuid::now_v7()).await;

        assert!(response.is_success());
        assert_eq!(response.message, "no debts found");
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn test_get_debt_installments_requires_known_client() {
        let service = service();
        let response = service
            .get_debt_installments(Uuid::now_v7(), Uuid::now_v7())
            .await;

        assert!(!response.is_success());
        assert_eq!(response.message, "client not found");
    }

    #[tokio::test]
    async fn test_get_debt_installments_returns_schedule() {
        let service = service();
        let dto = creation_dto();
        let client_id = Uuid::parse_str(&dto.user_client_id).unwrap();
        service.clients.add(client_id);
        service.create_debt(&dto).await;

        let debt_id = service
            .repository
            .client_user_debts(client_id)
            .await
            .unwrap()[0]
            .id;

        let response = service.get_debt_installments(client_id, debt_id).await;
        assert_eq!(response.message, "installments retrieved successfully");
        let Some(ResponseData::Installments(installments)) = &response.data else {
            panic!("expected installments payload");
        };
        assert_eq!(installments.len(), 12);
    }

    #[tokio::test]
    async fn test_debts_returns_paginated_envelope() {
        let service = service();
        for _ in 0..3 {
            service.create_debt(&creation_dto()).await;
        }

        let response = service
            .debts(&PageRequest {
                limit: 2,
                ..PageRequest::default()
            })
            .await;

        assert_eq!(response.message, "debts retrieved successfully");
        let Some(ResponseData::Page(page)) = &response.data else {
            panic!("expected page payload");
        };
        assert_eq!(page.total_records, 3);
        assert_eq!(page.data.len(), 2);
    }

    // -------------------------------------------------------------------------
    // Payment
    // -------------------------------------------------------------------------

    async fn created_debt(
        service: &DebtService<MemoryDebtRepository, MemoryClientReader>,
        dto: &DebtDto,
    ) -> Debt {
        service.create_debt(dto).await;
        let client_id = Uuid::parse_str(&dto.user_client_id).unwrap();
        service
            .repository
            .client_user_debts(client_id)
            .await
            .unwrap()
            .remove(0)
    }

    #[tokio::test]
    async fn test_pay_installment_succeeds_and_persists() {
        let service = service();
        let mut dto = creation_dto();
        dto.installments_quantity = 2;
        let debt = created_debt(&service, &dto).await;

        let response = service
            .pay_installment(&PaymentInfoDto {
                debt_id: debt.id.to_string(),
                installment_id: debt.installments[0].id.to_string(),
                amount_cents: debt.installments[0].value.cents(),
                payment_method: "credit card".to_string(),
            })
            .await;

        assert!(response.is_success());
        assert_eq!(response.message, "installment paid successfully");

        let stored = service.repository.get_debt(debt.id).await.unwrap().unwrap();
        assert_eq!(stored.installments[0].status, DebtStatus::Paid);
        assert_eq!(stored.status, DebtStatus::Pending);
    }

    #[tokio::test]
    async fn test_pay_installment_rejects_malformed_debt_id() {
        let service = service();
        let response = service
            .pay_installment(&PaymentInfoDto {
                debt_id: "invalid-debt-id".to_string(),
                installment_id: Uuid::now_v7().to_string(),
                amount_cents: 500,
                payment_method: "credit card".to_string(),
            })
            .await;

        assert!(!response.is_success());
        assert_eq!(response.message, "invalid debt ID");
    }

    #[tokio::test]
    async fn test_pay_installment_unknown_debt() {
        let service = service();
        let response = service
            .pay_installment(&PaymentInfoDto {
                debt_id: Uuid::now_v7().to_string(),
                installment_id: Uuid::now_v7().to_string(),
                amount_cents: 500,
                payment_method: "credit card".to_string(),
            })
            .await;

        assert!(!response.is_success());
        assert_eq!(response.message, "debt not found");
    }

    #[tokio::test]
    async fn test_pay_installment_surfaces_aggregate_message_verbatim() {
        let service = service();
        let dto = creation_dto();
        let debt = created_debt(&service, &dto).await;

        let response = service
            .pay_installment(&PaymentInfoDto {
                debt_id: debt.id.to_string(),
                installment_id: debt.installments[0].id.to_string(),
                amount_cents: debt.installments[0].value.cents() - 1,
                payment_method: "cash".to_string(),
            })
            .await;

        assert!(!response.is_success());
        assert_eq!(response.message, "amount does not match the installment value");
    }

    // -------------------------------------------------------------------------
    // Cancellation / Reversal
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_cancel_debt_succeeds() {
        let service = service();
        let debt = created_debt(&service, &creation_dto()).await;

        let response = service
            .cancel_debt(&CancelInfoDto {
                debt_id: debt.id.to_string(),
                reason: "client requested cancellation".to_string(),
                cancelled_by: Uuid::now_v7().to_string(),
            })
            .await;

        assert!(response.is_success());
        assert_eq!(response.message, "debt cancelled successfully");

        let stored = service.repository.get_debt(debt.id).await.unwrap().unwrap();
        assert_eq!(stored.status, DebtStatus::Canceled);
        assert_eq!(
            stored.cancel_info.as_ref().unwrap().reason,
            "client requested cancellation"
        );
    }

    #[tokio::test]
    async fn test_cancel_debt_rejects_malformed_and_unknown_ids() {
        let service = service();

        let response = service
            .cancel_debt(&CancelInfoDto {
                debt_id: "invalid-debt-id".to_string(),
                reason: "r".to_string(),
                cancelled_by: Uuid::now_v7().to_string(),
            })
            .await;
        assert_eq!(response.message, "invalid debt ID");

        let response = service
            .cancel_debt(&CancelInfoDto {
                debt_id: Uuid::now_v7().to_string(),
                reason: "r".to_string(),
                cancelled_by: Uuid::now_v7().to_string(),
            })
            .await;
        assert_eq!(response.message, "debt not found");
    }

    #[tokio::test]
    async fn test_reverse_debt_succeeds() {
        let service = service();
        let debt = created_debt(&service, &creation_dto()).await;

        let response = service
            .reverse_debt(&ReversalInfoDto {
                debt_id: debt.id.to_string(),
                reason: "client requested reversal".to_string(),
                reversed_by: Uuid::now_v7().to_string(),
            })
            .await;

        assert!(response.is_success());
        assert_eq!(response.message, "debt reversed successfully");

        let stored = service.repository.get_debt(debt.id).await.unwrap().unwrap();
        assert_eq!(stored.status, DebtStatus::Reversed);
        let reversal_info = stored.reversal_info.as_ref().unwrap();
        assert_eq!(reversal_info.reversed_installment_qtd, 0);
        assert_eq!(reversal_info.cancelled_installment_qtd, 12);
    }

    #[tokio::test]
    async fn test_reverse_debt_twice_surfaces_aggregate_message() {
        let service = service();
        let debt = created_debt(&service, &creation_dto()).await;

        let dto = ReversalInfoDto {
            debt_id: debt.id.to_string(),
            reason: "first".to_string(),
            reversed_by: Uuid::now_v7().to_string(),
        };
        assert!(service.reverse_debt(&dto).await.is_success());

        let response = service.reverse_debt(&dto).await;
        assert!(!response.is_success());
        assert_eq!(response.message, "debt is already canceled or reversed");
    }

    #[tokio::test]
    async fn test_update_failure_surfaces_generically() {
        // Load succeeds from memory, update fails: build the debt first,
        // then swap in the failing repository around the same aggregate.
        struct LoadOkUpdateFail(Debt);

        #[async_trait]
        impl DebtRepository for LoadOkUpdateFail {
            async fn save(&self, _debt: &Debt) -> RepositoryResult<()> {
                Ok(())
            }
            async fn update(&self, _debt: &Debt) -> RepositoryResult<()> {
                Err(RepositoryError::backend("disk on fire"))
            }
            async fn get_debt(&self, _debt_id: Uuid) -> RepositoryResult<Option<Debt>> {
                Ok(Some(self.0.clone()))
            }
            async fn client_user_debts(&self, _client_id: Uuid) -> RepositoryResult<Vec<Debt>> {
                Ok(Vec::new())
            }
            async fn debt_installments(
                &self,
                _debt_id: Uuid,
            ) -> RepositoryResult<Vec<crate::debt::Installment>> {
                Ok(Vec::new())
            }
            async fn get_debts(&self, _query: &SearchQuery) -> RepositoryResult<DebtPage> {
                Ok(DebtPage {
                    total_records: 0,
                    data: Vec::new(),
                })
            }
        }

        let staging = service();
        let debt = created_debt(&staging, &creation_dto()).await;

        let service = DebtService::new(LoadOkUpdateFail(debt.clone()), MemoryClientReader::new());
        let response = service
            .cancel_debt(&CancelInfoDto {
                debt_id: debt.id.to_string(),
                reason: "r".to_string(),
                cancelled_by: Uuid::now_v7().to_string(),
            })
            .await;

        assert!(!response.is_success());
        assert_eq!(response.message, "error updating debt");
    }
}
