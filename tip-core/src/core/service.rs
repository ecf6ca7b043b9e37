//! Payment flow facade
//!
//! Glues the identity provider, calculator and history together the way a
//! client screen uses them: sign in, submit a cost, show the recent line.

use std::sync::Arc;

use shared::{PaymentRecord, PaymentResult, TipRate};
use tip_auth::{IdentityProvider, SessionToken, SessionUser};
use tokio::task::JoinHandle;

use super::config::Config;
use super::error::TipResult;
use crate::calculator::{DieRoll, TipCalculator};
use crate::db::{DocumentStore, SqliteDocumentStore, StoreResult};
use crate::history::{PaymentHistoryService, format_recent};

/// A computed payment and its in-flight save
///
/// Dropping `save` does not cancel the write.
pub struct Submission {
    pub result: PaymentResult,
    /// Resolves to the new document id
    pub save: JoinHandle<StoreResult<String>>,
}

#[derive(Clone)]
pub struct TipService {
    identity: Arc<dyn IdentityProvider>,
    history: PaymentHistoryService,
    calculator: TipCalculator,
    history_limit: usize,
}

impl TipService {
    pub fn new(identity: Arc<dyn IdentityProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            identity,
            history: PaymentHistoryService::new(store),
            calculator: TipCalculator::new(),
            history_limit: crate::core::config::DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Open the SQLite store named by `config`
    pub async fn open(config: &Config, identity: Arc<dyn IdentityProvider>) -> TipResult<Self> {
        let store = SqliteDocumentStore::open(&config.database_path).await?;
        Ok(Self::new(identity, Arc::new(store)).with_history_limit(config.history_limit))
    }

    pub fn with_calculator(mut self, calculator: TipCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    pub fn history(&self) -> &PaymentHistoryService {
        &self.history
    }

    // ========== Session ==========

    pub async fn sign_in(&self, email: &str, password: &str) -> TipResult<SessionToken> {
        Ok(self.identity.verify_credentials(email, password).await?)
    }

    pub async fn sign_in_federated(&self, id_token: &str) -> TipResult<SessionToken> {
        Ok(self.identity.verify_federated_token(id_token).await?)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> TipResult<SessionToken> {
        Ok(self.identity.create_account(email, password).await?)
    }

    pub async fn sign_out(&self, session: &SessionToken) -> TipResult<()> {
        Ok(self.identity.sign_out(session).await?)
    }

    async fn require_user(&self, session: &SessionToken) -> TipResult<SessionUser> {
        Ok(self.identity.validate_session(session).await?)
    }

    // ========== Payments ==========

    /// Compute a payment and start saving it
    ///
    /// Input errors return before anything is written. The save runs on its
    /// own task; a failed save is logged and never undoes the result.
    pub async fn submit(
        &self,
        session: &SessionToken,
        cost: &str,
        rate: Option<TipRate>,
        round_up: bool,
    ) -> TipResult<Submission> {
        let (user, result) = self
            .authorize_and_compute(session, cost, rate, round_up)
            .await
            .inspect_err(|e| {
                tracing::warn!(
                    code = %e.code(),
                    category = %e.category(),
                    error = %e,
                    "Payment submission rejected"
                );
            })?;

        tracing::info!(
            user_id = %user.user_id,
            cost = %result.cost,
            tip_rate = %result.tip_rate,
            total = %result.total,
            rounded_up = result.rounded_up,
            "Payment computed"
        );

        let history = self.history.clone();
        let record = result.to_record();
        let save = tokio::spawn(async move {
            history.save(&record).await.inspect_err(|e| {
                tracing::warn!(
                    code = %e.code(),
                    category = %e.code().category(),
                    error = %e,
                    total = %record.total_amount,
                    "Failed to save payment"
                );
            })
        });

        Ok(Submission { result, save })
    }

    async fn authorize_and_compute(
        &self,
        session: &SessionToken,
        cost: &str,
        rate: Option<TipRate>,
        round_up: bool,
    ) -> TipResult<(SessionUser, PaymentResult)> {
        let user = self.require_user(session).await?;
        let result = self.calculator.compute_input(cost, rate, round_up)?;
        Ok((user, result))
    }

    /// Most recent payments, newest first
    ///
    /// A store failure is logged and yields an empty list.
    pub async fn recent(&self, session: &SessionToken) -> TipResult<Vec<PaymentRecord>> {
        self.require_user(session).await?;

        match self.history.fetch_recent(self.history_limit).await {
            Ok(records) => Ok(records.collect()),
            Err(e) => {
                tracing::warn!(
                    code = %e.code(),
                    category = %e.code().category(),
                    error = %e,
                    "Failed to load payment history"
                );
                Ok(Vec::new())
            }
        }
    }

    /// `"Last 5 payments: ..."`
    pub async fn recent_summary(&self, session: &SessionToken) -> TipResult<String> {
        let records = self.recent(session).await?;
        Ok(format_recent(self.history_limit, &records))
    }

    /// Roll the die for a suggested tip rate
    pub fn suggest_tip(&self) -> DieRoll {
        let roll = DieRoll::roll();
        tracing::debug!(face = roll.face(), rate = %roll.recommended_rate(), "Die rolled");
        roll
    }
}
