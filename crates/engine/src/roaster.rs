//! Request orchestrator.
//!
//! One pass per request, no retries:
//! 1. Fetch the transaction count (required, failure aborts with 502)
//! 2. Fetch USDC balance and recent transactions concurrently (best-effort)
//! 3. Synthesize the prompt
//! 4. Generate the roast

use std::sync::Arc;

use roast_chain::WalletSource;
use roast_common::error::AppError;
use roast_common::types::{AddressQuery, RecentTx, RoastResult, WalletSnapshot};
use roast_llm::TextGenerator;

use crate::prompt::build_prompt;

pub type TxCountLookup = Arc<dyn WalletSource<Output = u64>>;
pub type BalanceLookup = Arc<dyn WalletSource<Output = f64>>;
pub type RecentTxLookup = Arc<dyn WalletSource<Output = Vec<RecentTx>>>;

/// Gathers wallet facts and turns them into a roast.
#[derive(Clone)]
pub struct Roaster {
    tx_count: TxCountLookup,
    usdc_balance: BalanceLookup,
    recent_txs: RecentTxLookup,
    generator: Arc<dyn TextGenerator>,
}

impl Roaster {
    pub fn new(
        tx_count: TxCountLookup,
        usdc_balance: BalanceLookup,
        recent_txs: RecentTxLookup,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            tx_count,
            usdc_balance,
            recent_txs,
            generator,
        }
    }

    /// Collect the on-chain facts for `address`.
    ///
    /// The balance and recent-transaction lookups only start once the
    /// transaction count is known, so an unreachable RPC costs one call.
    pub async fn snapshot(&self, address: AddressQuery) -> Result<WalletSnapshot, AppError> {
        let tx_count = self.tx_count.fetch(&address).await.map_err(|e| {
            tracing::warn!(address = %address, error = %e, "Transaction count lookup failed");
            AppError::rpc_unreachable(e)
        })?;

        let (usdc_balance, recent_txs) = tokio::join!(
            best_effort(self.usdc_balance.as_ref(), &address),
            best_effort(self.recent_txs.as_ref(), &address),
        );

        tracing::debug!(
            address = %address,
            tx_count,
            usdc_balance,
            recent_txs = recent_txs.len(),
            "Wallet snapshot collected"
        );

        Ok(WalletSnapshot::new(address, tx_count, usdc_balance, recent_txs))
    }

    /// Run the full roast pipeline for `address`.
    pub async fn roast(&self, address: AddressQuery) -> Result<RoastResult, AppError> {
        let snapshot = self.snapshot(address).await?;
        let prompt = build_prompt(&snapshot.address, snapshot.tx_count, snapshot.usdc_balance);

        let roast = self.generator.generate(&prompt).await?;

        tracing::info!(
            address = %snapshot.address,
            tx_count = snapshot.tx_count,
            "Roast generated"
        );

        Ok(RoastResult::new(snapshot, roast))
    }
}

/// Fetch from `source`, falling back to `T::default()` on any error.
async fn best_effort<T>(source: &dyn WalletSource<Output = T>, address: &AddressQuery) -> T
where
    T: Default + Send,
{
    match source.fetch(address).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                source = source.name(),
                address = %address,
                error = %e,
                "Best-effort lookup failed, using default"
            );
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use roast_chain::SourceError;
    use roast_llm::GenerationError;
    use serde_json::json;

    use super::*;

    const ADDRESS: &str = "0x1111111111111111111111111111111111111111";

    /// Source returning a fixed value, or failing when `value` is `None`.
    struct FakeSource<T> {
        value: Option<T>,
        calls: AtomicUsize,
    }

    impl<T> FakeSource<T> {
        fn ok(value: T) -> Arc<Self> {
            Arc::new(Self {
                value: Some(value),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                value: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<T: Clone + Send + Sync + 'static> WalletSource for FakeSource<T> {
        type Output = T;

        async fn fetch(&self, _address: &AddressQuery) -> Result<T, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.value
                .clone()
                .ok_or_else(|| SourceError::Malformed("connection refused".to_string()))
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    enum Reply {
        Text(&'static str),
        Status(u16, &'static str),
        Empty,
    }

    struct FakeGenerator {
        reply: Reply,
        calls: AtomicUsize,
        last_prompt: Mutex<Option<String>>,
    }

    impl FakeGenerator {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                last_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            match self.reply {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Status(status, body) => Err(GenerationError::status(status, body)),
                Reply::Empty => Err(GenerationError::Empty),
            }
        }
    }

    fn address() -> AddressQuery {
        AddressQuery::parse(ADDRESS).unwrap()
    }

    fn sample_txs() -> Vec<RecentTx> {
        vec![RecentTx {
            hash: Some(json!("0xabc")),
            time_stamp: Some(json!(1700000000)),
            is_error: Some(json!("0")),
        }]
    }

    #[tokio::test]
    async fn test_tx_count_failure_aborts_before_other_calls() {
        let balance = FakeSource::ok(10.0f64);
        let recent = FakeSource::ok(sample_txs());
        let generator = FakeGenerator::new(Reply::Text("unused"));
        let roaster = Roaster::new(
            FakeSource::<u64>::failing(),
            balance.clone(),
            recent.clone(),
            generator.clone(),
        );

        let err = roaster.roast(address()).await.unwrap_err();

        assert!(
            matches!(err, AppError::UpstreamUnavailable(ref msg) if msg == "Cannot reach Arc RPC: Malformed response: connection refused")
        );
        assert_eq!(balance.calls(), 0);
        assert_eq!(recent.calls(), 0);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_balance_failure_defaults_to_zero() {
        let roaster = Roaster::new(
            FakeSource::ok(12u64),
            FakeSource::<f64>::failing(),
            FakeSource::ok(sample_txs()),
            FakeGenerator::new(Reply::Text("roasted")),
        );

        let result = roaster.roast(address()).await.unwrap();

        assert_eq!(result.usdc_balance, 0.0);
        assert_eq!(result.tx_count, 12);
        assert_eq!(result.recent_txs, sample_txs());
        assert_eq!(result.roast, "roasted");
    }

    #[tokio::test]
    async fn test_recent_txs_failure_defaults_to_empty() {
        let roaster = Roaster::new(
            FakeSource::ok(12u64),
            FakeSource::ok(3.5f64),
            FakeSource::<Vec<RecentTx>>::failing(),
            FakeGenerator::new(Reply::Text("roasted")),
        );

        let result = roaster.roast(address()).await.unwrap();

        assert!(result.recent_txs.is_empty());
        assert_eq!(result.usdc_balance, 3.5);
    }

    #[tokio::test]
    async fn test_zero_wallet_prompt_reaches_generator() {
        let generator = FakeGenerator::new(Reply::Text("ser...\n\nVERDICT: NGMI"));
        let roaster = Roaster::new(
            FakeSource::ok(0u64),
            FakeSource::ok(0.0f64),
            FakeSource::ok(Vec::<RecentTx>::new()),
            generator.clone(),
        );

        let result = roaster.roast(address()).await.unwrap();

        assert_eq!(result.tx_count, 0);
        assert!(result.roast.lines().last().unwrap().starts_with("VERDICT:"));
        let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("Zero transactions ever"));
        assert!(prompt.contains("Couldn't collect free money"));
    }

    #[tokio::test]
    async fn test_generation_errors_propagate() {
        let roaster = Roaster::new(
            FakeSource::ok(5u64),
            FakeSource::ok(2.0f64),
            FakeSource::ok(Vec::<RecentTx>::new()),
            FakeGenerator::new(Reply::Status(529, "overloaded")),
        );
        let err = roaster.roast(address()).await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamUnavailable(ref msg) if msg == "Claude error 529: overloaded"));

        let roaster = Roaster::new(
            FakeSource::ok(5u64),
            FakeSource::ok(2.0f64),
            FakeSource::ok(Vec::<RecentTx>::new()),
            FakeGenerator::new(Reply::Empty),
        );
        let err = roaster.roast(address()).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyGeneration));
    }
}
