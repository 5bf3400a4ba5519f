//! Daily token budget enforcement
//!
//! A [`BudgetGuard`] wraps any provider and keeps a running, per-day token
//! count in a small JSON ledger (`{"date": "2025-01-31", "tokens": 1234}`).
//! Once the day's budget is spent every further call is refused until the
//! date rolls over.

use crate::LlmError;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use insight_domain::traits::LlmProvider;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Default daily token budget
pub const DEFAULT_DAILY_TOKEN_BUDGET: u64 = 200_000;

/// Default ledger location
pub const DEFAULT_USAGE_FILE: &str = "/tmp/llm_usage.json";

/// Rough token estimate: about four characters per token
pub fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() as u64).div_ceil(4)
}

/// Budget settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConfig {
    /// Tokens allowed per calendar day; 0 disables enforcement (usage is still recorded)
    #[serde(default = "default_daily_token_budget")]
    pub daily_token_budget: u64,

    /// JSON ledger holding today's usage
    #[serde(default = "default_usage_file")]
    pub usage_file: PathBuf,
}

fn default_daily_token_budget() -> u64 {
    DEFAULT_DAILY_TOKEN_BUDGET
}

fn default_usage_file() -> PathBuf {
    PathBuf::from(DEFAULT_USAGE_FILE)
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            daily_token_budget: default_daily_token_budget(),
            usage_file: default_usage_file(),
        }
    }
}

/// Usage recorded in the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyUsage {
    /// Day the count belongs to; ledgers without a date are treated as stale
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Tokens used on that day
    #[serde(default)]
    pub tokens: u64,
}

/// File-backed daily usage counter
pub struct UsageLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl UsageLedger {
    /// Create a ledger stored at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Tokens recorded for `date` (0 when the ledger is missing or from another day)
    pub async fn usage_on(&self, date: NaiveDate) -> Result<u64, LlmError> {
        Ok(self
            .load()
            .await?
            .filter(|usage| usage.date == Some(date))
            .map_or(0, |usage| usage.tokens))
    }

    /// Add `tokens` to the count for `date`, resetting the count on a new day
    pub async fn record_on(&self, date: NaiveDate, tokens: u64) -> Result<DailyUsage, LlmError> {
        let _guard = self.write_lock.lock().await;

        let previous = self.usage_on(date).await?;
        let usage = DailyUsage {
            date: Some(date),
            tokens: previous + tokens,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| LlmError::Ledger(e.to_string()))?;
            }
        }
        let json = serde_json::to_string(&usage).map_err(|e| LlmError::Ledger(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| LlmError::Ledger(e.to_string()))?;

        Ok(usage)
    }

    async fn load(&self) -> Result<Option<DailyUsage>, LlmError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => serde_json::from_str(&contents)
                .map(Some)
                .map_err(|e| LlmError::Ledger(format!("{}: {}", self.path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LlmError::Ledger(e.to_string())),
        }
    }
}

/// Provider wrapper that refuses calls once the daily budget is spent
pub struct BudgetGuard<P> {
    inner: P,
    ledger: UsageLedger,
    daily_budget: u64,
}

impl<P> BudgetGuard<P>
where
    P: LlmProvider<Error = LlmError>,
{
    /// Wrap `inner` with the given budget settings
    pub fn new(inner: P, config: &BudgetConfig) -> Self {
        Self {
            inner,
            ledger: UsageLedger::new(config.usage_file.clone()),
            daily_budget: config.daily_token_budget,
        }
    }

    /// The wrapped provider
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Tokens used so far today
    pub async fn used_today(&self) -> Result<u64, LlmError> {
        self.ledger.usage_on(today()).await
    }
}

#[async_trait]
impl<P> LlmProvider for BudgetGuard<P>
where
    P: LlmProvider<Error = LlmError>,
{
    type Error = LlmError;

    async fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let date = today();
        let prompt_tokens = estimate_tokens(prompt);

        if self.daily_budget > 0 {
            let used = self.ledger.usage_on(date).await?;
            if used + prompt_tokens > self.daily_budget {
                warn!(
                    used,
                    budget = self.daily_budget,
                    "Refusing LLM call, daily token budget exhausted"
                );
                return Err(LlmError::BudgetExceeded {
                    used,
                    budget: self.daily_budget,
                });
            }
        }

        let response = self.inner.generate(prompt).await?;

        let usage = self
            .ledger
            .record_on(date, prompt_tokens + estimate_tokens(&response))
            .await?;
        debug!(
            model = self.inner.model_name(),
            tokens_today = usage.tokens,
            "Recorded LLM usage"
        );

        Ok(response)
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockProvider;
    use tempfile::TempDir;

    fn guard(dir: &TempDir, budget: u64, provider: MockProvider) -> BudgetGuard<MockProvider> {
        let config = BudgetConfig {
            daily_token_budget: budget,
            usage_file: dir.path().join("usage.json"),
        };
        BudgetGuard::new(provider, &config)
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }

    #[test]
    fn test_default_config() {
        let config = BudgetConfig::default();
        assert_eq!(config.daily_token_budget, 200_000);
        assert_eq!(config.usage_file, PathBuf::from("/tmp/llm_usage.json"));
    }

    #[tokio::test]
    async fn test_records_usage() {
        let dir = TempDir::new().unwrap();
        let guard = guard(&dir, 1_000, MockProvider::new("abcdefgh"));

        guard.generate("abcd").await.unwrap();
        assert_eq!(guard.used_today().await.unwrap(), 3);

        guard.generate("abcd").await.unwrap();
        assert_eq!(guard.used_today().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_refuses_when_budget_spent() {
        let dir = TempDir::new().unwrap();
        let provider = MockProvider::new("x".repeat(40));
        let guard = guard(&dir, 12, provider.clone());

        // 1 prompt token + 10 completion tokens
        guard.generate("abcd").await.unwrap();

        let result = guard.generate("abcdefgh").await;
        assert!(matches!(
            result,
            Err(LlmError::BudgetExceeded { used: 11, budget: 12 })
        ));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_zero_budget_is_unlimited() {
        let dir = TempDir::new().unwrap();
        let guard = guard(&dir, 0, MockProvider::new("x".repeat(4_000)));

        for _ in 0..3 {
            guard.generate("prompt").await.unwrap();
        }
        assert!(guard.used_today().await.unwrap() >= 3_000);
    }

    #[tokio::test]
    async fn test_stale_ledger_resets() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("usage.json");
        std::fs::write(&path, r#"{"date":"2000-01-01","tokens":999999}"#).unwrap();

        let guard = guard(&dir, 100, MockProvider::new("ok"));
        assert_eq!(guard.used_today().await.unwrap(), 0);
        assert!(guard.generate("prompt").await.is_ok());
    }

    #[tokio::test]
    async fn test_ledger_without_date_is_stale() {
        let dir = TempDir::new().unwrap();
        let ledger = UsageLedger::new(dir.path().join("usage.json"));
        std::fs::write(ledger.path(), r#"{"tokens":500}"#).unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(ledger.usage_on(date).await.unwrap(), 0);

        let usage = ledger.record_on(date, 7).await.unwrap();
        assert_eq!(usage, DailyUsage { date: Some(date), tokens: 7 });
    }

    #[tokio::test]
    async fn test_inner_errors_are_not_recorded() {
        let dir = TempDir::new().unwrap();
        let mut provider = MockProvider::default();
        provider.add_error("boom");
        let guard = guard(&dir, 100, provider);

        assert!(matches!(guard.generate("boom").await, Err(LlmError::Other(_))));
        assert_eq!(guard.used_today().await.unwrap(), 0);
    }
}
