//! Billing history synthesis.
//!
//! When a user holds a subscription but has no billing history, display records
//! are derived from the subscription's start date, price and cadence. These are
//! not transactions; nothing here touches a payment provider.

use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use rand_core::{OsRng, RngCore};

use crate::billing::{BillingRecord, BillingStatus};
use crate::clock;
use crate::ids::BillingRecordId;
use crate::subscription::Subscription;

/// Maximum number of records produced for one history.
pub const MAX_SYNTHESIZED_RECORDS: u32 = 6;

/// Chance, in percent, that a synthesized record is `pending` instead of `paid`.
pub const PENDING_CHANCE_PERCENT: u32 = 10;

/// Derives plausible billing records from subscription metadata.
///
/// The random source is injected so tests can make the pending draw deterministic.
pub struct BillingSynthesizer {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl BillingSynthesizer {
    /// Create a synthesizer backed by the operating system's RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(OsRng)
    }

    /// Create a synthesizer with a specific random source.
    #[must_use]
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Synthesize history for the user's active subscription (or the first one).
    ///
    /// Records step back one billing interval at a time from `today`, up to
    /// [`MAX_SYNTHESIZED_RECORDS`], and never predate the subscription's start.
    /// Returns records newest first; empty if there is no priced subscription.
    #[must_use]
    pub fn synthesize(&self, subscriptions: &[Subscription], today: NaiveDate) -> Vec<BillingRecord> {
        let Some(source) = subscriptions
            .iter()
            .find(|s| s.is_active())
            .or_else(|| subscriptions.first())
        else {
            return Vec::new();
        };

        if !(source.price.is_finite() && source.price > 0.0) {
            return Vec::new();
        }

        let step = source.interval.months();
        (1..=MAX_SYNTHESIZED_RECORDS)
            .map_while(|n| {
                clock::sub_months(today, step * n)
                    .filter(|date| *date >= source.start_date)
                    .map(|date| self.record(source, n, date))
            })
            .collect()
    }

    fn record(&self, source: &Subscription, n: u32, date: NaiveDate) -> BillingRecord {
        let id = BillingRecordId::new(format!("inv_{}_{n}", source.id))
            .unwrap_or_else(|_| BillingRecordId::generate());

        BillingRecord {
            id,
            date,
            amount: source.price,
            currency: source.currency.clone(),
            status: self.draw_status(),
            plan: source.plan_name.clone(),
            payment_method: source.payment_method.label(),
            transaction_id: format!("TXN{}_{n}", source.id),
            invoice_url: Some(format!("#invoice_{n}")),
        }
    }

    fn draw_status(&self) -> BillingStatus {
        let roll = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .next_u32()
            % 100;

        if roll < PENDING_CHANCE_PERCENT {
            BillingStatus::Pending
        } else {
            BillingStatus::Paid
        }
    }
}

impl Default for BillingSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BillingSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BillingSynthesizer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::{BillingInterval, SubscriptionDraft, SubscriptionStatus};

    /// Returns the same value for every draw.
    struct FixedRng(u32);

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.0
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.0)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly_since(start: NaiveDate) -> Subscription {
        SubscriptionDraft {
            plan_name: Some("Premium".into()),
            price: Some(199.0),
            interval: Some(BillingInterval::Month),
            start_date: Some(start),
            ..SubscriptionDraft::default()
        }
        .build(start)
    }

    #[test]
    fn three_calendar_months_yield_three_records() {
        let today = date(2025, 6, 15);
        let start = clock::sub_months(today, 3).unwrap();
        let synth = BillingSynthesizer::with_rng(FixedRng(50));

        let records = synth.synthesize(&[monthly_since(start)], today);

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.date >= start));
        assert_eq!(records[0].date, date(2025, 5, 15));
        assert_eq!(records[2].date, start);
    }

    #[test]
    fn boundary_holds_at_month_end() {
        let today = date(2025, 5, 31);
        let start = clock::sub_months(today, 3).unwrap();
        let synth = BillingSynthesizer::with_rng(FixedRng(50));

        let records = synth.synthesize(&[monthly_since(start)], today);

        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.date >= start));
    }

    #[test]
    fn history_is_capped() {
        let today = date(2025, 6, 15);
        let synth = BillingSynthesizer::with_rng(FixedRng(50));

        let records = synth.synthesize(&[monthly_since(date(2020, 1, 1))], today);

        assert_eq!(records.len(), MAX_SYNTHESIZED_RECORDS as usize);
    }

    #[test]
    fn yearly_plans_step_by_year() {
        let today = date(2025, 6, 15);
        let mut sub = monthly_since(date(2022, 1, 1));
        sub.interval = BillingInterval::Year;
        let synth = BillingSynthesizer::with_rng(FixedRng(50));

        let records = synth.synthesize(&[sub], today);

        let dates: Vec<_> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2024, 6, 15), date(2023, 6, 15), date(2022, 6, 15)]);
    }

    #[test]
    fn new_or_free_subscriptions_produce_nothing() {
        let today = date(2025, 6, 15);
        let synth = BillingSynthesizer::with_rng(FixedRng(50));

        assert!(synth.synthesize(&[monthly_since(today)], today).is_empty());

        let mut free = monthly_since(date(2025, 1, 1));
        free.price = 0.0;
        assert!(synth.synthesize(&[free], today).is_empty());

        assert!(synth.synthesize(&[], today).is_empty());
    }

    #[test]
    fn pending_draw_follows_rng() {
        let today = date(2025, 6, 15);
        let sub = monthly_since(date(2025, 1, 1));

        let pending = BillingSynthesizer::with_rng(FixedRng(3));
        assert!(pending
            .synthesize(std::slice::from_ref(&sub), today)
            .iter()
            .all(|r| r.status == BillingStatus::Pending));

        let paid = BillingSynthesizer::with_rng(FixedRng(10));
        assert!(paid
            .synthesize(&[sub], today)
            .iter()
            .all(|r| r.status == BillingStatus::Paid));
    }

    #[test]
    fn prefers_active_subscription_and_mirrors_it() {
        let today = date(2025, 6, 15);
        let mut cancelled = monthly_since(date(2025, 1, 1));
        cancelled.status = SubscriptionStatus::Cancelled;
        cancelled.plan_name = "Old".into();
        let active = monthly_since(date(2025, 1, 1));

        let synth = BillingSynthesizer::with_rng(FixedRng(50));
        let records = synth.synthesize(&[cancelled, active.clone()], today);

        let first = &records[0];
        assert_eq!(first.plan, "Premium");
        assert_eq!(first.id.as_str(), format!("inv_{}_1", active.id));
        assert_eq!(first.transaction_id, format!("TXN{}_1", active.id));
        assert_eq!(first.payment_method, "Unknown ****0000");
        assert_eq!(first.invoice_url.as_deref(), Some("#invoice_1"));
    }
}
