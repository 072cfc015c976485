//! Sample data for the demo accounts `user_1` to `user_5`.
//!
//! Opt-in only: nothing seeds these unless a caller asks for them, and every
//! other user starts with an empty free account.

use chrono::{DateTime, Days, NaiveDate, TimeDelta, Utc};

use crate::clock;
use crate::ids::{PaymentMethodId, SubscriptionId, UserId};
use crate::payment::{CardDetails, PaymentDetails, PaymentMethod, PaymentSnapshot, UpiDetails};
use crate::subscription::{BillingInterval, PlanType, Subscription, SubscriptionStatus};
use crate::DEFAULT_CURRENCY;

/// Seed collections for one demo account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoProfile {
    /// Subscriptions, at most one of them default.
    pub subscriptions: Vec<Subscription>,
    /// Payment methods, exactly one of them default.
    pub payment_methods: Vec<PaymentMethod>,
}

/// The sample profile for a demo account, or `None` for any other user.
///
/// Dates are relative to `today` and creation times to `now`.
#[must_use]
pub fn demo_profile(user_id: &UserId, today: NaiveDate, now: DateTime<Utc>) -> Option<DemoProfile> {
    let fixture = Fixture { today, now };

    let profile = match user_id.as_str() {
        "user_1" => DemoProfile {
            subscriptions: vec![fixture.subscription(
                "sub_premium_monthly",
                Plan::premium_monthly("AI-powered recommendations"),
                60,
                PaymentSnapshot::card("Visa", "4242"),
            )],
            payment_methods: vec![
                fixture.card("pm_card_visa", "visa", "4242", (12, 2025), true, 1),
                fixture.upi("pm_upi_paytm", "chaitanya@paytm", false, 2),
            ],
        },
        "user_2" => DemoProfile {
            subscriptions: vec![fixture.subscription(
                "sub_family_yearly",
                Plan {
                    name: "Family Yearly",
                    plan_type: PlanType::Family,
                    price: 2990.0,
                    interval: BillingInterval::Year,
                    features: vec![
                        "Everything in Premium",
                        "Up to 6 family members",
                        "Individual profiles",
                        "Parental controls",
                        "Family mix playlists",
                        "Shared favorites",
                    ],
                },
                120,
                PaymentSnapshot::upi("rahul@phonepe"),
            )],
            payment_methods: vec![
                fixture.upi("pm_upi_phonepe", "rahul@phonepe", true, 1),
                fixture.card("pm_card_master", "mastercard", "8888", (8, 2026), false, 2),
            ],
        },
        "user_3" => DemoProfile {
            subscriptions: Vec::new(),
            payment_methods: vec![fixture.upi("pm_upi_gpay", "priya@oksbi", true, 1)],
        },
        "user_4" => DemoProfile {
            subscriptions: vec![fixture.subscription(
                "sub_premium_monthly_rock",
                Plan::premium_monthly("Rock & Metal collections"),
                90,
                PaymentSnapshot::card("Visa", "1234"),
            )],
            payment_methods: vec![
                fixture.card("pm_card_visa_arjun", "visa", "1234", (3, 2026), true, 1),
                fixture.card("pm_card_amex", "amex", "9876", (11, 2025), false, 2),
            ],
        },
        "user_5" => DemoProfile {
            subscriptions: vec![fixture.subscription(
                "sub_family_monthly_jazz",
                Plan {
                    name: "Family Monthly",
                    plan_type: PlanType::Family,
                    price: 299.0,
                    interval: BillingInterval::Month,
                    features: vec![
                        "Everything in Premium",
                        "Up to 6 family members",
                        "Individual profiles",
                        "Jazz & Blues collections",
                        "Music theory integration",
                    ],
                },
                45,
                PaymentSnapshot::card("Mastercard", "5555"),
            )],
            payment_methods: vec![fixture.card(
                "pm_card_master_neha",
                "mastercard",
                "5555",
                (9, 2025),
                true,
                1,
            )],
        },
        _ => return None,
    };

    Some(profile)
}

const PREMIUM_FEATURES: [&str; 5] = [
    "Unlimited music streaming",
    "High quality audio (320kbps)",
    "No advertisements",
    "Offline listening",
    "Premium playlists",
];

struct Plan {
    name: &'static str,
    plan_type: PlanType,
    price: f64,
    interval: BillingInterval,
    features: Vec<&'static str>,
}

impl Plan {
    fn premium_monthly(extra_feature: &'static str) -> Self {
        let mut features = PREMIUM_FEATURES.to_vec();
        features.push(extra_feature);

        Self {
            name: "Premium Monthly",
            plan_type: PlanType::Premium,
            price: 199.0,
            interval: BillingInterval::Month,
            features,
        }
    }
}

struct Fixture {
    today: NaiveDate,
    now: DateTime<Utc>,
}

impl Fixture {
    fn subscription(
        &self,
        id: &str,
        plan: Plan,
        started_days_ago: u64,
        payment_method: PaymentSnapshot,
    ) -> Subscription {
        Subscription {
            id: SubscriptionId::new(id).unwrap_or_else(|_| SubscriptionId::generate()),
            plan_name: plan.name.to_string(),
            plan_type: plan.plan_type,
            price: plan.price,
            currency: DEFAULT_CURRENCY.to_string(),
            interval: plan.interval,
            status: SubscriptionStatus::Active,
            next_billing: clock::add_months(self.today, plan.interval.months()),
            is_default: true,
            features: plan.features.into_iter().map(String::from).collect(),
            start_date: self
                .today
                .checked_sub_days(Days::new(started_days_ago))
                .unwrap_or(self.today),
            payment_method,
        }
    }

    fn card(
        &self,
        id: &str,
        brand: &str,
        last4: &str,
        (exp_month, exp_year): (u8, u16),
        is_default: bool,
        created_days_ago: i64,
    ) -> PaymentMethod {
        self.method(
            id,
            PaymentDetails::Card {
                card: CardDetails {
                    brand: brand.to_string(),
                    last4: last4.to_string(),
                    exp_month,
                    exp_year,
                },
            },
            is_default,
            created_days_ago,
        )
    }

    fn upi(&self, id: &str, vpa: &str, is_default: bool, created_days_ago: i64) -> PaymentMethod {
        self.method(
            id,
            PaymentDetails::Upi {
                upi: UpiDetails {
                    vpa: vpa.to_string(),
                },
            },
            is_default,
            created_days_ago,
        )
    }

    fn method(
        &self,
        id: &str,
        details: PaymentDetails,
        is_default: bool,
        created_days_ago: i64,
    ) -> PaymentMethod {
        PaymentMethod {
            id: PaymentMethodId::new(id).unwrap_or_else(|_| PaymentMethodId::generate()),
            details,
            is_default,
            created: self.now - TimeDelta::days(created_days_ago),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(user: &str) -> Option<DemoProfile> {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let now = DateTime::from_timestamp_millis(1_748_736_000_000).unwrap();
        demo_profile(&UserId::new(user).unwrap(), today, now)
    }

    #[test]
    fn only_demo_accounts_have_profiles() {
        for user in ["user_1", "user_2", "user_3", "user_4", "user_5"] {
            assert!(profile(user).is_some(), "{user}");
        }
        assert!(profile("user_6").is_none());
        assert!(profile("asha").is_none());
    }

    #[test]
    fn every_profile_has_one_default_of_each() {
        for user in ["user_1", "user_2", "user_3", "user_4", "user_5"] {
            let profile = profile(user).unwrap();
            assert!(profile.subscriptions.iter().filter(|s| s.is_default).count() <= 1);
            assert_eq!(
                profile.payment_methods.iter().filter(|m| m.is_default).count(),
                1,
                "{user}"
            );
        }
    }

    #[test]
    fn family_profile_dates_are_relative_to_today() {
        let profile = profile("user_2").unwrap();
        let sub = &profile.subscriptions[0];

        assert_eq!(sub.plan_name, "Family Yearly");
        assert_eq!(sub.start_date, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(sub.next_billing, NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        assert_eq!(sub.payment_method.label(), "UPI: rahul@phonepe");
    }

    #[test]
    fn free_demo_account_has_no_subscription() {
        let profile = profile("user_3").unwrap();
        assert!(profile.subscriptions.is_empty());
        assert_eq!(profile.payment_methods.len(), 1);
    }
}
