//! Core types for the Sonicly subscription and billing data service.
//!
//! This crate provides the foundational types shared by the record store client,
//! the local cache, the data service and the record store server:
//!
//! - **Identifiers**: `UserId`, `SubscriptionId`, `PaymentMethodId`, `BillingRecordId`
//! - **Subscriptions**: `Subscription`, `SubscriptionDraft`, `SubscriptionPatch`
//! - **Payment methods**: `PaymentMethod`, `PaymentDetails`, `PaymentMethodDraft`
//! - **Billing**: `BillingRecord`, `BillingRecordDraft`, `BillingSynthesizer`
//! - **Demo accounts**: `demo_profile` sample data for `user_1` to `user_5`
//!
//! # Wire format
//!
//! Every entity serializes to the camelCase JSON shape used by the record store
//! and by the local cache, so the same value can be written to either side
//! without translation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod billing;
pub mod clock;
pub mod demo;
pub mod ids;
pub mod payment;
pub mod subscription;
pub mod synth;

pub use billing::{sort_newest_first, BillingRecord, BillingRecordDraft, BillingStatus};
pub use demo::{demo_profile, DemoProfile};
pub use ids::{BillingRecordId, IdError, PaymentMethodId, SubscriptionId, UserId};
pub use payment::{
    BankDetails, CardDetails, PaymentDetails, PaymentKind, PaymentMethod, PaymentMethodDraft,
    PaymentMethodPatch, PaymentSnapshot, UpiDetails,
};
pub use subscription::{
    BillingInterval, PlanType, Subscription, SubscriptionDraft, SubscriptionPatch,
    SubscriptionStatus, DEFAULT_CURRENCY, DEFAULT_PLAN_NAME, DEFAULT_PRICE,
};
pub use synth::{BillingSynthesizer, MAX_SYNTHESIZED_RECORDS, PENDING_CHANCE_PERCENT};
