use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//
// ─── PLANS ─────────────────────────────────────────────────────────────────────
//

/// Subscription plans offered to the learner.
///
/// Choosing a plan is a local state change only; no payment is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Monthly,
    Yearly,
    Lifetime,
}

impl SubscriptionPlan {
    pub const ALL: [SubscriptionPlan; 3] = [Self::Monthly, Self::Yearly, Self::Lifetime];

    /// Parse a plan name as typed by a user (`"monthly"`, `"yearly"`, `"lifetime"`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "yearly" | "annual" => Some(Self::Yearly),
            "lifetime" => Some(Self::Lifetime),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Lifetime => "lifetime",
        }
    }
}

/// How often a plan is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    Month,
    Year,
    Once,
}

/// A plan as presented to the learner, priced in whole rupiah.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanOffer {
    pub plan: SubscriptionPlan,
    pub name: &'static str,
    pub price_idr: u32,
    pub billing: BillingPeriod,
    pub popular: bool,
}

impl PlanOffer {
    /// Percentage saved against paying the monthly offer for the same period.
    ///
    /// Only yearly plans have a comparable monthly period; other plans yield `None`.
    #[must_use]
    pub fn savings_percent(&self, monthly: &PlanOffer) -> Option<u8> {
        if self.billing != BillingPeriod::Year || monthly.billing != BillingPeriod::Month {
            return None;
        }
        let full = u64::from(monthly.price_idr) * 12;
        let price = u64::from(self.price_idr);
        if full == 0 || price >= full {
            return None;
        }
        let saved = (full - price) * 100 / full;
        u8::try_from(saved).ok()
    }
}

/// The offers shown on the upgrade screen, in display order.
#[must_use]
pub fn plan_offers() -> Vec<PlanOffer> {
    vec![
        PlanOffer {
            plan: SubscriptionPlan::Monthly,
            name: "Bulanan",
            price_idr: 49_000,
            billing: BillingPeriod::Month,
            popular: false,
        },
        PlanOffer {
            plan: SubscriptionPlan::Yearly,
            name: "Tahunan",
            price_idr: 399_000,
            billing: BillingPeriod::Year,
            popular: true,
        },
        PlanOffer {
            plan: SubscriptionPlan::Lifetime,
            name: "Seumur Hidup",
            price_idr: 999_000,
            billing: BillingPeriod::Once,
            popular: false,
        },
    ]
}

//
// ─── SUBSCRIPTION STATE ────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum SubscriptionState {
    #[default]
    Free,
    Premium {
        plan: Option<SubscriptionPlan>,
        since: DateTime<Utc>,
    },
}

impl SubscriptionState {
    #[must_use]
    pub fn is_premium(&self) -> bool {
        matches!(self, Self::Premium { .. })
    }

    #[must_use]
    pub fn plan(&self) -> Option<SubscriptionPlan> {
        match self {
            Self::Premium { plan, .. } => *plan,
            Self::Free => None,
        }
    }

    /// Move to the premium tier.
    ///
    /// There is no way back to `Free`. Upgrading an already premium state keeps
    /// the original activation and returns `false`.
    pub fn upgrade(&mut self, plan: Option<SubscriptionPlan>, now: DateTime<Utc>) -> bool {
        if self.is_premium() {
            return false;
        }
        *self = Self::Premium { plan, since: now };
        true
    }
}
