//! PlanService - owns the in-memory Plan collection.
//!
//! The service holds the collection behind a single lock: the
//! duplicate-active-plan check and the insert happen under the same
//! critical section, so concurrent creates cannot both pass the check.
//! Every instance owns independent state; two services never share plans.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, PlanId};
use crate::domain::plan::{Plan, PlanError, PlanType, PlanUpdate};

/// Payload for creating a plan.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlan {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub plan_type: PlanType,
    pub duration_months: u32,
}

/// Per-type plan counts for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCounts {
    pub musculacao: u64,
    pub zumba: u64,
    pub pilates: u64,
    pub musculacao_pilates: u64,
    pub zumba_pilates: u64,
    pub musculacao_zumba: u64,
}

impl TypeCounts {
    fn bump(&mut self, plan_type: PlanType) {
        let slot = match plan_type {
            PlanType::Musculacao => &mut self.musculacao,
            PlanType::Zumba => &mut self.zumba,
            PlanType::Pilates => &mut self.pilates,
            PlanType::MusculacaoPilates => &mut self.musculacao_pilates,
            PlanType::ZumbaPilates => &mut self.zumba_pilates,
            PlanType::MusculacaoZumba => &mut self.musculacao_zumba,
        };
        *slot += 1;
    }
}

/// Aggregate statistics over the plan collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStatistics {
    pub total_count: u64,
    pub active_count: u64,
    pub inactive_count: u64,
    pub by_type: TypeCounts,
    /// Sum of discounted totals over active plans.
    pub total_revenue: Money,
    /// Mean discounted total over active plans, in whole cents.
    pub average_revenue: Money,
}

/// Service owning the Plan collection for its process lifetime.
#[derive(Debug, Default)]
pub struct PlanService {
    plans: Mutex<HashMap<PlanId, Plan>>,
}

impl PlanService {
    /// Creates a service with an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a plan, enforcing one active plan per client email.
    ///
    /// # Errors
    ///
    /// - `DuplicateActivePlan` if an active plan already exists for the
    ///   payload's client email
    /// - `Validation` if any field violates its constraint
    pub fn create(&self, payload: NewPlan) -> Result<Plan, PlanError> {
        // Duplicate check and insert share the collection lock.
        let mut plans = self.plans.lock().unwrap();

        let duplicate = plans
            .values()
            .any(|p| p.active && p.client_email == payload.client_email);
        if duplicate {
            return Err(PlanError::duplicate_active_plan(payload.client_email));
        }

        let plan = Plan::create(
            payload.client_name,
            payload.client_email,
            payload.client_phone,
            payload.plan_type,
            payload.duration_months,
        )?;
        plans.insert(plan.id, plan.clone());

        tracing::info!(plan_id = %plan.id, plan_type = %plan.plan_type, "Plan created");
        Ok(plan)
    }

    /// Applies a partial edit to a plan.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id is absent
    /// - `Validation` if any present field violates its constraint; the
    ///   plan is left unchanged in that case
    pub fn edit(&self, id: PlanId, update: PlanUpdate) -> Result<Plan, PlanError> {
        let mut plans = self.plans.lock().unwrap();
        let plan = plans.get_mut(&id).ok_or(PlanError::NotFound(id))?;
        plan.apply_update(update)?;

        tracing::debug!(plan_id = %id, "Plan edited");
        Ok(plan.clone())
    }

    /// Deactivates a plan.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id is absent
    /// - `InvalidTransition` if the plan is already inactive
    pub fn cancel(&self, id: PlanId) -> Result<Plan, PlanError> {
        let mut plans = self.plans.lock().unwrap();
        let plan = plans.get_mut(&id).ok_or(PlanError::NotFound(id))?;
        plan.deactivate()?;

        tracing::info!(plan_id = %id, "Plan cancelled");
        Ok(plan.clone())
    }

    /// Reactivates a plan.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id is absent
    /// - `InvalidTransition` if the plan is already active
    pub fn reactivate(&self, id: PlanId) -> Result<Plan, PlanError> {
        let mut plans = self.plans.lock().unwrap();
        let plan = plans.get_mut(&id).ok_or(PlanError::NotFound(id))?;
        plan.activate()?;

        tracing::info!(plan_id = %id, "Plan reactivated");
        Ok(plan.clone())
    }

    /// Removes a plan outright. Administrative operation; no state guard.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is absent.
    pub fn delete(&self, id: PlanId) -> Result<(), PlanError> {
        let mut plans = self.plans.lock().unwrap();
        plans.remove(&id).ok_or(PlanError::NotFound(id))?;

        tracing::info!(plan_id = %id, "Plan deleted");
        Ok(())
    }

    /// Looks up a plan by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the id is absent.
    pub fn find_by_id(&self, id: PlanId) -> Result<Plan, PlanError> {
        let plans = self.plans.lock().unwrap();
        plans.get(&id).cloned().ok_or(PlanError::NotFound(id))
    }

    /// Returns every plan.
    pub fn list(&self) -> Vec<Plan> {
        self.plans.lock().unwrap().values().cloned().collect()
    }

    /// Returns active plans.
    pub fn active_plans(&self) -> Vec<Plan> {
        self.filtered(|p| p.active)
    }

    /// Returns inactive plans.
    pub fn inactive_plans(&self) -> Vec<Plan> {
        self.filtered(|p| !p.active)
    }

    /// Returns plans of the given type.
    pub fn by_type(&self, plan_type: PlanType) -> Vec<Plan> {
        self.filtered(|p| p.plan_type == plan_type)
    }

    /// Returns plans with exactly the given duration.
    pub fn by_duration(&self, duration_months: u32) -> Vec<Plan> {
        self.filtered(|p| p.duration_months == duration_months)
    }

    /// Returns plans whose duration falls in `[min, max]` inclusive.
    pub fn by_duration_range(&self, min_months: u32, max_months: u32) -> Vec<Plan> {
        self.filtered(|p| p.duration_months >= min_months && p.duration_months <= max_months)
    }

    /// Returns plans whose client name contains the query,
    /// case-insensitively.
    pub fn search_by_client_name(&self, query: &str) -> Vec<Plan> {
        let query = query.to_lowercase();
        self.filtered(|p| p.client_name.to_lowercase().contains(&query))
    }

    /// Returns plans whose client email contains the query,
    /// case-insensitively.
    pub fn search_by_client_email(&self, query: &str) -> Vec<Plan> {
        let query = query.to_lowercase();
        self.filtered(|p| p.client_email.to_lowercase().contains(&query))
    }

    /// Returns plans whose duration tier earns any discount.
    pub fn discounted_plans(&self) -> Vec<Plan> {
        self.filtered(|p| p.discount_percent().value() > 0)
    }

    /// Returns the newest plans, most recent first.
    pub fn recent_plans(&self, limit: usize) -> Vec<Plan> {
        let mut plans = self.list();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        plans.truncate(limit);
        plans
    }

    /// Counts plans of the given type.
    pub fn count_by_type(&self, plan_type: PlanType) -> usize {
        self.by_type(plan_type).len()
    }

    /// Counts active plans.
    pub fn count_active(&self) -> usize {
        self.active_plans().len()
    }

    /// Counts inactive plans.
    pub fn count_inactive(&self) -> usize {
        self.inactive_plans().len()
    }

    /// Sum of discounted totals over active plans.
    pub fn active_revenue(&self) -> Money {
        let plans = self.plans.lock().unwrap();
        plans
            .values()
            .filter(|p| p.active)
            .map(|p| p.discounted_total())
            .sum()
    }

    /// Sum of discounted totals over active plans of the given type.
    pub fn revenue_by_type(&self, plan_type: PlanType) -> Money {
        let plans = self.plans.lock().unwrap();
        plans
            .values()
            .filter(|p| p.active && p.plan_type == plan_type)
            .map(|p| p.discounted_total())
            .sum()
    }

    /// Mean discounted total over active plans, in whole cents.
    ///
    /// Zero when no plan is active.
    pub fn average_discounted_total(&self) -> Money {
        let plans = self.plans.lock().unwrap();
        let active: Vec<_> = plans.values().filter(|p| p.active).collect();
        if active.is_empty() {
            return Money::ZERO;
        }
        let total: Money = active.iter().map(|p| p.discounted_total()).sum();
        Money::from_cents(total.cents() / active.len() as i64)
    }

    /// Groups every plan by its type.
    pub fn group_by_type(&self) -> HashMap<PlanType, Vec<Plan>> {
        let plans = self.plans.lock().unwrap();
        let mut groups: HashMap<PlanType, Vec<Plan>> = HashMap::new();
        for plan in plans.values() {
            groups.entry(plan.plan_type).or_default().push(plan.clone());
        }
        groups
    }

    /// Groups every plan by its duration in months.
    pub fn group_by_duration(&self) -> HashMap<u32, Vec<Plan>> {
        let plans = self.plans.lock().unwrap();
        let mut groups: HashMap<u32, Vec<Plan>> = HashMap::new();
        for plan in plans.values() {
            groups
                .entry(plan.duration_months)
                .or_default()
                .push(plan.clone());
        }
        groups
    }

    /// Aggregate statistics for the admin dashboard.
    pub fn statistics(&self) -> PlanStatistics {
        let plans = self.plans.lock().unwrap();

        let mut stats = PlanStatistics::default();
        let mut active_revenue_cents = 0i64;
        for plan in plans.values() {
            stats.total_count += 1;
            stats.by_type.bump(plan.plan_type);
            if plan.active {
                stats.active_count += 1;
                active_revenue_cents += plan.discounted_total().cents();
            } else {
                stats.inactive_count += 1;
            }
        }

        stats.total_revenue = Money::from_cents(active_revenue_cents);
        stats.average_revenue = if stats.active_count == 0 {
            Money::ZERO
        } else {
            Money::from_cents(active_revenue_cents / stats.active_count as i64)
        };
        stats
    }

    fn filtered(&self, predicate: impl Fn(&Plan) -> bool) -> Vec<Plan> {
        let plans = self.plans.lock().unwrap();
        plans
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect()
    }
}
