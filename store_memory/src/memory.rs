//! Thread-safe in-memory claim and achievement storage.

use podium_store::{
    Achievement, AchievementStore, AwardStore, Claim, ClaimStatus, ClaimStore, StoreError,
};
use podium_types::{AchievementId, BadgeId, ClaimId, UserId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Inner {
    claims: HashMap<ClaimId, Claim>,
    achievements: HashMap<AchievementId, Achievement>,
    /// Secondary index enforcing one achievement per source claim.
    by_source_claim: HashMap<ClaimId, AchievementId>,
}

impl Inner {
    /// Pending-triple uniqueness: at most one pending claim per
    /// `(claimant, badge, event)`.
    fn check_pending_unique(&self, claim: &Claim) -> Result<(), StoreError> {
        let clash = self.claims.values().any(|c| {
            c.status == ClaimStatus::Pending
                && c.claimant.id == claim.claimant.id
                && c.badge_id == claim.badge_id
                && c.event_id == claim.event_id
        });
        if clash {
            return Err(StoreError::Duplicate(format!(
                "pending claim already exists for claimant {} badge {}",
                claim.claimant.id, claim.badge_id
            )));
        }
        Ok(())
    }

    /// A unique code held by a pending or awarded claim is consumed.
    /// Rejected claims release their code.
    fn check_code_free(&self, claim: &Claim) -> Result<(), StoreError> {
        let Some(code) = &claim.unique_code else {
            return Ok(());
        };
        let consumed = self.claims.values().any(|c| {
            matches!(c.status, ClaimStatus::Pending | ClaimStatus::Awarded)
                && c.unique_code.as_deref() == Some(code)
        });
        if consumed {
            return Err(StoreError::Duplicate(format!(
                "unique code already consumed: {code}"
            )));
        }
        Ok(())
    }

    fn check_source_claim_free(&self, achievement: &Achievement) -> Result<(), StoreError> {
        if self.by_source_claim.contains_key(&achievement.source_claim_id) {
            return Err(StoreError::Duplicate(format!(
                "achievement already exists for claim {}",
                achievement.source_claim_id
            )));
        }
        Ok(())
    }

    fn append_achievement(&mut self, achievement: &Achievement) {
        self.by_source_claim
            .insert(achievement.source_claim_id.clone(), achievement.id.clone());
        self.achievements
            .insert(achievement.id.clone(), achievement.clone());
    }
}

/// An in-memory claim + achievement store.
/// Thread-safe; compound commits hold the lock across all checks and writes.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}

impl ClaimStore for MemoryStore {
    fn insert_pending(&self, claim: &Claim) -> Result<(), StoreError> {
        if claim.status != ClaimStatus::Pending {
            return Err(StoreError::Backend(
                "insert_pending requires a Pending claim".into(),
            ));
        }
        let mut inner = self.lock();
        if inner.claims.contains_key(&claim.id) {
            return Err(StoreError::Duplicate(format!("claim id {}", claim.id)));
        }
        inner.check_pending_unique(claim)?;
        inner.check_code_free(claim)?;
        inner.claims.insert(claim.id.clone(), claim.clone());
        Ok(())
    }

    fn get_claim(&self, id: &ClaimId) -> Result<Claim, StoreError> {
        self.lock()
            .claims
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn decide_if_pending(&self, id: &ClaimId, decided: &Claim) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let current = inner
            .claims
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if current.status != ClaimStatus::Pending {
            return Err(StoreError::Conflict(format!(
                "claim {id} is already {:?}",
                current.status
            )));
        }
        inner.claims.insert(id.clone(), decided.clone());
        Ok(())
    }

    fn list_claims(&self, status: ClaimStatus) -> Result<Vec<Claim>, StoreError> {
        let inner = self.lock();
        let mut claims: Vec<Claim> = inner
            .claims
            .values()
            .filter(|c| c.status == status)
            .cloned()
            .collect();
        claims.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(claims)
    }

    fn badge_has_claims(&self, badge: &BadgeId) -> Result<bool, StoreError> {
        Ok(self.lock().claims.values().any(|c| &c.badge_id == badge))
    }
}

impl AchievementStore for MemoryStore {
    fn get_achievement(&self, id: &AchievementId) -> Result<Achievement, StoreError> {
        self.lock()
            .achievements
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn achievement_for_claim(&self, claim: &ClaimId) -> Result<Option<Achievement>, StoreError> {
        let inner = self.lock();
        Ok(inner
            .by_source_claim
            .get(claim)
            .and_then(|id| inner.achievements.get(id))
            .cloned())
    }

    fn achievements_for_user(&self, user: &UserId) -> Result<Vec<Achievement>, StoreError> {
        Ok(self
            .lock()
            .achievements
            .values()
            .filter(|a| &a.user_id == user)
            .cloned()
            .collect())
    }

    fn achievement_count(&self) -> Result<u64, StoreError> {
        Ok(self.lock().achievements.len() as u64)
    }
}

impl AwardStore for MemoryStore {
    fn commit_award(&self, claim: &Claim, achievement: &Achievement) -> Result<(), StoreError> {
        if achievement.source_claim_id != claim.id {
            return Err(StoreError::Backend(
                "achievement does not reference the committed claim".into(),
            ));
        }
        let mut inner = self.lock();
        let current = inner
            .claims
            .get(&claim.id)
            .ok_or_else(|| StoreError::NotFound(claim.id.to_string()))?;
        if current.status != ClaimStatus::Pending {
            return Err(StoreError::Conflict(format!(
                "claim {} is already {:?}",
                claim.id, current.status
            )));
        }
        inner.check_source_claim_free(achievement)?;
        inner.claims.insert(claim.id.clone(), claim.clone());
        inner.append_achievement(achievement);
        Ok(())
    }

    fn commit_direct_award(
        &self,
        claim: &Claim,
        achievement: &Achievement,
    ) -> Result<(), StoreError> {
        if achievement.source_claim_id != claim.id {
            return Err(StoreError::Backend(
                "achievement does not reference the committed claim".into(),
            ));
        }
        if claim.status != ClaimStatus::Awarded {
            return Err(StoreError::Backend(
                "commit_direct_award requires an Awarded claim".into(),
            ));
        }
        let mut inner = self.lock();
        if inner.claims.contains_key(&claim.id) {
            return Err(StoreError::Duplicate(format!("claim id {}", claim.id)));
        }
        inner.check_code_free(claim)?;
        inner.check_source_claim_free(achievement)?;
        inner.claims.insert(claim.id.clone(), claim.clone());
        inner.append_achievement(achievement);
        Ok(())
    }
}
