//! The verification engine — the five operations of the claim workflow.
//!
//! Submission and decisions are invoked by independent callers concurrently.
//! The engine performs no locking of its own: the duplicate-pending and
//! at-most-once-award invariants are enforced by the store's write-time
//! constraint checks, and decisions are compare-and-set writes, so two
//! racing decisions resolve to exactly one winner.

use crate::error::VerifyError;
use crate::queue::ClaimFilter;
use podium_catalog::{BadgeCatalog, BadgeDefinition, CatalogError, EventRecord, EventRegistry};
use podium_notify::{Notification, NotificationDispatcher};
use podium_store::{
    Achievement, AwardStore, BadgeSnapshot, Claim, ClaimMethod, ClaimStatus, Claimant, StoreError,
};
use podium_types::{AchievementId, BadgeId, ClaimId, Clock, EventId, UserId};
use serde::{Deserialize, Serialize};

/// How a claimant's submission arrived. The scanned variant carries the
/// one-time code, so a scanned claim without a code cannot be expressed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimSource {
    Manual,
    ScannedCode(String),
}

/// An authority's verdict on a pending claim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approve,
    Reject { reason: String },
}

/// Result of an award — the decided claim and its ledger entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub claim: Claim,
    pub achievement: Achievement,
}

/// Advisory usage report consulted before a badge definition is deleted.
///
/// Deletion is never blocked by this core; historical claims and
/// achievements keep their denormalized badge snapshot either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeUsage {
    pub in_use_by_events: bool,
    pub has_claims: bool,
}

/// The verification engine. All methods take `&self`; share it freely.
pub struct VerificationEngine<S, C, R, D, K> {
    store: S,
    catalog: C,
    registry: R,
    dispatcher: D,
    clock: K,
}

impl<S, C, R, D, K> VerificationEngine<S, C, R, D, K>
where
    S: AwardStore,
    C: BadgeCatalog,
    R: EventRegistry,
    D: NotificationDispatcher,
    K: Clock,
{
    pub fn new(store: S, catalog: C, registry: R, dispatcher: D, clock: K) -> Self {
        Self {
            store,
            catalog,
            registry,
            dispatcher,
            clock,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Submit a claim for review. On success the claim is `Pending` and its
    /// id is returned.
    pub fn submit_claim(
        &self,
        claimant: Claimant,
        badge_id: BadgeId,
        event_id: Option<EventId>,
        evidence: &str,
        source: ClaimSource,
    ) -> Result<ClaimId, VerifyError> {
        self.resolve_assignable_badge(&badge_id, event_id.as_ref())?;
        if evidence.trim().is_empty() {
            return Err(VerifyError::MissingEvidence);
        }

        let (method, unique_code) = match source {
            ClaimSource::Manual => (ClaimMethod::Manual, None),
            ClaimSource::ScannedCode(code) => (ClaimMethod::ScannedCode, Some(code)),
        };

        let claim = Claim {
            id: ClaimId::generate(),
            claimant,
            badge_id: badge_id.clone(),
            event_id,
            evidence: evidence.to_string(),
            method,
            status: ClaimStatus::Pending,
            submitted_at: self.clock.now(),
            decided_at: None,
            decided_by: None,
            rejection_reason: None,
            unique_code,
        };

        self.store
            .insert_pending(&claim)
            .map_err(map_submit_error)?;

        tracing::info!(claim = %claim.id, badge = %badge_id, claimant = %claim.claimant.id, "claim submitted");
        Ok(claim.id)
    }

    /// Authority-initiated award: submission and approval collapsed into one
    /// atomic step, so no one else can reject it in between and no
    /// intermediate `Pending` state is ever observable.
    pub fn assign_badge(
        &self,
        authority: &UserId,
        claimant: Claimant,
        badge_id: BadgeId,
        event_id: Option<EventId>,
        reason: &str,
    ) -> Result<Award, VerifyError> {
        let badge = self.resolve_assignable_badge(&badge_id, event_id.as_ref())?;
        if reason.trim().is_empty() {
            // The reason is the evidence of a direct assignment.
            return Err(VerifyError::MissingEvidence);
        }

        let now = self.clock.now();
        let claim = Claim {
            id: ClaimId::generate(),
            claimant,
            badge_id,
            event_id,
            evidence: reason.to_string(),
            method: ClaimMethod::DirectAssignment,
            status: ClaimStatus::Awarded,
            submitted_at: now,
            decided_at: Some(now),
            decided_by: Some(authority.clone()),
            rejection_reason: None,
            unique_code: None,
        };
        let achievement = build_achievement(&claim, &badge, authority, now);

        self.store
            .commit_direct_award(&claim, &achievement)
            .map_err(map_submit_error)?;

        tracing::info!(claim = %claim.id, badge = %claim.badge_id, authority = %authority, "badge assigned directly");
        self.dispatcher.notify(Notification::badge_assigned(
            claim.claimant.id.clone(),
            &badge.name,
            badge.points,
        ));

        Ok(Award { claim, achievement })
    }

    /// Decide a pending claim. Approval writes the achievement in the same
    /// atomic unit as the status transition; rejection records the reason.
    /// Either way the decision is stamped exactly once — a claim already
    /// decided fails with [`VerifyError::AlreadyDecided`] so racing callers
    /// can detect they lost.
    pub fn decide_claim(
        &self,
        authority: &UserId,
        claim_id: &ClaimId,
        decision: Decision,
    ) -> Result<Claim, VerifyError> {
        let claim = self.store.get_claim(claim_id).map_err(|e| match e {
            StoreError::NotFound(_) => VerifyError::ClaimNotFound(claim_id.clone()),
            other => VerifyError::Storage(other),
        })?;
        if !claim.is_pending() {
            return Err(VerifyError::AlreadyDecided(claim_id.clone()));
        }

        let now = self.clock.now();
        let mut decided = claim;
        decided.decided_at = Some(now);
        decided.decided_by = Some(authority.clone());

        match decision {
            Decision::Approve => {
                // The award snapshots the badge; a force-deleted badge can no
                // longer be awarded, only its history survives.
                let badge = self.badge(&decided.badge_id)?;
                decided.status = ClaimStatus::Awarded;
                let achievement = build_achievement(&decided, &badge, authority, now);

                self.store
                    .commit_award(&decided, &achievement)
                    .map_err(|e| map_decide_error(e, claim_id))?;

                tracing::info!(claim = %decided.id, badge = %decided.badge_id, authority = %authority, "claim approved");
                self.dispatcher.notify(Notification::claim_approved(
                    decided.claimant.id.clone(),
                    &badge.name,
                    badge.points,
                ));
            }
            Decision::Reject { reason } => {
                decided.status = ClaimStatus::Rejected;
                decided.rejection_reason = Some(reason.clone());

                self.store
                    .decide_if_pending(claim_id, &decided)
                    .map_err(|e| map_decide_error(e, claim_id))?;

                tracing::info!(claim = %decided.id, badge = %decided.badge_id, authority = %authority, "claim rejected");
                let badge_name = self.badge_name_or_id(&decided.badge_id);
                self.dispatcher.notify(Notification::claim_rejected(
                    decided.claimant.id.clone(),
                    &badge_name,
                    &reason,
                ));
            }
        }

        Ok(decided)
    }

    /// Advisory report for the catalog's badge-deletion flow: does any event
    /// or any claim (of any status) still reference the badge?
    pub fn check_badge_usage(&self, badge_id: &BadgeId) -> Result<BadgeUsage, VerifyError> {
        let events = self
            .registry
            .events_assigning_badge(badge_id)
            .map_err(|e| VerifyError::Dependency(e.to_string()))?;
        let has_claims = self
            .store
            .badge_has_claims(badge_id)
            .map_err(VerifyError::Storage)?;

        Ok(BadgeUsage {
            in_use_by_events: !events.is_empty(),
            has_claims,
        })
    }

    /// The verification queue: a restartable snapshot of all pending claims,
    /// most recent first, optionally narrowed by event and badge category.
    ///
    /// Reflects the committed state at call time; call again for a fresh
    /// snapshot. Claims whose badge no longer resolves do not match a
    /// category filter.
    pub fn list_pending_claims(
        &self,
        filter: &ClaimFilter,
    ) -> Result<impl Iterator<Item = Claim>, VerifyError> {
        let pending = self
            .store
            .list_claims(ClaimStatus::Pending)
            .map_err(VerifyError::Storage)?;

        let mut selected = Vec::with_capacity(pending.len());
        for claim in pending {
            if let Some(event) = &filter.event {
                if claim.event_id.as_ref() != Some(event) {
                    continue;
                }
            }
            if let Some(category) = &filter.category {
                match self.catalog.badge(&claim.badge_id) {
                    Ok(badge) if &badge.category == category => {}
                    Ok(_) | Err(CatalogError::NotFound(_)) => continue,
                    Err(CatalogError::Unavailable(msg)) => {
                        return Err(VerifyError::Dependency(msg));
                    }
                }
            }
            selected.push(claim);
        }
        Ok(selected.into_iter())
    }

    fn badge(&self, id: &BadgeId) -> Result<BadgeDefinition, VerifyError> {
        self.catalog.badge(id).map_err(|e| match e {
            CatalogError::NotFound(_) => VerifyError::BadgeNotFound(id.clone()),
            CatalogError::Unavailable(msg) => VerifyError::Dependency(msg),
        })
    }

    fn event(&self, id: &EventId) -> Result<EventRecord, VerifyError> {
        self.registry.event(id).map_err(|e| match e {
            CatalogError::NotFound(_) => VerifyError::EventNotFound(id.clone()),
            CatalogError::Unavailable(msg) => VerifyError::Dependency(msg),
        })
    }

    /// Badge must exist, be active, and (when an event is involved) be in
    /// that event's assignable set.
    fn resolve_assignable_badge(
        &self,
        badge_id: &BadgeId,
        event_id: Option<&EventId>,
    ) -> Result<BadgeDefinition, VerifyError> {
        let badge = self.badge(badge_id)?;
        if !badge.active {
            return Err(VerifyError::BadgeInactive(badge_id.clone()));
        }
        if let Some(event_id) = event_id {
            let event = self.event(event_id)?;
            if !event.assigns(badge_id) {
                return Err(VerifyError::BadgeNotAssignedToEvent {
                    badge: badge_id.clone(),
                    event: event_id.clone(),
                });
            }
        }
        Ok(badge)
    }

    /// Best-effort badge name for notification text; the side-effect path
    /// never fails the operation.
    fn badge_name_or_id(&self, id: &BadgeId) -> String {
        match self.catalog.badge(id) {
            Ok(badge) => badge.name,
            Err(_) => id.to_string(),
        }
    }
}

fn build_achievement(
    claim: &Claim,
    badge: &BadgeDefinition,
    authority: &UserId,
    now: podium_types::Timestamp,
) -> Achievement {
    Achievement {
        id: AchievementId::generate(),
        user_id: claim.claimant.id.clone(),
        badge_id: claim.badge_id.clone(),
        badge: BadgeSnapshot {
            name: badge.name.clone(),
            icon: badge.icon.clone(),
            points: badge.points,
        },
        source_event_id: claim.event_id.clone(),
        source_claim_id: claim.id.clone(),
        awarded_at: now,
        awarded_by: authority.clone(),
    }
}

fn map_submit_error(e: StoreError) -> VerifyError {
    match e {
        StoreError::Duplicate(msg) => VerifyError::DuplicateClaim(msg),
        other => VerifyError::Storage(other),
    }
}

fn map_decide_error(e: StoreError, claim_id: &ClaimId) -> VerifyError {
    match e {
        // A conflicting decision or an already-written achievement both mean
        // the claim reached a terminal state first.
        StoreError::Conflict(_) | StoreError::Duplicate(_) => {
            VerifyError::AlreadyDecided(claim_id.clone())
        }
        StoreError::NotFound(_) => VerifyError::ClaimNotFound(claim_id.clone()),
        other => VerifyError::Storage(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use podium_catalog::{BadgeDefinition, EventRecord};
    use podium_notify::{ChannelDispatcher, NotificationKind};
    use podium_nullables::{NullCatalog, NullClock, NullRegistry, RecordingDispatcher};
    use podium_store::{AchievementStore, ClaimStore};
    use podium_store_memory::MemoryStore;
    use std::sync::Arc;

    type TestEngine =
        VerificationEngine<MemoryStore, NullCatalog, NullRegistry, RecordingDispatcher, NullClock>;

    fn badge(id: &str, name: &str, points: u32, category: &str, active: bool) -> BadgeDefinition {
        BadgeDefinition {
            id: BadgeId::new(id),
            name: name.into(),
            icon: format!("{id}.png"),
            points,
            category: category.into(),
            active,
        }
    }

    fn student(id: &str) -> Claimant {
        Claimant {
            id: UserId::new(id),
            display_name: format!("Student {id}"),
            external_id: format!("MX-{id}"),
        }
    }

    /// Engine over a populated catalog and registry: "hackathon-participant"
    /// (10 pts) claimable at event "hackx", "early-bird" (5 pts) at
    /// "orientation", plus a retired badge.
    fn engine() -> TestEngine {
        let catalog = NullCatalog::new();
        catalog.insert(badge(
            "hackathon-participant",
            "Hackathon Participant",
            10,
            "competition",
            true,
        ));
        catalog.insert(badge("early-bird", "Early Bird", 5, "participation", true));
        catalog.insert(badge("retired", "Retired Badge", 3, "legacy", false));

        let registry = NullRegistry::new();
        registry.insert(EventRecord {
            id: EventId::new("hackx"),
            title: "HackX".into(),
            badges: vec![BadgeId::new("hackathon-participant")],
        });
        registry.insert(EventRecord {
            id: EventId::new("orientation"),
            title: "Orientation Week".into(),
            badges: vec![BadgeId::new("early-bird")],
        });

        VerificationEngine::new(
            MemoryStore::new(),
            catalog,
            registry,
            RecordingDispatcher::new(),
            NullClock::new(1_000),
        )
    }

    fn submit_hackx_claim(engine: &TestEngine, who: &str) -> ClaimId {
        engine
            .submit_claim(
                student(who),
                BadgeId::new("hackathon-participant"),
                Some(EventId::new("hackx")),
                "certificate attached",
                ClaimSource::Manual,
            )
            .unwrap()
    }

    // ── Submission ──────────────────────────────────────────────────────

    #[test]
    fn submitted_claim_is_pending() {
        let engine = engine();
        let id = submit_hackx_claim(&engine, "s1");

        let claim = engine.store().get_claim(&id).unwrap();
        assert_eq!(claim.status, ClaimStatus::Pending);
        assert_eq!(claim.method, ClaimMethod::Manual);
        assert_eq!(claim.evidence, "certificate attached");
        assert_eq!(claim.submitted_at.as_secs(), 1_000);
        assert!(claim.decided_at.is_none());
        assert!(claim.decided_by.is_none());
    }

    #[test]
    fn unknown_badge_fails_submission() {
        let engine = engine();
        let result = engine.submit_claim(
            student("s1"),
            BadgeId::new("nonexistent"),
            None,
            "evidence",
            ClaimSource::Manual,
        );
        assert!(matches!(result, Err(VerifyError::BadgeNotFound(_))));
    }

    #[test]
    fn inactive_badge_fails_submission() {
        let engine = engine();
        let result = engine.submit_claim(
            student("s1"),
            BadgeId::new("retired"),
            None,
            "evidence",
            ClaimSource::Manual,
        );
        assert!(matches!(result, Err(VerifyError::BadgeInactive(_))));
    }

    #[test]
    fn badge_outside_event_assignable_set_fails() {
        let engine = engine();
        let result = engine.submit_claim(
            student("s1"),
            BadgeId::new("early-bird"),
            Some(EventId::new("hackx")),
            "evidence",
            ClaimSource::Manual,
        );
        assert!(matches!(
            result,
            Err(VerifyError::BadgeNotAssignedToEvent { .. })
        ));
    }

    #[test]
    fn unknown_event_fails_submission() {
        let engine = engine();
        let result = engine.submit_claim(
            student("s1"),
            BadgeId::new("early-bird"),
            Some(EventId::new("nonexistent")),
            "evidence",
            ClaimSource::Manual,
        );
        assert!(matches!(result, Err(VerifyError::EventNotFound(_))));
    }

    #[test]
    fn empty_evidence_fails_submission() {
        let engine = engine();
        let result = engine.submit_claim(
            student("s1"),
            BadgeId::new("early-bird"),
            Some(EventId::new("orientation")),
            "   ",
            ClaimSource::Manual,
        );
        assert!(matches!(result, Err(VerifyError::MissingEvidence)));
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn duplicate_pending_triple_fails_second_submission() {
        let engine = engine();
        submit_hackx_claim(&engine, "s1");
        let result = engine.submit_claim(
            student("s1"),
            BadgeId::new("hackathon-participant"),
            Some(EventId::new("hackx")),
            "resubmitted",
            ClaimSource::Manual,
        );
        assert!(matches!(result, Err(VerifyError::DuplicateClaim(_))));
    }

    #[test]
    fn scanned_code_is_idempotent_while_outstanding() {
        let engine = engine();
        engine
            .submit_claim(
                student("s1"),
                BadgeId::new("early-bird"),
                Some(EventId::new("orientation")),
                "scanned at entry",
                ClaimSource::ScannedCode("QR-42".into()),
            )
            .unwrap();

        let replay = engine.submit_claim(
            student("s2"),
            BadgeId::new("early-bird"),
            Some(EventId::new("orientation")),
            "scanned at entry",
            ClaimSource::ScannedCode("QR-42".into()),
        );
        assert!(matches!(replay, Err(VerifyError::DuplicateClaim(_))));
    }

    #[test]
    fn rejected_scanned_code_is_replayable() {
        let engine = engine();
        let id = engine
            .submit_claim(
                student("s1"),
                BadgeId::new("early-bird"),
                Some(EventId::new("orientation")),
                "scanned at entry",
                ClaimSource::ScannedCode("QR-42".into()),
            )
            .unwrap();
        engine
            .decide_claim(
                &UserId::new("lecturer1"),
                &id,
                Decision::Reject {
                    reason: "wrong event".into(),
                },
            )
            .unwrap();

        engine
            .submit_claim(
                student("s1"),
                BadgeId::new("early-bird"),
                Some(EventId::new("orientation")),
                "rescanned",
                ClaimSource::ScannedCode("QR-42".into()),
            )
            .unwrap();
    }

    #[test]
    fn catalog_outage_applies_nothing() {
        let engine = engine();
        engine.catalog().set_unavailable(true);
        let result = engine.submit_claim(
            student("s1"),
            BadgeId::new("early-bird"),
            None,
            "evidence",
            ClaimSource::Manual,
        );
        assert_eq!(result.unwrap_err().kind(), ErrorKind::Dependency);
        let pending: Vec<_> = engine
            .store()
            .list_claims(ClaimStatus::Pending)
            .unwrap();
        assert!(pending.is_empty());
    }

    // ── Decision ────────────────────────────────────────────────────────

    #[test]
    fn approval_awards_and_writes_one_achievement() {
        let engine = engine();
        let id = submit_hackx_claim(&engine, "s1");
        let authority = UserId::new("lecturer1");

        let decided = engine
            .decide_claim(&authority, &id, Decision::Approve)
            .unwrap();
        assert_eq!(decided.status, ClaimStatus::Awarded);
        assert_eq!(decided.decided_by, Some(authority.clone()));

        let achievement = engine
            .store()
            .achievement_for_claim(&id)
            .unwrap()
            .expect("achievement written");
        assert_eq!(achievement.badge.points, 10);
        assert_eq!(achievement.badge.name, "Hackathon Participant");
        assert_eq!(achievement.source_claim_id, id);
        assert_eq!(achievement.awarded_by, authority);
        assert_eq!(engine.store().achievement_count().unwrap(), 1);
    }

    #[test]
    fn second_approval_fails_already_decided() {
        let engine = engine();
        let id = submit_hackx_claim(&engine, "s1");
        let authority = UserId::new("lecturer1");

        engine
            .decide_claim(&authority, &id, Decision::Approve)
            .unwrap();
        let again = engine.decide_claim(&authority, &id, Decision::Approve);
        assert!(matches!(again, Err(VerifyError::AlreadyDecided(_))));
        assert_eq!(engine.store().achievement_count().unwrap(), 1);
    }

    #[test]
    fn rejection_records_reason_and_writes_no_achievement() {
        let engine = engine();
        let id = submit_hackx_claim(&engine, "s1");

        let decided = engine
            .decide_claim(
                &UserId::new("lecturer1"),
                &id,
                Decision::Reject {
                    reason: "certificate illegible".into(),
                },
            )
            .unwrap();
        assert_eq!(decided.status, ClaimStatus::Rejected);
        assert_eq!(
            decided.rejection_reason.as_deref(),
            Some("certificate illegible")
        );
        assert_eq!(engine.store().achievement_count().unwrap(), 0);

        let again = engine.decide_claim(&UserId::new("lecturer2"), &id, Decision::Approve);
        assert!(matches!(again, Err(VerifyError::AlreadyDecided(_))));
    }

    #[test]
    fn decision_stamps_decided_fields_once() {
        let engine = engine();
        let id = submit_hackx_claim(&engine, "s1");
        engine.clock().advance(500);

        let decided = engine
            .decide_claim(&UserId::new("lecturer1"), &id, Decision::Approve)
            .unwrap();
        assert_eq!(decided.submitted_at.as_secs(), 1_000);
        assert_eq!(decided.decided_at.unwrap().as_secs(), 1_500);
    }

    #[test]
    fn deciding_unknown_claim_fails() {
        let engine = engine();
        let result = engine.decide_claim(
            &UserId::new("lecturer1"),
            &ClaimId::new("ghost"),
            Decision::Approve,
        );
        assert!(matches!(result, Err(VerifyError::ClaimNotFound(_))));
    }

    #[test]
    fn concurrent_decisions_have_one_winner() {
        let engine = Arc::new(engine());
        let id = submit_hackx_claim(&engine, "s1");

        let mut handles = Vec::new();
        for i in 0..8 {
            let engine = Arc::clone(&engine);
            let id = id.clone();
            handles.push(std::thread::spawn(move || {
                let decision = if i % 2 == 0 {
                    Decision::Approve
                } else {
                    Decision::Reject {
                        reason: "race".into(),
                    }
                };
                engine
                    .decide_claim(&UserId::new(format!("authority{i}")), &id, decision)
                    .is_ok()
            }));
        }

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);

        let claim = engine.store().get_claim(&id).unwrap();
        match claim.status {
            ClaimStatus::Awarded => {
                assert_eq!(engine.store().achievement_count().unwrap(), 1)
            }
            ClaimStatus::Rejected => {
                assert_eq!(engine.store().achievement_count().unwrap(), 0)
            }
            ClaimStatus::Pending => panic!("claim must reach a terminal state"),
        }
    }

    // ── Direct assignment ───────────────────────────────────────────────

    #[test]
    fn direct_assignment_is_awarded_in_one_step() {
        let engine = engine();
        let award = engine
            .assign_badge(
                &UserId::new("admin1"),
                student("S12345"),
                BadgeId::new("early-bird"),
                None,
                "manual correction",
            )
            .unwrap();

        assert_eq!(award.claim.status, ClaimStatus::Awarded);
        assert_eq!(award.claim.method, ClaimMethod::DirectAssignment);
        assert_eq!(award.claim.evidence, "manual correction");
        assert_eq!(award.claim.submitted_at, award.claim.decided_at.unwrap());
        assert_eq!(award.achievement.source_claim_id, award.claim.id);
        assert_eq!(award.achievement.badge.points, 5);

        let stored = engine
            .store()
            .achievement_for_claim(&award.claim.id)
            .unwrap();
        assert_eq!(stored, Some(award.achievement));
    }

    #[test]
    fn direct_assignment_requires_reason() {
        let engine = engine();
        let result = engine.assign_badge(
            &UserId::new("admin1"),
            student("S12345"),
            BadgeId::new("early-bird"),
            None,
            "",
        );
        assert!(matches!(result, Err(VerifyError::MissingEvidence)));
    }

    #[test]
    fn direct_assignment_validates_event_set() {
        let engine = engine();
        let result = engine.assign_badge(
            &UserId::new("admin1"),
            student("S12345"),
            BadgeId::new("early-bird"),
            Some(EventId::new("hackx")),
            "showed up first",
        );
        assert!(matches!(
            result,
            Err(VerifyError::BadgeNotAssignedToEvent { .. })
        ));
    }

    // ── Deletion safety ─────────────────────────────────────────────────

    #[test]
    fn usage_check_reports_events_and_claims() {
        let engine = engine();
        let usage = engine
            .check_badge_usage(&BadgeId::new("hackathon-participant"))
            .unwrap();
        assert!(usage.in_use_by_events);
        assert!(!usage.has_claims);

        submit_hackx_claim(&engine, "s1");
        let usage = engine
            .check_badge_usage(&BadgeId::new("hackathon-participant"))
            .unwrap();
        assert!(usage.has_claims);

        let usage = engine.check_badge_usage(&BadgeId::new("retired")).unwrap();
        assert!(!usage.in_use_by_events);
        assert!(!usage.has_claims);
    }

    #[test]
    fn deleting_badge_leaves_achievement_snapshot_intact() {
        let engine = engine();
        let id = submit_hackx_claim(&engine, "s1");
        engine
            .decide_claim(&UserId::new("lecturer1"), &id, Decision::Approve)
            .unwrap();

        // Catalog force-deletes the definition.
        engine.catalog().remove(&BadgeId::new("hackathon-participant"));

        let achievement = engine.store().achievement_for_claim(&id).unwrap().unwrap();
        assert_eq!(achievement.badge.name, "Hackathon Participant");
        assert_eq!(achievement.badge.points, 10);
        assert_eq!(achievement.badge.icon, "hackathon-participant.png");
    }

    #[test]
    fn approving_claim_for_deleted_badge_fails_without_award() {
        let engine = engine();
        let id = submit_hackx_claim(&engine, "s1");
        engine.catalog().remove(&BadgeId::new("hackathon-participant"));

        let result = engine.decide_claim(&UserId::new("lecturer1"), &id, Decision::Approve);
        assert!(matches!(result, Err(VerifyError::BadgeNotFound(_))));
        assert_eq!(engine.store().achievement_count().unwrap(), 0);
        assert!(engine.store().get_claim(&id).unwrap().is_pending());
    }

    // ── Queue listing ───────────────────────────────────────────────────

    #[test]
    fn queue_lists_most_recent_first() {
        let engine = engine();
        let first = submit_hackx_claim(&engine, "s1");
        engine.clock().advance(10);
        let second = engine
            .submit_claim(
                student("s2"),
                BadgeId::new("early-bird"),
                Some(EventId::new("orientation")),
                "front row",
                ClaimSource::Manual,
            )
            .unwrap();

        let queue: Vec<Claim> = engine.list_pending_claims(&ClaimFilter::all()).unwrap().collect();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0].id, second);
        assert_eq!(queue[1].id, first);
    }

    #[test]
    fn queue_filters_by_event_and_category() {
        let engine = engine();
        let hackx = submit_hackx_claim(&engine, "s1");
        let orientation = engine
            .submit_claim(
                student("s2"),
                BadgeId::new("early-bird"),
                Some(EventId::new("orientation")),
                "front row",
                ClaimSource::Manual,
            )
            .unwrap();

        let by_event: Vec<Claim> = engine
            .list_pending_claims(&ClaimFilter::all().for_event(EventId::new("hackx")))
            .unwrap()
            .collect();
        assert_eq!(by_event.len(), 1);
        assert_eq!(by_event[0].id, hackx);

        let by_category: Vec<Claim> = engine
            .list_pending_claims(&ClaimFilter::all().in_category("participation"))
            .unwrap()
            .collect();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].id, orientation);
    }

    #[test]
    fn queue_excludes_decided_claims() {
        let engine = engine();
        let id = submit_hackx_claim(&engine, "s1");
        engine
            .decide_claim(&UserId::new("lecturer1"), &id, Decision::Approve)
            .unwrap();

        let queue: Vec<Claim> = engine.list_pending_claims(&ClaimFilter::all()).unwrap().collect();
        assert!(queue.is_empty());
    }

    #[test]
    fn category_filter_skips_unresolvable_badges() {
        let engine = engine();
        submit_hackx_claim(&engine, "s1");
        engine.catalog().remove(&BadgeId::new("hackathon-participant"));

        let queue: Vec<Claim> = engine
            .list_pending_claims(&ClaimFilter::all().in_category("competition"))
            .unwrap()
            .collect();
        assert!(queue.is_empty());

        // Unfiltered listing still shows the claim.
        let queue: Vec<Claim> = engine.list_pending_claims(&ClaimFilter::all()).unwrap().collect();
        assert_eq!(queue.len(), 1);
    }

    // ── Notifications ───────────────────────────────────────────────────

    #[test]
    fn decisions_notify_the_claimant() {
        let engine = engine();
        let approved = submit_hackx_claim(&engine, "s1");
        engine
            .decide_claim(&UserId::new("lecturer1"), &approved, Decision::Approve)
            .unwrap();

        let rejected = engine
            .submit_claim(
                student("s2"),
                BadgeId::new("early-bird"),
                Some(EventId::new("orientation")),
                "front row",
                ClaimSource::Manual,
            )
            .unwrap();
        engine
            .decide_claim(
                &UserId::new("lecturer1"),
                &rejected,
                Decision::Reject {
                    reason: "late arrival".into(),
                },
            )
            .unwrap();

        let sent = engine.dispatcher().sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].user, UserId::new("s1"));
        assert_eq!(sent[0].kind, NotificationKind::Success);
        assert_eq!(sent[1].user, UserId::new("s2"));
        assert_eq!(sent[1].kind, NotificationKind::Failure);
        assert!(sent[1].message.contains("late arrival"));
    }

    #[test]
    fn lost_delivery_channel_does_not_fail_the_decision() {
        let (dispatcher, receiver) = ChannelDispatcher::pair();
        drop(receiver);

        let engine = VerificationEngine::new(
            MemoryStore::new(),
            NullCatalog::new(),
            NullRegistry::new(),
            dispatcher,
            NullClock::new(1_000),
        );
        engine.catalog().insert(badge(
            "early-bird",
            "Early Bird",
            5,
            "participation",
            true,
        ));

        let id = engine
            .submit_claim(
                student("s1"),
                BadgeId::new("early-bird"),
                None,
                "front row",
                ClaimSource::Manual,
            )
            .unwrap();
        let decided = engine
            .decide_claim(&UserId::new("lecturer1"), &id, Decision::Approve)
            .unwrap();
        assert_eq!(decided.status, ClaimStatus::Awarded);
    }
}
