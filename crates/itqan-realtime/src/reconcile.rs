//! Subscriber-side access reconciliation.
//!
//! The hint channel offers no delivery guarantee, so a client holds a
//! small state machine per course: hints apply optimistic grant/revoke,
//! and a fresh authoritative read of the enrollments table always
//! overrides whatever hints said before it. A revocation naming the
//! course currently being viewed forces an immediate exit from that
//! viewing session — a client must never stay mid-playback of content it
//! no longer has rights to.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use itqan_core::events::EnrollmentEvent;

/// Where an access observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessSource {
    /// A best-effort hint event.
    Hint,
    /// A fresh read of the enrollments table.
    Authoritative,
}

/// Per-course access state as observed by the client.
#[derive(Debug, Clone, Copy)]
struct CourseAccess {
    granted: bool,
    source: AccessSource,
    observed_at: DateTime<Utc>,
}

/// Outcome of applying a hint event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOutcome {
    /// Access was optimistically granted.
    Granted {
        /// The unlocked course.
        course_id: Uuid,
    },
    /// Access was optimistically revoked.
    Revoked {
        /// The locked course.
        course_id: Uuid,
        /// Whether the client must exit an active viewing session now.
        force_exit: bool,
    },
}

/// Client-side reconciler between hint events and authoritative reads.
#[derive(Debug)]
pub struct AccessReconciler {
    /// The user this client session belongs to.
    user_id: Uuid,
    /// Per-course observed state.
    courses: HashMap<Uuid, CourseAccess>,
    /// The course currently open in an active viewing session, if any.
    viewing: Option<Uuid>,
}

impl AccessReconciler {
    /// Creates a reconciler for the given user.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            courses: HashMap::new(),
            viewing: None,
        }
    }

    /// Marks a course as currently being viewed.
    pub fn begin_viewing(&mut self, course_id: Uuid) {
        self.viewing = Some(course_id);
    }

    /// Clears the active viewing session.
    pub fn end_viewing(&mut self) {
        self.viewing = None;
    }

    /// The course currently being viewed, if any.
    pub fn viewing(&self) -> Option<Uuid> {
        self.viewing
    }

    /// Applies a hint event.
    ///
    /// Events addressed to other users are ignored and return `None`.
    /// A matching approval grants access optimistically without waiting
    /// for a re-fetch; a matching cancellation revokes it, and forces an
    /// exit when it names the course currently being viewed.
    pub fn apply_hint(&mut self, event: &EnrollmentEvent) -> Option<HintOutcome> {
        if event.user_id() != self.user_id {
            return None;
        }

        let course_id = event.course_id();
        let granted = !event.is_revocation();
        self.courses.insert(
            course_id,
            CourseAccess {
                granted,
                source: AccessSource::Hint,
                observed_at: Utc::now(),
            },
        );

        if granted {
            Some(HintOutcome::Granted { course_id })
        } else {
            let force_exit = self.viewing == Some(course_id);
            if force_exit {
                self.viewing = None;
            }
            Some(HintOutcome::Revoked {
                course_id,
                force_exit,
            })
        }
    }

    /// Applies a fresh authoritative read of the enrollment table.
    ///
    /// The full set of enrolled course IDs replaces every hint-derived
    /// observation — last authoritative read wins, regardless of what
    /// hints arrived before it or in what order. Returns the course the
    /// client must exit, if the read revoked the one being viewed.
    pub fn apply_authoritative(&mut self, enrolled: &HashSet<Uuid>) -> Option<Uuid> {
        let now = Utc::now();
        let known: Vec<Uuid> = self
            .courses
            .keys()
            .copied()
            .chain(enrolled.iter().copied())
            .collect();

        for course_id in known {
            self.courses.insert(
                course_id,
                CourseAccess {
                    granted: enrolled.contains(&course_id),
                    source: AccessSource::Authoritative,
                    observed_at: now,
                },
            );
        }

        match self.viewing {
            Some(course_id) if !enrolled.contains(&course_id) => {
                self.viewing = None;
                Some(course_id)
            }
            _ => None,
        }
    }

    /// Whether this client currently believes it has access to a course.
    pub fn has_access(&self, course_id: Uuid) -> bool {
        self.courses
            .get(&course_id)
            .map(|state| state.granted)
            .unwrap_or(false)
    }

    /// The source of the current belief about a course, if any.
    pub fn access_source(&self, course_id: Uuid) -> Option<AccessSource> {
        self.courses.get(&course_id).map(|state| state.source)
    }

    /// When the current belief about a course was last observed.
    pub fn observed_at(&self, course_id: Uuid) -> Option<DateTime<Utc>> {
        self.courses.get(&course_id).map(|state| state.observed_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approved(user_id: Uuid, course_id: Uuid) -> EnrollmentEvent {
        EnrollmentEvent::EnrollmentApproved {
            user_id,
            course_id,
            course_name: "Database Architecture".to_string(),
            timestamp: Utc::now(),
        }
    }

    fn cancelled(user_id: Uuid, course_id: Uuid) -> EnrollmentEvent {
        EnrollmentEvent::EnrollmentCancelled {
            user_id,
            course_id,
            course_name: "Database Architecture".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_ignores_other_users_events() {
        let user = Uuid::new_v4();
        let course = Uuid::new_v4();
        let mut reconciler = AccessReconciler::new(user);

        assert_eq!(reconciler.apply_hint(&approved(Uuid::new_v4(), course)), None);
        assert!(!reconciler.has_access(course));
    }

    #[test]
    fn test_optimistic_grant_and_revoke() {
        let user = Uuid::new_v4();
        let course = Uuid::new_v4();
        let mut reconciler = AccessReconciler::new(user);

        assert_eq!(
            reconciler.apply_hint(&approved(user, course)),
            Some(HintOutcome::Granted { course_id: course })
        );
        assert!(reconciler.has_access(course));

        assert_eq!(
            reconciler.apply_hint(&cancelled(user, course)),
            Some(HintOutcome::Revoked {
                course_id: course,
                force_exit: false
            })
        );
        assert!(!reconciler.has_access(course));
    }

    #[test]
    fn test_revocation_while_viewing_forces_exit() {
        let user = Uuid::new_v4();
        let course = Uuid::new_v4();
        let mut reconciler = AccessReconciler::new(user);

        reconciler.apply_hint(&approved(user, course));
        reconciler.begin_viewing(course);

        let outcome = reconciler.apply_hint(&cancelled(user, course));
        assert_eq!(
            outcome,
            Some(HintOutcome::Revoked {
                course_id: course,
                force_exit: true
            })
        );
        assert_eq!(reconciler.viewing(), None);
    }

    #[test]
    fn test_fresh_read_wins_over_stale_hint() {
        let user = Uuid::new_v4();
        let course = Uuid::new_v4();
        let mut reconciler = AccessReconciler::new(user);

        // Stale cancellation hint arrives, then the authoritative read
        // still shows the enrollment present: access must be granted.
        reconciler.apply_hint(&cancelled(user, course));
        assert!(!reconciler.has_access(course));

        let enrolled: HashSet<Uuid> = [course].into_iter().collect();
        assert_eq!(reconciler.apply_authoritative(&enrolled), None);

        assert!(reconciler.has_access(course));
        assert_eq!(
            reconciler.access_source(course),
            Some(AccessSource::Authoritative)
        );
    }

    #[test]
    fn test_authoritative_revoke_while_viewing_forces_exit() {
        let user = Uuid::new_v4();
        let course = Uuid::new_v4();
        let mut reconciler = AccessReconciler::new(user);

        reconciler.apply_hint(&approved(user, course));
        reconciler.begin_viewing(course);

        let must_exit = reconciler.apply_authoritative(&HashSet::new());
        assert_eq!(must_exit, Some(course));
        assert!(!reconciler.has_access(course));
        assert_eq!(reconciler.viewing(), None);
    }

    #[test]
    fn test_authoritative_read_clears_unlisted_hints() {
        let user = Uuid::new_v4();
        let kept = Uuid::new_v4();
        let dropped = Uuid::new_v4();
        let mut reconciler = AccessReconciler::new(user);

        reconciler.apply_hint(&approved(user, kept));
        reconciler.apply_hint(&approved(user, dropped));

        let enrolled: HashSet<Uuid> = [kept].into_iter().collect();
        reconciler.apply_authoritative(&enrolled);

        assert!(reconciler.has_access(kept));
        assert!(!reconciler.has_access(dropped));
    }
}
