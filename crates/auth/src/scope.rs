//! Data-scope resolution: which records of a collection a viewer may see.
//!
//! `scope_filter` is the single source of truth for row visibility. It is a
//! deterministic function of (collection, role, viewer id) and returns a
//! filter *descriptor*; rendering the descriptor into the backend's query
//! grammar happens at the storage boundary.
//!
//! Any role without an explicit branch resolves to [`ScopeFilter::DenyAll`],
//! as does a missing viewer. Fail closed, always.

use crate::Viewer;
use crate::role::Role;

/// The record collections that are scoped per viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Territory,
    Voter,
    Alert,
    Event,
    Message,
    Task,
    Profile,
}

impl ScopeKind {
    pub const ALL: [ScopeKind; 7] = [
        ScopeKind::Territory,
        ScopeKind::Voter,
        ScopeKind::Alert,
        ScopeKind::Event,
        ScopeKind::Message,
        ScopeKind::Task,
        ScopeKind::Profile,
    ];
}

/// A pure predicate descriptor applied to a collection query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeFilter {
    /// No restriction; the viewer sees every row.
    All,
    /// A single column equality.
    Eq { column: &'static str, value: String },
    /// An OR of column equalities.
    AnyOf(Vec<(&'static str, String)>),
    /// Equality on a column of an embedded (joined) relation.
    RelatedEq {
        relation: &'static str,
        column: &'static str,
        value: String,
    },
    /// A predicate guaranteed to match zero rows.
    DenyAll,
}

impl ScopeFilter {
    pub fn eq(column: &'static str, value: impl Into<String>) -> Self {
        Self::Eq {
            column,
            value: value.into(),
        }
    }

    pub fn is_deny_all(&self) -> bool {
        matches!(self, ScopeFilter::DenyAll)
    }

    /// The comma-joined OR expression for an [`ScopeFilter::AnyOf`], in the
    /// backend's `col.eq.value` grammar. `None` for other variants.
    pub fn or_expression(&self) -> Option<String> {
        match self {
            ScopeFilter::AnyOf(arms) => Some(
                arms.iter()
                    .map(|(col, val)| format!("{col}.eq.{val}"))
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            _ => None,
        }
    }
}

/// Resolve the row filter for `kind` as seen by `viewer`.
///
/// The tables below enumerate master, candidato, and votante. Every other
/// role (desarrollador and lider included) and an absent viewer get
/// [`ScopeFilter::DenyAll`].
pub fn scope_filter(kind: ScopeKind, viewer: Option<&Viewer>) -> ScopeFilter {
    let Some(viewer) = viewer else {
        return ScopeFilter::DenyAll;
    };
    let uid = viewer.id.to_string();

    match kind {
        ScopeKind::Territory => match viewer.role {
            Role::Master => ScopeFilter::All,
            Role::Candidato => ScopeFilter::AnyOf(vec![
                ("responsible_user_id", uid.clone()),
                ("created_by", uid),
            ]),
            Role::Votante => ScopeFilter::eq("responsible_user_id", uid),
            Role::Desarrollador | Role::Lider | Role::Visitante => ScopeFilter::DenyAll,
        },
        ScopeKind::Voter => match viewer.role {
            Role::Master => ScopeFilter::All,
            Role::Candidato => ScopeFilter::RelatedEq {
                relation: "territory",
                column: "responsible_user_id",
                value: uid,
            },
            Role::Votante => ScopeFilter::eq("registered_by", uid),
            Role::Desarrollador | Role::Lider | Role::Visitante => ScopeFilter::DenyAll,
        },
        ScopeKind::Alert => match viewer.role {
            Role::Master => ScopeFilter::All,
            Role::Candidato => ScopeFilter::AnyOf(vec![
                ("created_by", uid.clone()),
                ("affected_user_id", uid),
            ]),
            Role::Votante => ScopeFilter::eq("affected_user_id", uid),
            Role::Desarrollador | Role::Lider | Role::Visitante => ScopeFilter::DenyAll,
        },
        ScopeKind::Event => match viewer.role {
            Role::Master => ScopeFilter::All,
            Role::Candidato => ScopeFilter::AnyOf(vec![
                ("responsible_user_id", uid.clone()),
                ("created_by", uid),
            ]),
            Role::Desarrollador | Role::Lider | Role::Votante | Role::Visitante => {
                ScopeFilter::DenyAll
            }
        },
        ScopeKind::Message => match viewer.role {
            Role::Master => ScopeFilter::All,
            Role::Candidato => ScopeFilter::eq("created_by", uid),
            Role::Desarrollador | Role::Lider | Role::Votante | Role::Visitante => {
                ScopeFilter::DenyAll
            }
        },
        ScopeKind::Task => match viewer.role {
            Role::Master => ScopeFilter::All,
            Role::Candidato => ScopeFilter::AnyOf(vec![
                ("assigned_by", uid.clone()),
                ("assigned_to", uid),
            ]),
            Role::Votante => ScopeFilter::eq("assigned_to", uid),
            Role::Desarrollador | Role::Lider | Role::Visitante => ScopeFilter::DenyAll,
        },
        ScopeKind::Profile => match viewer.role {
            Role::Master => ScopeFilter::All,
            Role::Candidato => ScopeFilter::eq("created_by", uid),
            Role::Desarrollador | Role::Lider | Role::Votante | Role::Visitante => {
                ScopeFilter::DenyAll
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use campana_core::ProfileId;
    use proptest::prelude::*;

    use super::*;

    fn viewer(role: Role) -> Viewer {
        Viewer::new(ProfileId::new(), role)
    }

    #[test]
    fn master_sees_everything() {
        let v = viewer(Role::Master);
        for kind in ScopeKind::ALL {
            assert_eq!(scope_filter(kind, Some(&v)), ScopeFilter::All);
        }
    }

    #[test]
    fn missing_viewer_is_denied_everywhere() {
        for kind in ScopeKind::ALL {
            assert!(scope_filter(kind, None).is_deny_all());
        }
    }

    #[test]
    fn votante_alert_scope_is_affected_user() {
        let v = viewer(Role::Votante);
        let expected = ScopeFilter::eq("affected_user_id", v.id.to_string());
        assert_eq!(scope_filter(ScopeKind::Alert, Some(&v)), expected);
    }

    #[test]
    fn candidato_alert_scope_is_creator_or_affected() {
        let v = viewer(Role::Candidato);
        let uid = v.id.to_string();

        let filter = scope_filter(ScopeKind::Alert, Some(&v));
        assert_eq!(
            filter.or_expression().unwrap(),
            format!("created_by.eq.{uid},affected_user_id.eq.{uid}")
        );
    }

    #[test]
    fn candidato_voter_scope_follows_territory_responsibility() {
        let v = viewer(Role::Candidato);
        let filter = scope_filter(ScopeKind::Voter, Some(&v));
        assert_eq!(
            filter,
            ScopeFilter::RelatedEq {
                relation: "territory",
                column: "responsible_user_id",
                value: v.id.to_string(),
            }
        );
    }

    #[test]
    fn votante_territory_scope_is_responsibility() {
        let v = viewer(Role::Votante);
        assert_eq!(
            scope_filter(ScopeKind::Territory, Some(&v)),
            ScopeFilter::eq("responsible_user_id", v.id.to_string())
        );
    }

    #[test]
    fn unlisted_roles_are_denied() {
        for role in [Role::Desarrollador, Role::Lider, Role::Visitante] {
            let v = viewer(role);
            for kind in ScopeKind::ALL {
                assert!(
                    scope_filter(kind, Some(&v)).is_deny_all(),
                    "{role} should be denied for {kind:?}"
                );
            }
        }
    }

    proptest! {
        /// Every (role, kind) pair resolves to either an explicit branch or
        /// deny-all; no viewer ever falls through to an open filter except
        /// master.
        #[test]
        fn only_master_gets_the_open_filter(role_idx in 0usize..6, kind_idx in 0usize..7) {
            let role = Role::ALL[role_idx];
            let kind = ScopeKind::ALL[kind_idx];
            let v = viewer(role);

            let filter = scope_filter(kind, Some(&v));
            if filter == ScopeFilter::All {
                prop_assert_eq!(role, Role::Master);
            }
        }

        /// Scoped filters always pin to the viewer's own id.
        #[test]
        fn scoped_filters_reference_the_viewer(role_idx in 0usize..6, kind_idx in 0usize..7) {
            let role = Role::ALL[role_idx];
            let kind = ScopeKind::ALL[kind_idx];
            let v = viewer(role);
            let uid = v.id.to_string();

            match scope_filter(kind, Some(&v)) {
                ScopeFilter::Eq { value, .. } => prop_assert_eq!(value, uid),
                ScopeFilter::AnyOf(arms) => {
                    for (_, value) in arms {
                        prop_assert_eq!(&value, &uid);
                    }
                }
                ScopeFilter::RelatedEq { value, .. } => prop_assert_eq!(value, uid),
                ScopeFilter::All | ScopeFilter::DenyAll => {}
            }
        }
    }
}
