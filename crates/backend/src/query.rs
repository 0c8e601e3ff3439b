//! Query descriptors and their rendering into the store's wire grammar.
//!
//! The hosted service filters rows with `column=eq.value` parameters,
//! OR-composition via `or=(a.eq.x,b.eq.y)`, and embedded-relation filters via
//! `relation.column=eq.value` plus an `!inner` select. The deny-all filter
//! renders as `id=eq.null`, which matches zero rows.

use campana_auth::ScopeFilter;

/// Sort direction for an ordered query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// A composed collection query: the viewer's scope filter plus any extra
/// equality predicates, ordering, and limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub filter: ScopeFilter,
    pub eq: Vec<(&'static str, String)>,
    pub order: Option<(&'static str, Direction)>,
    pub limit: Option<usize>,
}

impl Query {
    /// A query constrained only by the viewer's scope filter.
    pub fn scoped(filter: ScopeFilter) -> Self {
        Self {
            filter,
            eq: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// An unconstrained query (internal lookups that bypass viewer scoping,
    /// e.g. profile resolution during login).
    pub fn unscoped() -> Self {
        Self::scoped(ScopeFilter::All)
    }

    pub fn and_eq(mut self, column: &'static str, value: impl Into<String>) -> Self {
        self.eq.push((column, value.into()));
        self
    }

    pub fn order_desc(mut self, column: &'static str) -> Self {
        self.order = Some((column, Direction::Desc));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Render into the service's query-string pairs.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), select_clause(&self.filter))];

        match &self.filter {
            ScopeFilter::All => {}
            ScopeFilter::Eq { column, value } => {
                params.push((column.to_string(), format!("eq.{value}")));
            }
            ScopeFilter::AnyOf(_) => {
                let expr = self
                    .filter
                    .or_expression()
                    .unwrap_or_default();
                params.push(("or".to_string(), format!("({expr})")));
            }
            ScopeFilter::RelatedEq {
                relation,
                column,
                value,
            } => {
                params.push((format!("{relation}.{column}"), format!("eq.{value}")));
            }
            ScopeFilter::DenyAll => {
                params.push(("id".to_string(), "eq.null".to_string()));
            }
        }

        for (column, value) in &self.eq {
            params.push((column.to_string(), format!("eq.{value}")));
        }

        if let Some((column, direction)) = self.order {
            let dir = match direction {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            params.push(("order".to_string(), format!("{column}.{dir}")));
        }

        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        params
    }
}

/// Relations the filter grammar may embed: (relation name, source table, FK
/// column on the filtered row).
pub(crate) const RELATIONS: &[(&str, &str, &str)] =
    &[("territory", "territories", "territory_id")];

pub(crate) fn relation_source(relation: &str) -> Option<(&'static str, &'static str)> {
    RELATIONS
        .iter()
        .find(|(name, _, _)| *name == relation)
        .map(|(_, table, fk)| (*table, *fk))
}

fn select_clause(filter: &ScopeFilter) -> String {
    match filter {
        ScopeFilter::RelatedEq {
            relation, column, ..
        } => match relation_source(relation) {
            Some((table, _)) => format!("*,{relation}:{table}!inner({column})"),
            None => "*".to_string(),
        },
        _ => "*".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eq_filter_renders_as_an_equality_param() {
        let query = Query::scoped(ScopeFilter::eq("affected_user_id", "V1"));
        let params = query.to_params();
        assert!(params.contains(&("affected_user_id".to_string(), "eq.V1".to_string())));
    }

    #[test]
    fn any_of_filter_renders_as_an_or_param() {
        let filter = ScopeFilter::AnyOf(vec![
            ("created_by", "C1".to_string()),
            ("affected_user_id", "C1".to_string()),
        ]);
        let params = Query::scoped(filter).to_params();
        assert!(params.contains(&(
            "or".to_string(),
            "(created_by.eq.C1,affected_user_id.eq.C1)".to_string()
        )));
    }

    #[test]
    fn deny_all_renders_as_the_impossible_predicate() {
        let params = Query::scoped(ScopeFilter::DenyAll).to_params();
        assert!(params.contains(&("id".to_string(), "eq.null".to_string())));
    }

    #[test]
    fn related_filter_embeds_the_relation() {
        let filter = ScopeFilter::RelatedEq {
            relation: "territory",
            column: "responsible_user_id",
            value: "C1".to_string(),
        };
        let params = Query::scoped(filter).to_params();
        assert!(params.contains(&(
            "select".to_string(),
            "*,territory:territories!inner(responsible_user_id)".to_string()
        )));
        assert!(params.contains(&(
            "territory.responsible_user_id".to_string(),
            "eq.C1".to_string()
        )));
    }

    #[test]
    fn order_and_limit_render_after_predicates() {
        let params = Query::unscoped()
            .and_eq("id", "X")
            .order_desc("created_at")
            .limit(10)
            .to_params();
        assert!(params.contains(&("order".to_string(), "created_at.desc".to_string())));
        assert!(params.contains(&("limit".to_string(), "10".to_string())));
        assert!(params.contains(&("id".to_string(), "eq.X".to_string())));
    }
}
