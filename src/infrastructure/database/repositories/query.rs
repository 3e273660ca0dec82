//! SQL side of paginated listings.
//!
//! Search, sort and the page window are pushed into the database: one
//! `COUNT(*)` over the filtered rows, then `ORDER BY .. LIMIT .. OFFSET ..`
//! for the window itself. The in-memory store runs the same rules through
//! [`crate::shared::pagination::paginate`].

use sea_orm::sea_query::{Expr, Func, LikeExpr, Order, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Select};
use tracing::debug;

use crate::shared::pagination::{PageRequest, SortDirection};

/// Per-entity searchable columns and sort keys.
pub trait SqlQueryRules {
    /// Text columns matched with a case-insensitive substring test.
    fn search_columns(&self) -> Vec<SimpleExpr>;

    /// `field` is already lower-cased. Return `None` for fields that cannot
    /// be sorted on.
    fn sort_key(&self, field: &str) -> Option<SimpleExpr>;
}

/// `LOWER(expr)`.
///
/// SQLite only folds ASCII letters, so callers lower-case the other side
/// in Rust.
pub fn lower(expr: impl Into<SimpleExpr>) -> SimpleExpr {
    Func::lower(expr.into()).into()
}

/// Case-insensitive equality against `value`.
pub fn eq_ignore_case(expr: impl Into<SimpleExpr>, value: &str) -> SimpleExpr {
    Expr::expr(lower(expr)).eq(value.to_lowercase())
}

/// Escape character for `LIKE` patterns; needs no quoting in any backend.
const LIKE_ESCAPE: char = '!';

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Restrict `query` to rows where any searchable column contains the
/// request's search term.
pub fn apply_search<E, R>(query: Select<E>, rules: &R, request: &PageRequest) -> Select<E>
where
    E: EntityTrait,
    R: SqlQueryRules + ?Sized,
{
    let Some(term) = request.search_term() else {
        return query;
    };
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    let condition = rules
        .search_columns()
        .into_iter()
        .fold(Condition::any(), |any, column| {
            any.add(Expr::expr(lower(column)).like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)))
        });
    query.filter(condition)
}

/// Order by the requested field, then by `tie_break` ascending.
///
/// Unknown fields leave only the tie-break, which is the default order.
pub fn apply_sort<E, R, C>(query: Select<E>, rules: &R, request: &PageRequest, tie_break: C) -> Select<E>
where
    E: EntityTrait,
    R: SqlQueryRules + ?Sized,
    C: ColumnTrait,
{
    let query = match request.sort_by() {
        Some(field) => match rules.sort_key(&field.to_lowercase()) {
            Some(key) => {
                let order = match request.sort_direction() {
                    SortDirection::Asc => Order::Asc,
                    SortDirection::Desc => Order::Desc,
                };
                query.order_by(key, order)
            }
            None => {
                debug!(field, "Unknown sort field, keeping default order");
                query
            }
        },
        None => query,
    };
    query.order_by_asc(tie_break)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    use crate::infrastructure::database::entities::branch;

    struct NameOnly;

    impl SqlQueryRules for NameOnly {
        fn search_columns(&self) -> Vec<SimpleExpr> {
            vec![Expr::col((branch::Entity, branch::Column::Name)).into()]
        }

        fn sort_key(&self, field: &str) -> Option<SimpleExpr> {
            (field == "name").then(|| lower(Expr::col((branch::Entity, branch::Column::Name))))
        }
    }

    fn sql(query: Select<branch::Entity>) -> String {
        query.build(DbBackend::Sqlite).to_string()
    }

    #[test]
    fn like_wildcards_in_the_term_are_escaped() {
        assert_eq!(escape_like("50%_off!"), "50!%!_off!!");

        let request = PageRequest::default().with_search(Some("50% OFF".into()));
        let stmt = sql(apply_search(branch::Entity::find(), &NameOnly, &request));
        assert!(stmt.contains("LOWER("), "{stmt}");
        assert!(stmt.contains("LIKE"), "{stmt}");
        assert!(stmt.contains("ESCAPE"), "{stmt}");
    }

    #[test]
    fn sort_falls_back_to_the_tie_break() {
        let request = PageRequest::default().with_sort(Some("Name".into()), SortDirection::Desc);
        let stmt = sql(apply_sort(branch::Entity::find(), &NameOnly, &request, branch::Column::Id));
        assert!(stmt.contains("ORDER BY LOWER("), "{stmt}");
        assert!(stmt.contains("DESC"), "{stmt}");
        assert!(stmt.ends_with("\"id\" ASC"), "{stmt}");

        let request = PageRequest::default().with_sort(Some("colour".into()), SortDirection::Desc);
        let stmt = sql(apply_sort(branch::Entity::find(), &NameOnly, &request, branch::Column::Id));
        assert!(!stmt.contains("DESC"), "{stmt}");
        assert!(stmt.ends_with("\"id\" ASC"), "{stmt}");
    }
}
