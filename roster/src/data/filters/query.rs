//! Member query builder
//!
//! Combines a team join, a filter predicate, sort keys and an optional page
//! into a SELECT over `member m` (and `team t`). The builder only produces SQL
//! and parameters; repositories execute it.

use super::error::FilterError;
use super::order::{OrderSpec, Page};
use super::predicate::{Field, Predicate, Source, Value};
use super::sql::SqlParams;
use crate::data::sql::SqlDialect;

/// How the team table is brought into the query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TeamJoin {
    /// Member table only
    #[default]
    None,
    /// Members that have a team
    Inner,
    /// Every member, team columns NULL when absent
    Left,
    /// Every member; team columns filled only when the ON predicate also holds
    LeftOn(Predicate),
    /// Every member joined to teams by an arbitrary ON predicate (no relation)
    LeftUnrelated(Predicate),
    /// Cartesian product filtered in WHERE
    Theta,
}

impl TeamJoin {
    pub const fn is_joined(&self) -> bool {
        !matches!(self, TeamJoin::None)
    }

    fn from_clause(&self, dialect: &dyn SqlDialect, params: &mut SqlParams) -> String {
        match self {
            TeamJoin::None => "FROM member m".to_string(),
            TeamJoin::Inner => "FROM member m JOIN team t ON m.team_id = t.id".to_string(),
            TeamJoin::Left => "FROM member m LEFT JOIN team t ON m.team_id = t.id".to_string(),
            TeamJoin::LeftOn(on) => format!(
                "FROM member m LEFT JOIN team t ON m.team_id = t.id AND {}",
                on.to_sql(dialect, params)
            ),
            TeamJoin::LeftUnrelated(on) => {
                format!("FROM member m LEFT JOIN team t ON {}", on.to_sql(dialect, params))
            }
            TeamJoin::Theta => "FROM member m CROSS JOIN team t".to_string(),
        }
    }
}

/// Selected columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// `id, username, age, team_id`
    Member,
    /// Member columns followed by `team.id, team.name`
    MemberAndTeam,
    /// `username, age`
    UsernameAge,
    /// `username || '_' || age` as a single text column
    UsernameAgeLabel,
    /// `username` next to a bound constant text column
    UsernameConstant(&'static str),
}

impl Projection {
    fn columns(&self, join: &TeamJoin, dialect: &dyn SqlDialect, params: &mut SqlParams) -> String {
        match self {
            Projection::Member => "m.id, m.username, m.age, m.team_id".to_string(),
            Projection::MemberAndTeam if join.is_joined() => {
                "m.id, m.username, m.age, m.team_id, t.id, t.name".to_string()
            }
            Projection::MemberAndTeam => "m.id, m.username, m.age, m.team_id, NULL, NULL".to_string(),
            Projection::UsernameAge => "m.username, m.age".to_string(),
            Projection::UsernameAgeLabel => {
                let age = dialect.cast_to_string("m.age");
                dialect.concat(&["m.username", "'_'", &age])
            }
            Projection::UsernameConstant(constant) => format!(
                "m.username, {}",
                params.push(dialect, Value::Text(constant.to_string()))
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberQuery {
    pub join: TeamJoin,
    pub filter: Option<Predicate>,
    pub order: Vec<OrderSpec>,
    pub page: Option<Page>,
}

impl MemberQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(mut self, join: TeamJoin) -> Self {
        self.join = join;
        self
    }

    /// Add a WHERE predicate; repeated calls are ANDed
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing & predicate,
            None => predicate,
        });
        self
    }

    pub fn order_by(mut self, spec: OrderSpec) -> Self {
        self.order.push(spec);
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    /// Check predicate value kinds and that team fields have a join
    pub fn validate(&self) -> Result<(), FilterError> {
        let join_predicate = match &self.join {
            TeamJoin::LeftOn(on) | TeamJoin::LeftUnrelated(on) => Some(on),
            _ => None,
        };
        for predicate in self.filter.iter().chain(join_predicate) {
            predicate.validate()?;
        }

        if !self.join.is_joined() {
            let team_field = self
                .filter
                .iter()
                .flat_map(Predicate::fields)
                .chain(self.order.iter().map(|o| o.field))
                .find(|f| f.source() == Source::Team);
            if let Some(field) = team_field {
                return Err(FilterError::MissingJoin(field));
            }
        }
        Ok(())
    }

    /// Render the SELECT statement
    pub fn to_sql(&self, dialect: &dyn SqlDialect, projection: Projection) -> (String, SqlParams) {
        let mut params = SqlParams::default();
        // projection placeholders precede the FROM and WHERE ones
        let columns = projection.columns(&self.join, dialect, &mut params);

        let mut sql = format!(
            "SELECT {} {}",
            columns,
            self.join.from_clause(dialect, &mut params)
        );
        self.push_where(&mut sql, dialect, &mut params);

        let mut keys: Vec<String> = self.order.iter().map(|o| o.to_sql(dialect)).collect();
        // stable tie-breaker so paging is deterministic
        if !self.order.iter().any(|o| o.field == Field::MemberId) {
            keys.push("m.id ASC".to_string());
        }
        sql.push_str(" ORDER BY ");
        sql.push_str(&keys.join(", "));

        if let Some(page) = self.page {
            sql.push(' ');
            sql.push_str(&dialect.limit_offset(page.limit, page.offset));
        }

        (sql, params)
    }

    /// Render `SELECT COUNT(*)` over the same join and filter, ignoring order and page
    pub fn count_sql(&self, dialect: &dyn SqlDialect) -> (String, SqlParams) {
        let mut params = SqlParams::default();
        let mut sql = format!(
            "SELECT COUNT(*) {}",
            self.join.from_clause(dialect, &mut params)
        );
        self.push_where(&mut sql, dialect, &mut params);
        (sql, params)
    }

    fn push_where(&self, sql: &mut String, dialect: &dyn SqlDialect, params: &mut SqlParams) {
        match &self.filter {
            None | Some(Predicate::True) => {}
            Some(predicate) => {
                sql.push_str(" WHERE ");
                sql.push_str(&predicate.to_sql(dialect, params));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::predicate::Value;
    use crate::data::sql::SqliteDialect;

    #[test]
    fn plain_select_orders_by_id() {
        let (sql, params) = MemberQuery::new().to_sql(&SqliteDialect, Projection::Member);
        assert_eq!(
            sql,
            "SELECT m.id, m.username, m.age, m.team_id FROM member m ORDER BY m.id ASC"
        );
        assert!(params.values.is_empty());
    }

    #[test]
    fn true_filter_emits_no_where() {
        let query = MemberQuery::new().filter(Predicate::True);
        let (sql, _) = query.to_sql(&SqliteDialect, Projection::Member);
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn filtered_sorted_paged() {
        let query = MemberQuery::new()
            .filter(Predicate::eq(Field::Age, 100))
            .order_by(OrderSpec::desc(Field::Age))
            .order_by(OrderSpec::asc(Field::Username).nulls_last())
            .page(Page::new(1, 2));
        let (sql, params) = query.to_sql(&SqliteDialect, Projection::Member);

        assert_eq!(
            sql,
            "SELECT m.id, m.username, m.age, m.team_id FROM member m WHERE m.age = ? \
             ORDER BY m.age DESC, CASE WHEN m.username IS NULL THEN 1 ELSE 0 END, \
             m.username ASC, m.id ASC LIMIT 2 OFFSET 1"
        );
        assert_eq!(params.values, vec![Value::Int(100)]);
    }

    #[test]
    fn left_on_params_precede_where_params() {
        let query = MemberQuery::new()
            .join(TeamJoin::LeftOn(Predicate::eq(Field::TeamName, "teamA")))
            .filter(Predicate::gte(Field::Age, 10));
        let (sql, params) = query.to_sql(&SqliteDialect, Projection::MemberAndTeam);

        assert_eq!(
            sql,
            "SELECT m.id, m.username, m.age, m.team_id, t.id, t.name FROM member m \
             LEFT JOIN team t ON m.team_id = t.id AND t.name = ? WHERE m.age >= ? \
             ORDER BY m.id ASC"
        );
        assert_eq!(params.values, vec![Value::from("teamA"), Value::Int(10)]);
    }

    #[test]
    fn theta_join_filters_in_where() {
        let query = MemberQuery::new()
            .join(TeamJoin::Theta)
            .filter(Predicate::FieldEq(Field::Username, Field::TeamName));
        let (sql, _) = query.to_sql(&SqliteDialect, Projection::Member);
        assert!(sql.contains("FROM member m CROSS JOIN team t WHERE m.username = t.name"));
    }

    #[test]
    fn unjoined_team_projection_selects_nulls() {
        let (sql, _) = MemberQuery::new().to_sql(&SqliteDialect, Projection::MemberAndTeam);
        assert!(sql.starts_with("SELECT m.id, m.username, m.age, m.team_id, NULL, NULL FROM member m"));
    }

    #[test]
    fn label_projection_concatenates() {
        let (sql, _) = MemberQuery::new().to_sql(&SqliteDialect, Projection::UsernameAgeLabel);
        assert_eq!(
            sql,
            "SELECT m.username || '_' || CAST(m.age AS TEXT) FROM member m ORDER BY m.id ASC"
        );
    }

    #[test]
    fn constant_projection_binds_before_filter() {
        let query = MemberQuery::new().filter(Predicate::eq(Field::Age, 10));
        let (sql, params) = query.to_sql(&SqliteDialect, Projection::UsernameConstant("A"));
        assert_eq!(
            sql,
            "SELECT m.username, ? FROM member m WHERE m.age = ? ORDER BY m.id ASC"
        );
        assert_eq!(
            params.values,
            vec![Value::Text("A".to_string()), Value::Int(10)]
        );
    }

    #[test]
    fn repeated_filters_are_anded() {
        let query = MemberQuery::new()
            .filter(Predicate::eq(Field::Username, "member1"))
            .filter(Predicate::eq(Field::Age, 10));
        assert_eq!(
            query.filter,
            Some(Predicate::And(vec![
                Predicate::eq(Field::Username, "member1"),
                Predicate::eq(Field::Age, 10)
            ]))
        );
    }

    #[test]
    fn count_ignores_order_and_page() {
        let query = MemberQuery::new()
            .join(TeamJoin::Left)
            .filter(Predicate::eq(Field::TeamName, "teamA"))
            .order_by(OrderSpec::desc(Field::Age))
            .page(Page::new(0, 1));
        let (sql, params) = query.count_sql(&SqliteDialect);
        assert_eq!(
            sql,
            "SELECT COUNT(*) FROM member m LEFT JOIN team t ON m.team_id = t.id WHERE t.name = ?"
        );
        assert_eq!(params.values.len(), 1);
    }

    #[test]
    fn validate_requires_join_for_team_fields() {
        let query = MemberQuery::new().filter(Predicate::eq(Field::TeamName, "teamA"));
        assert!(matches!(
            query.validate(),
            Err(FilterError::MissingJoin(Field::TeamName))
        ));

        let query = MemberQuery::new().order_by(OrderSpec::asc(Field::TeamId));
        assert!(matches!(
            query.validate(),
            Err(FilterError::MissingJoin(Field::TeamId))
        ));

        let query = MemberQuery::new()
            .join(TeamJoin::Inner)
            .filter(Predicate::eq(Field::TeamName, "teamA"));
        assert!(query.validate().is_ok());
    }

    #[test]
    fn validate_checks_join_predicate() {
        let query =
            MemberQuery::new().join(TeamJoin::LeftOn(Predicate::eq(Field::TeamName, 1_i64)));
        assert!(matches!(
            query.validate(),
            Err(FilterError::TypeMismatch { .. })
        ));
    }
}
