//! SQL rendering for predicates
//!
//! Builds WHERE/ON fragments with placeholders and collects the bound values
//! in insertion order. Columns are qualified with the member (`m`) and team
//! (`t`) aliases.

use sqlx::Arguments;
use sqlx::sqlite::SqliteArguments;

use super::predicate::{CompareOp, Predicate, Value};
use crate::data::sql::SqlDialect;

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SqlParams {
    pub values: Vec<Value>,
}

impl SqlParams {
    /// Record a value and return its placeholder
    pub fn push(&mut self, dialect: &dyn SqlDialect, value: Value) -> String {
        self.values.push(value);
        dialect.placeholder(self.values.len())
    }

    /// Convert to sqlx arguments for binding
    pub fn into_arguments<'q>(self) -> Result<SqliteArguments<'q>, sqlx::Error> {
        let mut args = SqliteArguments::default();
        for value in self.values {
            let added = match value {
                Value::Null => args.add(None::<i64>),
                Value::Int(v) => args.add(v),
                Value::Text(v) => args.add(v),
            };
            added.map_err(sqlx::Error::Encode)?;
        }
        Ok(args)
    }
}

/// Escape LIKE metacharacters (%, _, \) so user input matches literally
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

impl Predicate {
    /// Render this predicate as a SQL boolean expression
    pub fn to_sql(&self, dialect: &dyn SqlDialect, params: &mut SqlParams) -> String {
        match self {
            Self::True => "1=1".to_string(),
            Self::False => "1=0".to_string(),
            Self::And(children) => join(children, " AND ", "1=1", dialect, params),
            Self::Or(children) => join(children, " OR ", "1=0", dialect, params),
            Self::Not(inner) => format!("NOT ({})", inner.to_sql(dialect, params)),
            Self::Compare { field, op, value } => {
                let col = field.qualified();
                match op {
                    CompareOp::StartsWith => {
                        let pattern = match value {
                            Value::Text(prefix) => Value::Text(format!("{}%", escape_like(prefix))),
                            other => other.clone(),
                        };
                        let ph = params.push(dialect, pattern);
                        format!("{} LIKE {} ESCAPE '\\'", col, ph)
                    }
                    _ => {
                        let ph = params.push(dialect, value.clone());
                        let op = match op {
                            CompareOp::Eq => "=",
                            CompareOp::Ne => "<>",
                            CompareOp::Lt => "<",
                            CompareOp::Lte => "<=",
                            CompareOp::Gt => ">",
                            CompareOp::Gte => ">=",
                            CompareOp::StartsWith => unreachable!("handled above"),
                        };
                        format!("{} {} {}", col, op, ph)
                    }
                }
            }
            Self::IsNull(field) => format!("{} IS NULL", field.qualified()),
            Self::IsNotNull(field) => format!("{} IS NOT NULL", field.qualified()),
            Self::FieldEq(left, right) => {
                format!("{} = {}", left.qualified(), right.qualified())
            }
        }
    }
}

fn join(
    children: &[Predicate],
    sep: &str,
    empty: &str,
    dialect: &dyn SqlDialect,
    params: &mut SqlParams,
) -> String {
    if children.is_empty() {
        return empty.to_string();
    }
    let parts: Vec<String> = children
        .iter()
        .map(|c| c.to_sql(dialect, params))
        .collect();
    format!("({})", parts.join(sep))
}
