use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A phase: a named time span holding an ordered list of tasks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    #[serde(with = "text_serde")]
    pub id: String,
    #[serde(with = "text_serde")]
    pub name: String,
    #[serde(with = "date_serde")]
    pub start: Option<NaiveDate>,
    #[serde(with = "date_serde")]
    pub end: Option<NaiveDate>,
    /// Free-form effort label, e.g. "3 weeks".
    #[serde(with = "text_serde")]
    pub effort: String,
    #[serde(deserialize_with = "list_serde::deserialize")]
    pub tasks: Vec<Task>,
}

/// A single unit of work inside a phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Task {
    #[serde(with = "text_serde")]
    pub id: String,
    #[serde(with = "text_serde")]
    pub name: String,
    #[serde(with = "date_serde")]
    pub start: Option<NaiveDate>,
    #[serde(with = "date_serde")]
    pub end: Option<NaiveDate>,
    #[serde(with = "text_serde")]
    pub effort: String,
    /// Ids of the tasks that must finish before this one starts.
    #[serde(rename = "dependsOn", deserialize_with = "list_serde::deserialize")]
    pub depends_on: Vec<String>,
}

impl Group {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    pub fn with_effort(mut self, effort: impl Into<String>) -> Self {
        self.effort = effort.into();
        self
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    pub fn with_effort(mut self, effort: impl Into<String>) -> Self {
        self.effort = effort.into();
        self
    }

    pub fn depends_on(mut self, id: impl Into<String>) -> Self {
        self.depends_on.push(id.into());
        self
    }
}

/// Serde helper for optional `YYYY-MM-DD` dates.
///
/// Anything that is not a parseable date string deserializes to `None`
/// so one bad field never rejects the whole schedule.
pub(crate) mod date_serde {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Null => None,
            Value::String(s) => match NaiveDate::parse_from_str(s.trim(), FORMAT) {
                Ok(d) => Some(d),
                Err(e) => {
                    tracing::warn!(value = %s, error = %e, "ignoring unparseable date");
                    None
                }
            },
            other => {
                tracing::warn!(value = %other, "ignoring non-string date");
                None
            }
        })
    }
}

/// Serde helper for label fields: numbers and booleans are stringified,
/// anything else becomes empty.
pub(crate) mod text_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(text: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(text)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => String::new(),
        })
    }
}

/// Serde helper for list fields: `null` is empty, a lone value is a
/// one-element list, and entries of the wrong shape are dropped.
pub(crate) mod list_serde {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let items = match Value::deserialize(deserializer)? {
            Value::Null => return Ok(Vec::new()),
            Value::Array(items) => items,
            single => vec![single],
        };
        Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(error = %e, "dropping malformed list entry");
                    None
                }
            })
            .collect())
    }
}

/// Serde helper for nested records: anything that does not parse, `null`
/// included, falls back to the default.
pub(crate) mod or_default_serde {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => T::default(),
            value => serde_json::from_value(value).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring malformed record");
                T::default()
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_reads_depends_on_key() {
        let task: Task = serde_json::from_str(
            r#"{"id":"t2","name":"Build","start":"2024-01-15","end":"2024-01-20",
                "effort":"5d","dependsOn":["t1"]}"#,
        )
        .unwrap();
        assert_eq!(task.depends_on, vec!["t1".to_string()]);
        assert_eq!(task.start, NaiveDate::from_ymd_opt(2024, 1, 15));
    }

    #[test]
    fn bad_dates_become_absent() {
        let task: Task =
            serde_json::from_str(r#"{"id":"t","start":"next week","end":42}"#).unwrap();
        assert_eq!(task.start, None);
        assert_eq!(task.end, None);
        assert!(task.depends_on.is_empty());
    }

    #[test]
    fn numeric_effort_is_stringified() {
        let group: Group = serde_json::from_str(r#"{"id":"g","effort":12}"#).unwrap();
        assert_eq!(group.effort, "12");
        assert!(group.tasks.is_empty());
    }

    #[test]
    fn depends_on_tolerates_null_and_lone_ids() {
        let task: Task = serde_json::from_str(r#"{"id":"t","dependsOn":null}"#).unwrap();
        assert!(task.depends_on.is_empty());

        let task: Task = serde_json::from_str(r#"{"id":"t","dependsOn":"t1"}"#).unwrap();
        assert_eq!(task.depends_on, vec!["t1".to_string()]);

        let task: Task =
            serde_json::from_str(r#"{"id":"t","dependsOn":["t1",7,null,"t2"]}"#).unwrap();
        assert_eq!(task.depends_on, vec!["t1".to_string(), "t2".to_string()]);
    }

    #[test]
    fn null_task_list_is_empty() {
        let group: Group = serde_json::from_str(r#"{"id":"g","tasks":null}"#).unwrap();
        assert!(group.tasks.is_empty());

        let group: Group =
            serde_json::from_str(r#"{"id":"g","tasks":["oops",{"id":"t"}]}"#).unwrap();
        assert_eq!(group.tasks.len(), 1);
        assert_eq!(group.tasks[0].id, "t");
    }
}
