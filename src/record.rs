use std::fmt;

/// The latest result row of one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub date: String,
    pub weekday: String,
    pub values: Vec<String>,
}

impl ResultRecord {
    pub fn new(date: impl Into<String>, weekday: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            date: date.into(),
            weekday: weekday.into(),
            values,
        }
    }

    /// `"<date> <weekday> <v1> <v2> ... <vN>"`, no escaping or validation
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ResultRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.weekday, self.values.join(" "))
    }
}
